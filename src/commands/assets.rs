use majex::{
    assets::AssetForm,
    config::{AssetCreateArgs, AssetUpdateArgs, AssetsCommand},
    error::AppError,
    site::Site,
    upload::ImageUpload,
};
use majex_api_types::{ReorderItem, SiteAsset};
use serde_json::json;

use super::enter_dashboard;
use super::print::print_json;

pub async fn handle(site: &Site, cmd: AssetsCommand) -> Result<(), AppError> {
    match cmd {
        AssetsCommand::Catalog => {
            let catalog = site.start().await;
            print_json(catalog.as_ref())
        }
        AssetsCommand::Url { key } => {
            site.start().await;
            println!("{}", site.assets.get_url(&key));
            Ok(())
        }
        AssetsCommand::List => {
            enter_dashboard(site)?;
            print_json(&site.assets.admin_list().await?)
        }
        AssetsCommand::Create(args) => {
            enter_dashboard(site)?;
            let form = create_form(args).await?;
            print_json(&site.assets.create(form).await?)
        }
        AssetsCommand::Update(args) => {
            enter_dashboard(site)?;
            let current = find(site, args.id).await?;
            let form = update_form(&current, args).await?;
            print_json(&site.assets.update(current.id, form).await?)
        }
        AssetsCommand::Delete { id } => {
            enter_dashboard(site)?;
            site.assets.delete(id).await?;
            print_json(&json!({ "deleted": id }))
        }
        AssetsCommand::Toggle { id } => {
            enter_dashboard(site)?;
            print_json(&site.assets.toggle(id).await?)
        }
        AssetsCommand::Reorder { items } => {
            enter_dashboard(site)?;
            let items: Vec<ReorderItem> = items
                .into_iter()
                .map(|(id, sort_order)| ReorderItem { id, sort_order })
                .collect();
            let count = items.len();
            site.assets.reorder(items).await?;
            print_json(&json!({ "reordered": count }))
        }
    }
}

async fn find(site: &Site, id: u64) -> Result<SiteAsset, AppError> {
    site.assets
        .admin_list()
        .await?
        .into_iter()
        .find(|asset| asset.id == id)
        .ok_or_else(|| AppError::not_found(format!("asset {id}")))
}

async fn create_form(args: AssetCreateArgs) -> Result<AssetForm, AppError> {
    let mut form = AssetForm::new(args.key, args.category, args.label);
    form.alt_text = args.alt_text;
    form.sort_order = args.sort_order;
    form.is_active = !args.inactive;
    if let Some(path) = args.image {
        form.image = Some(ImageUpload::from_path(&path).await?);
    }
    Ok(form)
}

async fn update_form(current: &SiteAsset, args: AssetUpdateArgs) -> Result<AssetForm, AppError> {
    let mut form = AssetForm::from_asset(current);
    if let Some(category) = args.category {
        form.category = category;
    }
    if let Some(label) = args.label {
        form.label = label;
    }
    if let Some(alt_text) = args.alt_text {
        form.alt_text = Some(alt_text);
    }
    if let Some(sort_order) = args.sort_order {
        form.sort_order = sort_order;
    }
    if let Some(active) = args.active {
        form.is_active = active;
    }
    if let Some(path) = args.image {
        form.image = Some(ImageUpload::from_path(&path).await?);
    }
    Ok(form)
}
