use majex::{
    config::{EventWriteArgs, EventsCommand},
    error::AppError,
    site::Site,
    upload::ImageUpload,
};
use majex_api_types::EventWrite;
use serde_json::json;
use time::OffsetDateTime;

use super::enter_dashboard;
use super::print::{print_json, read_json};

pub async fn handle(site: &Site, cmd: EventsCommand) -> Result<(), AppError> {
    match cmd {
        EventsCommand::List => print_json(&site.events.list().await?.items),
        EventsCommand::Upcoming { kind } => {
            let events = site
                .events
                .upcoming(OffsetDateTime::now_utc(), kind.as_deref())
                .await?;
            print_json(&events)
        }
        EventsCommand::Get { id } => print_json(&site.events.get(id).await?),
        EventsCommand::Create(args) => {
            enter_dashboard(site)?;
            let (event, image) = read_write(args).await?;
            print_json(&site.events.create(&event, image).await?)
        }
        EventsCommand::Update { id, write } => {
            enter_dashboard(site)?;
            let (event, image) = read_write(write).await?;
            print_json(&site.events.update(id, &event, image).await?)
        }
        EventsCommand::Delete { id } => {
            enter_dashboard(site)?;
            site.events.delete(id).await?;
            print_json(&json!({ "deleted": id }))
        }
        EventsCommand::Publish { id } => {
            enter_dashboard(site)?;
            print_json(&site.events.publish(id).await?)
        }
        EventsCommand::Cancel { id } => {
            enter_dashboard(site)?;
            print_json(&site.events.cancel(id).await?)
        }
    }
}

async fn read_write(args: EventWriteArgs) -> Result<(EventWrite, Option<ImageUpload>), AppError> {
    let event: EventWrite = read_json(&args.file).await?;
    let image = match args.image {
        Some(path) => Some(ImageUpload::from_path(&path).await?),
        None => None,
    };
    Ok((event, image))
}
