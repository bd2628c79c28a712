use majex::{
    auth::Redirect, config::LoginArgs, error::AppError, routes::Navigator, routes::Route,
    site::Site,
};
use serde_json::json;

use super::print::print_json;

pub async fn login(site: &Site, args: LoginArgs) -> Result<(), AppError> {
    let session = site.auth.login(&args.email, &args.password).await?;
    site.navigator.navigate(Route::AdminDashboard);
    print_json(&session.user)
}

pub async fn logout(site: &Site) -> Result<(), AppError> {
    site.auth.logout().await?;
    site.navigator.navigate(Route::Login);
    print_json(&json!({ "signed_out": true }))
}

pub async fn whoami(site: &Site) -> Result<(), AppError> {
    match site.auth.current_user() {
        Some(user) => print_json(&user),
        None => Err(Redirect {
            from: Route::AdminDashboard,
            to: Route::Login,
        }
        .into()),
    }
}
