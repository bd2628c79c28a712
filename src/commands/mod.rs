//! Handlers behind the `majex` subcommands.

mod assets;
mod auth;
mod contacts;
mod dashboard;
mod events;
mod print;

use majex::{config::Command, error::AppError, routes::Route, site::Site};

pub async fn dispatch(site: &Site, command: Command) -> Result<(), AppError> {
    match command {
        Command::Login(args) => auth::login(site, args).await,
        Command::Logout => auth::logout(site).await,
        Command::Whoami => auth::whoami(site).await,
        Command::Assets(cmd) => assets::handle(site, cmd).await,
        Command::Events(cmd) => events::handle(site, cmd).await,
        Command::Contacts(cmd) => contacts::handle(site, cmd).await,
        Command::Dashboard => dashboard::handle(site).await,
    }
}

/// Admin commands run "inside" the dashboard and go through its guard.
fn enter_dashboard(site: &Site) -> Result<(), AppError> {
    site.guard.activate(Route::AdminDashboard, |_| ())?;
    Ok(())
}
