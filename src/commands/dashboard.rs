use majex::{dashboard::DashboardSummary, error::AppError, site::Site};

use super::enter_dashboard;
use super::print::print_json;

pub async fn handle(site: &Site) -> Result<(), AppError> {
    enter_dashboard(site)?;
    let summary = DashboardSummary::load(&site.events, &site.contacts).await?;
    print_json(&summary)
}
