use majex::{
    config::{ContactSendArgs, ContactsCommand},
    error::AppError,
    site::Site,
};
use majex_api_types::ContactForm;
use serde_json::json;

use super::enter_dashboard;
use super::print::print_json;

pub async fn handle(site: &Site, cmd: ContactsCommand) -> Result<(), AppError> {
    match cmd {
        ContactsCommand::Send(args) => send(site, args).await,
        ContactsCommand::List => {
            enter_dashboard(site)?;
            print_json(&site.contacts.list().await?.items)
        }
        ContactsCommand::Get { id } => {
            enter_dashboard(site)?;
            print_json(&site.contacts.get(id).await?)
        }
        ContactsCommand::Read { id } => {
            enter_dashboard(site)?;
            print_json(&site.contacts.mark_read(id).await?)
        }
        ContactsCommand::Replied { id } => {
            enter_dashboard(site)?;
            print_json(&site.contacts.mark_replied(id).await?)
        }
        ContactsCommand::Delete { id } => {
            enter_dashboard(site)?;
            site.contacts.delete(id).await?;
            print_json(&json!({ "deleted": id }))
        }
        ContactsCommand::Stats => {
            enter_dashboard(site)?;
            print_json(&site.contacts.stats().await?)
        }
    }
}

async fn send(site: &Site, args: ContactSendArgs) -> Result<(), AppError> {
    let form = ContactForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    };
    site.contacts.send_message(&form).await?;
    print_json(&json!({ "sent": true }))
}
