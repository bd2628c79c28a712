//! Contact-form submissions: the public form and the admin inbox.

use majex_api_types::{ContactForm, ContactMessage, ContactStats, ContactStatus, Page, StatusUpdate};
use reqwest::Method;
use tracing::info;

use crate::http::{ApiClient, ApiError};

#[derive(Clone)]
pub struct ContactService {
    api: ApiClient,
}

impl ContactService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Public form; needs no session.
    pub async fn send_message(&self, form: &ContactForm) -> Result<(), ApiError> {
        for (field, value) in [
            ("name", &form.name),
            ("email", &form.email),
            ("subject", &form.subject),
            ("message", &form.message),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::invalid_input(format!("{field} is required")));
            }
        }
        if !form.email.contains('@') {
            return Err(ApiError::invalid_input(format!(
                "`{}` is not an email address",
                form.email
            )));
        }
        self.api
            .send_json_unit(Method::POST, "contact", form)
            .await?;
        info!(subject = %form.subject, "Contact message sent");
        Ok(())
    }

    pub async fn list(&self) -> Result<Page<ContactMessage>, ApiError> {
        self.api.get_list("contacts").await
    }

    pub async fn get(&self, id: u64) -> Result<ContactMessage, ApiError> {
        self.api.get(&format!("contacts/{id}")).await
    }

    pub async fn mark_read(&self, id: u64) -> Result<ContactMessage, ApiError> {
        self.set_status(id, ContactStatus::Read).await
    }

    pub async fn mark_replied(&self, id: u64) -> Result<ContactMessage, ApiError> {
        self.set_status(id, ContactStatus::Replied).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.api.delete(&format!("contacts/{id}")).await
    }

    pub async fn stats(&self) -> Result<ContactStats, ApiError> {
        self.api.get("contacts/stats").await
    }

    async fn set_status(&self, id: u64, status: ContactStatus) -> Result<ContactMessage, ApiError> {
        let message = self
            .api
            .send_json(Method::PUT, &format!("contacts/{id}"), &StatusUpdate { status })
            .await?;
        info!(contact_id = id, %status, "Contact message updated");
        Ok(message)
    }
}
