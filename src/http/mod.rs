//! Outgoing requests to the site backend.
//!
//! [`ApiClient`] is the single place requests leave the process. It plays the
//! role of an interceptor: the stored bearer token is attached when present,
//! and an authorization failure on any request ends the session and redirects
//! to the login surface.

mod envelope;
mod error;

use std::sync::Arc;

use majex_api_types::Page;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Request, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub use envelope::{decode_list, decode_object, decode_unit, error_message};
pub use error::{ApiError, GENERIC_MESSAGE};

use crate::routes::{Navigator, Route};
use crate::session::SessionStore;

/// Form field used to tunnel `PUT` through a multipart `POST`.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    sessions: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base: &Url,
        sessions: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
            sessions,
            navigator,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("majex/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Resolve an endpoint path below the API base, e.g. `admin/assets/3`.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(ApiError::from)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path)?).build()?;
        let (status, body) = self.execute(request).await?;
        decode_object(status, &body)
    }

    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Page<T>, ApiError> {
        let request = self.client.get(self.url(path)?).build()?;
        let (status, body) = self.execute(request).await?;
        decode_list(status, &body)
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .request(method, self.url(path)?)
            .json(body)
            .build()?;
        let (status, body) = self.execute(request).await?;
        decode_object(status, &body)
    }

    pub async fn send_json_unit<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .client
            .request(method, self.url(path)?)
            .json(body)
            .build()?;
        let (status, body) = self.execute(request).await?;
        decode_unit(status, &body)
    }

    /// Multipart uploads are always sent as `POST`; callers that mean `PUT`
    /// add [`METHOD_OVERRIDE_FIELD`] to the form.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let request = self.client.post(self.url(path)?).multipart(form).build()?;
        let (status, body) = self.execute(request).await?;
        decode_object(status, &body)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.client.delete(self.url(path)?).build()?;
        let (status, body) = self.execute(request).await?;
        decode_unit(status, &body)
    }

    async fn execute(&self, mut request: Request) -> Result<(StatusCode, Vec<u8>), ApiError> {
        if let Some(header) = self.bearer_header()? {
            request.headers_mut().insert(AUTHORIZATION, header);
        }
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        debug!(%method, path, status = status.as_u16(), "Backend responded");

        if status == StatusCode::UNAUTHORIZED {
            self.end_session(&method, &path);
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::rejected(status, error_message(&body)));
        }
        Ok((status, body))
    }

    fn bearer_header(&self) -> Result<Option<HeaderValue>, ApiError> {
        let token = match self.sessions.token() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Session unreadable; sending request anonymously");
                None
            }
        };
        token
            .map(|token| {
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|err| ApiError::invalid_input(format!("unusable token: {err}")))
            })
            .transpose()
    }

    fn end_session(&self, method: &Method, path: &str) {
        warn!(%method, path, "Authorization rejected; ending session");
        if let Err(err) = self.sessions.clear() {
            warn!(error = %err, "Failed to clear persisted session");
        }
        self.navigator.navigate(Route::Login);
    }
}

fn with_trailing_slash(base: &Url) -> Url {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}
