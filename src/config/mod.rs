//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{collections::BTreeMap, fmt, path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::assets::{DEFAULT_PLACEHOLDER, FallbackTable, validate_key};

pub use cli::{
    AssetCreateArgs, AssetUpdateArgs, AssetsCommand, CliArgs, Command, ContactSendArgs,
    ContactsCommand, EventWriteArgs, EventsCommand, GlobalOverrides, LoginArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "majex";
const ENV_PREFIX: &str = "MAJEX";
const LOCAL_API_URL: &str = "http://127.0.0.1:8000/api";
const PRODUCTION_API_URL: &str = "https://api.majexconsulting.com/api";
const DEFAULT_SESSION_PATH: &str = ".majex/session.json";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub session: SessionSettings,
    pub assets: AssetSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Local,
    Production,
}

impl Deployment {
    pub fn default_api_url(self) -> &'static str {
        match self {
            Deployment::Local => LOCAL_API_URL,
            Deployment::Production => PRODUCTION_API_URL,
        }
    }
}

impl fmt::Display for Deployment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Deployment::Local => "local",
            Deployment::Production => "production",
        })
    }
}

impl FromStr for Deployment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" | "development" => Ok(Deployment::Local),
            "production" | "prod" => Ok(Deployment::Production),
            other => Err(format!("unknown environment `{other}`; expected local or production")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub environment: Deployment,
    pub base_url: Url,
    pub asset_base_url: Url,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub placeholder: String,
    pub fallbacks: BTreeMap<String, String>,
}

impl AssetSettings {
    /// Bundled fallbacks with the configured entries layered on top.
    pub fn fallback_table(&self) -> FallbackTable {
        FallbackTable::with_overrides(self.fallbacks.clone(), Some(self.placeholder.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    session: RawSessionSettings,
    assets: RawAssetSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(environment) = overrides.environment.as_ref() {
            self.api.environment = Some(environment.clone());
        }
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(url) = overrides.asset_base_url.as_ref() {
            self.api.asset_base_url = Some(url.clone());
        }
        if let Some(path) = overrides.session_file.as_ref() {
            self.session.path = Some(path.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            session,
            assets,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            session: build_session_settings(session)?,
            assets: build_asset_settings(assets)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let environment = match api.environment {
        Some(name) => name
            .parse()
            .map_err(|reason| LoadError::invalid("api.environment", reason))?,
        None => Deployment::Local,
    };

    let base_url = non_empty(api.base_url).unwrap_or_else(|| environment.default_api_url().into());
    let base_url = parse_http_url(&base_url, "api.base_url")?;

    let asset_base_url = match non_empty(api.asset_base_url) {
        Some(url) => parse_http_url(&url, "api.asset_base_url")?,
        None => origin_of(&base_url)?,
    };

    Ok(ApiSettings {
        environment,
        base_url,
        asset_base_url,
    })
}

fn build_session_settings(session: RawSessionSettings) -> Result<SessionSettings, LoadError> {
    let path = session
        .path
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));
    if path.as_os_str().is_empty() {
        return Err(LoadError::invalid("session.path", "path must not be empty"));
    }
    Ok(SessionSettings { path })
}

fn build_asset_settings(assets: RawAssetSettings) -> Result<AssetSettings, LoadError> {
    let placeholder = assets
        .placeholder
        .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string());
    if placeholder.trim().is_empty() {
        return Err(LoadError::invalid(
            "assets.placeholder",
            "path must not be empty",
        ));
    }

    for (key, path) in &assets.fallbacks {
        validate_key(key).map_err(|err| LoadError::invalid("assets.fallbacks", err.to_string()))?;
        if path.trim().is_empty() {
            return Err(LoadError::invalid(
                "assets.fallbacks",
                format!("fallback for `{key}` must not be empty"),
            ));
        }
    }

    Ok(AssetSettings {
        placeholder,
        fallbacks: assets.fallbacks,
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    environment: Option<String>,
    base_url: Option<String>,
    asset_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSessionSettings {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    placeholder: Option<String>,
    fallbacks: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

fn parse_http_url(value: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(value)
        .map_err(|err| LoadError::invalid(key, format!("invalid URL `{value}`: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LoadError::invalid(
            key,
            format!("unsupported scheme `{other}`; expected http or https"),
        )),
    }
}

fn origin_of(url: &Url) -> Result<Url, LoadError> {
    let origin = url.origin().ascii_serialization();
    Url::parse(&origin).map_err(|err| {
        LoadError::invalid(
            "api.asset_base_url",
            format!("cannot derive from `{url}`: {err}"),
        )
    })
}

#[cfg(test)]
mod tests;
