use clap::Parser;
use majex_api_types::AssetCategory;

use super::*;

#[test]
fn defaults_target_the_local_backend() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.api.environment, Deployment::Local);
    assert_eq!(settings.api.base_url.as_str(), LOCAL_API_URL);
    assert_eq!(settings.api.asset_base_url.as_str(), "http://127.0.0.1:8000/");
    assert_eq!(settings.session.path, PathBuf::from(DEFAULT_SESSION_PATH));
    assert_eq!(settings.assets.placeholder, DEFAULT_PLACEHOLDER);
    assert_eq!(settings.logging.level, LevelFilter::INFO);
}

#[test]
fn production_environment_switches_the_api_address() {
    let mut raw = RawSettings::default();
    raw.api.environment = Some("production".into());
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.as_str(), PRODUCTION_API_URL);
    assert_eq!(
        settings.api.asset_base_url.as_str(),
        "https://api.majexconsulting.com/"
    );
}

#[test]
fn explicit_base_url_wins_over_environment() {
    let mut raw = RawSettings::default();
    raw.api.environment = Some("production".into());
    raw.api.base_url = Some("http://staging.majex.test:9000/api".into());
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.environment, Deployment::Production);
    assert_eq!(
        settings.api.asset_base_url.as_str(),
        "http://staging.majex.test:9000/"
    );
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("http://from-file.test/api".into());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        api_url: Some("http://from-cli.test/api".into()),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.api.base_url.host_str(), Some("from-cli.test"));
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn unknown_environment_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.environment = Some("staging".into());
    let err = Settings::from_raw(raw).expect_err("invalid environment");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "api.environment",
            ..
        }
    ));
}

#[test]
fn non_http_api_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.api.base_url = Some("ftp://files.majex.test".into());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "api.base_url",
            ..
        })
    ));
}

#[test]
fn configured_fallbacks_layer_over_bundled_ones() {
    let mut raw = RawSettings::default();
    raw.assets
        .fallbacks
        .insert("hero-main".into(), "static/hero.webp".into());
    raw.assets.placeholder = Some("static/blank.png".into());
    let table = Settings::from_raw(raw)
        .expect("valid settings")
        .assets
        .fallback_table();

    assert_eq!(table.resolve("hero-main"), "static/hero.webp");
    assert_eq!(table.resolve("logo-fdfp"), "assets/logos/fdfp.png");
    assert_eq!(table.resolve("nope"), "static/blank.png");
}

#[test]
fn malformed_fallback_key_is_rejected() {
    let mut raw = RawSettings::default();
    raw.assets
        .fallbacks
        .insert("Hero Main".into(), "static/hero.webp".into());
    assert!(matches!(
        Settings::from_raw(raw),
        Err(LoadError::Invalid {
            key: "assets.fallbacks",
            ..
        })
    ));
}

#[test]
fn parse_global_flags_after_subcommand() {
    let args = CliArgs::parse_from([
        "majex",
        "assets",
        "url",
        "logo-main",
        "--api-url",
        "http://127.0.0.1:9000/api",
        "--session-file",
        "/tmp/session.json",
    ]);

    assert_eq!(
        args.overrides.api_url.as_deref(),
        Some("http://127.0.0.1:9000/api")
    );
    assert_eq!(
        args.overrides.session_file.as_deref(),
        Some(std::path::Path::new("/tmp/session.json"))
    );
    match args.command {
        Command::Assets(AssetsCommand::Url { key }) => assert_eq!(key, "logo-main"),
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_asset_create_arguments() {
    let args = CliArgs::parse_from([
        "majex",
        "assets",
        "create",
        "--key",
        "partner-rti",
        "--category",
        "partner",
        "--label",
        "RTI",
        "--sort-order",
        "3",
        "--inactive",
    ]);

    match args.command {
        Command::Assets(AssetsCommand::Create(create)) => {
            assert_eq!(create.key, "partner-rti");
            assert_eq!(create.category, AssetCategory::Partner);
            assert_eq!(create.sort_order, 3);
            assert!(create.inactive);
            assert!(create.image.is_none());
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_reorder_pairs() {
    let args = CliArgs::parse_from(["majex", "assets", "reorder", "4=1", "5=2", "6=3"]);

    match args.command {
        Command::Assets(AssetsCommand::Reorder { items }) => {
            assert_eq!(items, vec![(4, 1), (5, 2), (6, 3)]);
        }
        _ => panic!("wrong command parsed"),
    }
    assert!(CliArgs::try_parse_from(["majex", "assets", "reorder", "4:1"]).is_err());
}

#[test]
fn unknown_category_fails_parsing() {
    let result = CliArgs::try_parse_from([
        "majex",
        "assets",
        "create",
        "--key",
        "x",
        "--category",
        "footer",
        "--label",
        "X",
    ]);
    assert!(result.is_err());
}

#[test]
fn parse_events_upcoming_filter() {
    let args = CliArgs::parse_from(["majex", "events", "upcoming", "--type", "formation"]);
    match args.command {
        Command::Events(EventsCommand::Upcoming { kind }) => {
            assert_eq!(kind.as_deref(), Some("formation"));
        }
        _ => panic!("wrong command parsed"),
    }
}
