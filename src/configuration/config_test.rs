use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    assert!(res.contains("api-url = \"http://localhost:8000\""));
    assert!(res.contains("api-timeout = 60000"));
    assert!(res.contains("[possible values: file, http, none]"));
    assert!(res.contains("# username = \"\""));
    assert!(!res.contains("config-file"));
}

#[test]
fn it_defaults_usernames() {
    assert!(!Config::default(ConfigKey::Username).is_empty());
}

#[test]
fn it_defaults_files_into_the_app_dir() {
    assert!(Config::default(ConfigKey::LogFile).ends_with("conv-log.txt"));
    assert!(Config::default(ConfigKey::PreferencesFile).ends_with("preferences.yaml"));
    assert!(Config::default(ConfigKey::ConfigFile).ends_with("config.toml"));
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "salesdesk",
        "chat",
        "-c",
        "./config.example.toml",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "salesdesk",
        "chat",
        "-c",
        "./test/bad-config.toml",
    ])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    insta::assert_snapshot!(res.unwrap_err().to_string(), @r###"
    config.toml has an invalid value for key 'log-sink': carrier-pigeon
    Possible values are: file, http, none
    "###);
    return Ok(());
}
