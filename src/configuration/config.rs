#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::infrastructure::log_sinks::LogSinkName;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ApiSessionID,
    ApiTimeout,
    HealthCheckTimeout,
    ConfigFile,
    LogSink,
    LogFile,
    LogURL,
    PreferencesFile,
    Username,
}

fn app_dir() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let dir = dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("salesdesk");
    #[cfg(target_os = "macos")]
    let dir = dirs::home_dir()
        .unwrap_or_else(env::temp_dir)
        .join(".config/salesdesk");

    return dir;
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_millis(key: ConfigKey) -> Result<u64> {
        let val = Config::get(key);
        if let Ok(millis) = val.parse::<u64>() {
            return Ok(millis);
        }

        bail!(format!("Config key '{key}' must be a number of milliseconds, got '{val}'"));
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "User".to_string();
            }

            return user;
        }

        let default_log_sink = LogSinkName::File.to_string();
        let dir = app_dir();

        let res = match key {
            ConfigKey::ApiURL => "http://localhost:8000".to_string(),
            ConfigKey::ApiSessionID => "salesdesk".to_string(),
            ConfigKey::ApiTimeout => "60000".to_string(),
            ConfigKey::HealthCheckTimeout => "1000".to_string(),
            ConfigKey::LogSink => default_log_sink,
            ConfigKey::LogFile => dir.join("conv-log.txt").to_string_lossy().to_string(),
            ConfigKey::LogURL => "http://localhost:3000/api/log-conversation".to_string(),
            ConfigKey::PreferencesFile => dir
                .join("preferences.yaml")
                .to_string_lossy()
                .to_string(),

            // Special
            ConfigKey::ConfigFile => dir.join("config.toml").to_string_lossy().to_string(),
            ConfigKey::Username => "".to_string(),
        };

        return res;
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            username = Config::get(ConfigKey::Username),
            api_url = Config::get(ConfigKey::ApiURL),
            api_session_id = Config::get(ConfigKey::ApiSessionID),
            log_sink = Config::get(ConfigKey::LogSink),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed on your chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{}\"", val.replace('\\', "\\\\"));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
