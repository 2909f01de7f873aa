pub mod file;
pub mod http;
pub mod noop;

use std::path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::LogSinkBox;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogSinkName {
    File,
    Http,
    None,
}

impl LogSinkName {
    pub fn parse(text: &str) -> Option<LogSinkName> {
        return LogSinkName::iter().find(|e| return e.to_string() == text);
    }
}

pub struct LogSinkManager {}

impl LogSinkManager {
    pub fn get(name: &str) -> Result<LogSinkBox> {
        match LogSinkName::parse(name) {
            Some(LogSinkName::File) => {
                return Ok(Arc::new(file::FileSink::new(path::PathBuf::from(
                    Config::get(ConfigKey::LogFile),
                ))));
            }
            Some(LogSinkName::Http) => {
                return Ok(Arc::new(http::HttpSink::new(
                    &Config::get(ConfigKey::LogURL),
                    Duration::from_millis(Config::get_millis(ConfigKey::ApiTimeout)?),
                )));
            }
            Some(LogSinkName::None) => {
                return Ok(Arc::new(noop::NoopSink::default()));
            }
            None => bail!(format!("No log sink implemented for {name}")),
        }
    }
}
