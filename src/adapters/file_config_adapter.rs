//! INI file configuration adapter.
//!
//! Lenient getters fall back to a default on absent or malformed values;
//! strict readers report malformed values as `ConfigInvalid` so validation
//! can reject them before a run.

use crate::domain::error::LabError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.read_int(section, key).ok().flatten().unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.read_float(section, key).ok().flatten().unwrap_or(default)
    }

    fn read_int(&self, section: &str, key: &str) -> Result<Option<i64>, LabError> {
        self.config
            .getint(section, key)
            .map_err(|_| malformed(section, key, "an integer"))
    }

    fn read_float(&self, section: &str, key: &str) -> Result<Option<f64>, LabError> {
        self.config
            .getfloat(section, key)
            .map_err(|_| malformed(section, key, "a number"))
    }
}

fn malformed(section: &str, key: &str, expected: &str) -> LabError {
    LabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{} must be {}", key, expected),
    }
}
