//! Configuration access port trait.

use crate::domain::error::LabError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// `Ok(None)` when the key is absent, `ConfigInvalid` when it is present
    /// but not an integer.
    fn read_int(&self, section: &str, key: &str) -> Result<Option<i64>, LabError>;

    /// Float counterpart of [`ConfigPort::read_int`].
    fn read_float(&self, section: &str, key: &str) -> Result<Option<f64>, LabError>;
}
