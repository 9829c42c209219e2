//! Configuration traits

use crate::TesseraError;
use std::path::Path;

/// A configuration type that can be loaded from layered sources
pub trait TesseraConfigSource: Clone + Default + Send + Sync + 'static {
    /// Load from a TOML file; missing keys take their defaults
    fn load_from_file(path: &Path) -> Result<Self, TesseraError>;

    /// Apply overrides from `(name, value)` pairs, e.g. `std::env::vars()`
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), TesseraError>
    where
        I: IntoIterator<Item = (String, String)>;

    /// Apply overrides from the process environment
    fn merge_with_env(&mut self) -> Result<(), TesseraError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Defaults, then `path` if given, then the environment, then validation
    fn load(path: Option<&Path>) -> Result<Self, TesseraError>
    where
        Self: ConfigValidation,
    {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> Result<(), TesseraError>;
}
