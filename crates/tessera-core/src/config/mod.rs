//! Configuration for record clients and their collaborators
//!
//! Sources are layered: defaults, then a TOML file, then `TESSERA_*`
//! environment variables. The result is validated before use.

pub mod settings;
pub mod traits;
pub mod validation;

pub use settings::{LoggingConfig, RecordConfig, TesseraConfig, TimeoutConfig, ENV_PREFIX};
pub use traits::{ConfigValidation, TesseraConfigSource};
pub use validation::{ConfigValidator, ValidationError, ValidationResult};
