//! Input Validation
//!
//! Range checking for vital-sign samples and bed-recommendation attributes
//! before they reach the scoring engines.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
