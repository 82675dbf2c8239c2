mod types;
mod validator;

pub use types::{BuildConfig, Config, LoggingConfig};
pub use validator::validate_or_bail;
