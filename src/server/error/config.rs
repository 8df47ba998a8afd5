use thiserror::Error;

/// Startup configuration could not be read from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingEnvVar(String),
    /// The variable is set but its value failed to parse
    #[error("{var} has an invalid value: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}
