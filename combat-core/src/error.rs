use thiserror::Error;

/// Errors from loading or validating a [`CombatConfig`](crate::CombatConfig).
///
/// The resolvers themselves never fail; only configuration can be rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Invalid range for `{field}`: low {low} must not exceed high {high}")]
    InvalidRange {
        field: &'static str,
        low: f64,
        high: f64,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
