use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Malformed or incomplete price table. Never defaulted silently.
    #[error("configuration error: {0}")]
    Config(String),
    /// A selection names a band, case or battery the catalog does not have.
    #[error("unknown {kind}: {key}")]
    Validation { kind: &'static str, key: String },
    /// Adding one more module would exceed the per-device ceiling.
    #[error("module limit reached: at most {max} modules per device")]
    CapacityExceeded { max: usize },
}

impl CalcError {
    pub(crate) fn unknown(kind: &'static str, key: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
