use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("no {channel} destination given")]
    MissingDestination { channel: &'static str },
    #[error("invalid {channel} destination '{destination}'")]
    InvalidDestination {
        channel: &'static str,
        destination: String,
    },
    #[error("url: {0}")]
    Url(#[from] url::ParseError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShareError>;
