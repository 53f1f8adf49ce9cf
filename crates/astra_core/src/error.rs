use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Could not reach {service}: {message}")]
    UpstreamTransport {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned status {status}: {body}")]
    UpstreamStatus {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Classify a reqwest failure against the named upstream service.
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Error::UpstreamStatus {
                service,
                status: status.as_u16(),
                body: err.to_string(),
            },
            None if err.is_decode() => Error::Parse(format!("{} response: {}", service, err)),
            None => Error::UpstreamTransport {
                service,
                message: err.to_string(),
            },
        }
    }

    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamTransport { .. } | Error::UpstreamStatus { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
