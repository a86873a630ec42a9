use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("callback error: {}", describe_status(*status, reason))]
    Callback {
        /// HTTP status of the rejected call, when the failure came from a response.
        status: Option<u16>,
        reason: String,
    },

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("display error: {0}")]
    Display(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

fn describe_status(status: Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("{code} {reason}"),
        None => reason.to_string(),
    }
}

pub type Result<T, E = GaugeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_includes_status() {
        let err = GaugeError::Callback {
            status: Some(503),
            reason: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "callback error: 503 Service Unavailable");
    }

    #[test]
    fn callback_error_without_status() {
        let err = GaugeError::Callback {
            status: None,
            reason: "connection refused".into(),
        };
        assert_eq!(err.to_string(), "callback error: connection refused");
    }
}
