use std::error::Error as StdError;
use std::io;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("connection closed by peer: {0}")]
    ConnectionClosed(#[source] reqwest::Error),
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("upstream returned {0}")]
    Status(StatusCode),
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Only transient transport failures and timeouts are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout | Self::Transport(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }

        if let Some(status) = e.status() {
            return Self::Status(status);
        }

        if is_connection_closed(&e) {
            return Self::ConnectionClosed(e);
        }

        Self::Transport(e)
    }
}

/// Walks the source chain looking for a peer that hung up mid-exchange.
fn is_connection_closed(e: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(e);

    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }

        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() || hyper_err.is_canceled() {
                return true;
            }
        }

        current = err.source();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_classification() {
        assert!(FetchError::Timeout.is_retryable());
        assert!(!FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(!FetchError::BodyTooLarge { limit: 10 }.is_retryable());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!FetchError::from(decode).is_retryable());
    }

    #[test]
    fn test_io_reset_is_connection_closed() {
        let err = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(is_connection_closed(&err));

        let err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(!is_connection_closed(&err));
    }
}
