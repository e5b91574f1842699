// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// The notification service task has shut down.
    Closed,
    Action(ActionError),
}

/// Failure reported by a notification action handler.
///
/// Handlers belong to the producer; the engine only carries the message so
/// it can be logged and handed back to whoever triggered the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ActionError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Closed => write!(f, "Notification service is closed"),
            Error::Action(e) => write!(f, "Action Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ActionError> for Error {
    fn from(err: ActionError) -> Self {
        Error::Action(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn closed_error_formats_properly() {
        assert_eq!(
            format!("{}", Error::Closed),
            "Notification service is closed"
        );
    }

    #[test]
    fn action_error_converts_and_keeps_message() {
        let err: Error = ActionError::new("upload rejected").into();
        match &err {
            Error::Action(inner) => assert_eq!(inner.message(), "upload rejected"),
            _ => panic!("expected Action variant"),
        }
        assert_eq!(format!("{}", err), "Action Error: upload rejected");
    }

    #[test]
    fn toml_parse_error_maps_to_config() {
        let parse: std::result::Result<toml::Table, _> = toml::from_str("not = valid = toml");
        let err: Error = parse.expect_err("toml should be invalid").into();
        assert!(matches!(err, Error::Config(_)));
    }
}
