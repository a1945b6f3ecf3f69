use std::fmt;

use crate::core::config::ConfigError;

/// Errors that end the process before or after the UI runs.
///
/// Steady-state failures (serial read errors, odd geometry) never become a
/// `SermonError`; they are shown in the header instead.
#[derive(Debug)]
pub enum SermonError {
    Io(std::io::Error),
    Config(ConfigError),
    Serial(serialport::Error),
    NoDevices,
    InvalidSelection(String),
}

impl fmt::Display for SermonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SermonError::Io(e) => write!(f, "I/O error: {e}"),
            SermonError::Config(e) => write!(f, "{e}"),
            SermonError::Serial(e) => write!(f, "serial error: {e}"),
            SermonError::NoDevices => write!(f, "no serial devices found"),
            SermonError::InvalidSelection(input) if input.is_empty() => {
                write!(f, "invalid device selection")
            }
            SermonError::InvalidSelection(input) => {
                write!(f, "invalid device selection: {input}")
            }
        }
    }
}

impl std::error::Error for SermonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SermonError::Io(e) => Some(e),
            SermonError::Config(e) => Some(e),
            SermonError::Serial(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SermonError {
    fn from(e: std::io::Error) -> Self {
        SermonError::Io(e)
    }
}

impl From<ConfigError> for SermonError {
    fn from(e: ConfigError) -> Self {
        SermonError::Config(e)
    }
}

impl From<serialport::Error> for SermonError {
    fn from(e: serialport::Error) -> Self {
        SermonError::Serial(e)
    }
}

/// Backends that cannot fail (the test backend) report `Infallible`.
impl From<std::convert::Infallible> for SermonError {
    fn from(e: std::convert::Infallible) -> Self {
        match e {}
    }
}
