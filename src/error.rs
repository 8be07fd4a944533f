use std::{fmt, result};

#[derive(Debug)]
pub enum Error {
    /// Settings JSON could not be parsed
    SettingsParse(serde_json::Error),
    /// A settings dimension was zero, negative or not finite
    InvalidDimension { field: &'static str, value: f32 },
}

pub type Result<T> = result::Result<T, Error>;

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SettingsParse(err) => Some(err),
            Error::InvalidDimension { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::SettingsParse(err) => write!(f, "invalid settings: {}", err),
            Error::InvalidDimension { field, value } => {
                write!(f, "settings field `{}` must be positive, got {}", field, value)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SettingsParse(e)
    }
}
