use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SportcastErrorKind {
    /// Login rejected or no usable session.
    Auth,
    /// No candidate stream survived the format filter.
    NoStream,
    /// Play attempted before the event's effective start.
    NotStarted,
    /// The playback component required for the stream format is not installed.
    ComponentMissing,
    /// Remote API or network failure.
    Upstream,
    /// Local persistence failure.
    Persist,
    Info,
}

impl SportcastErrorKind {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Auth => "auth",
            Self::NoStream => "no-stream",
            Self::NotStarted => "not-started",
            Self::ComponentMissing => "component-missing",
            Self::Upstream => "upstream",
            Self::Persist => "persist",
            Self::Info => "info",
        }
    }
}

#[derive(Debug)]
pub struct SportcastError {
    kind: SportcastErrorKind,
    message: String,
}

impl SportcastError {
    pub fn new(kind: SportcastErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub const fn kind(&self) -> SportcastErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for SportcastError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

impl Error for SportcastError {}

impl From<reqwest::Error> for SportcastError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(SportcastErrorKind::Upstream, err.to_string())
    }
}

impl From<std::io::Error> for SportcastError {
    fn from(err: std::io::Error) -> Self {
        Self::new(SportcastErrorKind::Persist, err.to_string())
    }
}

macro_rules! create_sportcast_error {
    ($kind:expr, $($arg:tt)*) => {
        $crate::sportcast_error::SportcastError::new($kind, format!($($arg)*))
    };
}

macro_rules! create_sportcast_error_result {
    ($kind:expr, $($arg:tt)*) => {
        Err($crate::sportcast_error::create_sportcast_error!($kind, $($arg)*))
    };
}

pub(crate) use create_sportcast_error;
pub(crate) use create_sportcast_error_result;
