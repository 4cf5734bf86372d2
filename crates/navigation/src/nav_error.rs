// ---------------------------------------------------------------------------
// NavError: typed errors for graph configuration and navigation queries
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors surfaced by the navigation subsystem.
///
/// An element in an unknown zone is not an error; it is inert. These variants
/// cover conditions a caller has to react to.
#[derive(Debug)]
pub enum NavError {
    /// Reading or writing a configuration file failed.
    Io(std::io::Error),
    /// The reachability configuration is not valid JSON of the expected shape.
    Parse(String),
    /// The reachability graph was never initialized when a query needed it.
    GraphMissing,
    /// A zone name was empty where a real zone is required.
    EmptyZoneName,
    /// The named zone is not configured in the graph.
    UnknownZone(String),
    /// A zone with this name already exists.
    ZoneExists(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::Io(e) => write!(f, "I/O error: {e}"),
            NavError::Parse(msg) => write!(f, "Invalid reachability config: {msg}"),
            NavError::GraphMissing => {
                write!(f, "Invalid argument: reachability graph is not initialized")
            }
            NavError::EmptyZoneName => write!(f, "Zone name must not be empty"),
            NavError::UnknownZone(name) => write!(f, "Unknown zone: '{name}'"),
            NavError::ZoneExists(name) => write!(f, "Zone already exists: '{name}'"),
        }
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for NavError {
    fn from(e: std::io::Error) -> Self {
        NavError::Io(e)
    }
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        NavError::Parse(e.to_string())
    }
}
