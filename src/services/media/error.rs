use super::SessionId;

/// Errors that can occur during media operations
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// The platform refused access to its media sessions
    #[error("Permission to observe media sessions denied: {0}")]
    PermissionDenied(String),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// The session disappeared while it was being queried
    #[error("Session {0} is no longer available")]
    SessionUnavailable(SessionId),

    /// Failed to initialize the session source
    #[error("Failed to initialize media service: {0}")]
    InitializationFailed(String),

    /// Failed to control the session
    #[error("Failed to control session: {0}")]
    ControlFailed(String),
}

impl MediaError {
    /// Classify a bus connection failure.
    ///
    /// Access-denied replies and I/O permission errors become
    /// [`MediaError::PermissionDenied`]; everything else is an
    /// initialization failure.
    pub fn from_connection_error(error: zbus::Error) -> Self {
        if is_access_denied(&error) {
            Self::PermissionDenied(error.to_string())
        } else {
            Self::InitializationFailed(format!("D-Bus connection failed: {error}"))
        }
    }
}

fn is_access_denied(error: &zbus::Error) -> bool {
    match error {
        zbus::Error::FDO(fdo) => matches!(**fdo, zbus::fdo::Error::AccessDenied(_)),
        zbus::Error::MethodError(name, _, _) => {
            name.as_str() == "org.freedesktop.DBus.Error.AccessDenied"
        }
        zbus::Error::InputOutput(io) => io.kind() == std::io::ErrorKind::PermissionDenied,
        _ => false,
    }
}
