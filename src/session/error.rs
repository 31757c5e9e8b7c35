use thiserror::Error;

/// Errors from running a plot session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The resolver thread could not be started
    #[error("Failed to spawn hover resolver thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// Writing to the rendering surface failed
    #[error("Surface error: {0}")]
    Surface(#[from] std::io::Error),

    /// The resolver thread exited while the session still needed it
    #[error("Hover resolver thread disconnected")]
    WorkerDisconnected,

    /// No result arrived in time
    #[error("Timed out waiting for a hover result")]
    Timeout,

    /// The session was stopped
    #[error("Session has been stopped")]
    Stopped,
}
