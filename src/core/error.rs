//! Error types for the hook

pub type Result<T> = std::result::Result<T, HookError>;

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Sink unreachable or not ready at construction time
    #[error("Sink '{sink}' not ready: {message}")]
    SinkNotReady { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Host name could not be resolved (syslog encoding)
    #[error("Failed to resolve host name: {0}")]
    Hostname(#[from] std::io::Error),

    /// HTTP transport error
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote write rejected by the backend
    #[error("Write rejected by {sink} ({status}): {body}")]
    WriteRejected {
        sink: String,
        status: u16,
        body: String,
    },

    /// Sink error (generic)
    #[error("Sink error: {0}")]
    SinkError(String),
}

impl HookError {
    /// Create a sink-not-ready error
    pub fn not_ready(sink: impl Into<String>, message: impl Into<String>) -> Self {
        HookError::SinkNotReady {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        HookError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a rejected-write error
    pub fn rejected(sink: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        HookError::WriteRejected {
            sink: sink.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a sink error (generic)
    pub fn sink<S: Into<String>>(msg: S) -> Self {
        HookError::SinkError(msg.into())
    }
}
