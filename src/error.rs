//! Transtip Error Types
//!
//! Centralized error handling for the translation workflows.

use thiserror::Error;

/// Central error type for Transtip
#[derive(Error, Debug)]
pub enum TransError {
    /// The external translation tool could not be started
    #[error("Failed to spawn translation tool '{program}': {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    Lock(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Transtip operations
pub type TransResult<T> = Result<T, TransError>;

/// Helper to convert Mutex poison errors
impl<T> From<std::sync::PoisonError<T>> for TransError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        TransError::Lock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_error_names_program() {
        let err = TransError::ProcessSpawn {
            program: "trans".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'trans'"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn test_poison_error_maps_to_lock() {
        let mutex = std::sync::Arc::new(std::sync::Mutex::new(0));
        let poisoner = mutex.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err: TransError = mutex.lock().unwrap_err().into();
        assert!(matches!(err, TransError::Lock(_)));
    }
}
