//! Error types for the Pht engine
//!
//! This module defines the error types used throughout the engine,
//! including scene construction, render queue building, and renderer
//! collaborator failures.

use std::fmt;

/// Result type for Pht engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pht engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Renderer collaborator error (resource creation, batching backend, etc.)
    BackendError(String),

    /// Invalid resource (stale scene object key, missing component, etc.)
    InvalidResource(String),

    /// Initialization failed (engine, scene manager, subsystems)
    InitializationFailed(String),

    /// An object was used before its `init` step (render queue, engine)
    NotInitialized(String),

    /// A fixed-size buffer was asked to hold more than it was sized for
    CapacityExceeded {
        /// Number of slots the buffer was sized for
        capacity: usize,
        /// Number of slots the operation needed
        required: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::NotInitialized(msg) => write!(f, "Not initialized: {}", msg),
            Error::CapacityExceeded { capacity, required } => write!(
                f,
                "Capacity exceeded: {} slots required, {} available",
                required, capacity
            ),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an `Error::BackendError`, logging it at ERROR severity with file:line.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("pht::Scene", "Unknown parent {:?}", key));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::pht::Engine::log_detailed(
            $crate::pht::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!(),
        );
        $crate::pht::Error::BackendError(message)
    }};
}

/// Log an error and return it from the enclosing function.
///
/// # Example
///
/// ```ignore
/// engine_bail!("pht::SceneManager", "Scene '{}' already exists", name);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
