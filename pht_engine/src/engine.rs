/// Pht Engine - Singleton manager for engine subsystems
///
/// This module provides global singleton management for the scene manager
/// and the logger. It uses thread-safe static storage with RwLock for safe
/// concurrent access.

use std::sync::{OnceLock, RwLock, Arc, Mutex};
use std::time::SystemTime;
use crate::renderer::Renderer;
use crate::scene::SceneManager;
use crate::error::{Result, Error};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global engine state storage
static ENGINE_STATE: OnceLock<EngineState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Internal state structure holding all engine singletons
struct EngineState {
    /// Scene manager singleton (wrapped in Mutex for thread-safe mutable access)
    scene_manager: RwLock<Option<Arc<Mutex<SceneManager>>>>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            scene_manager: RwLock::new(None),
        }
    }
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Main engine singleton manager
///
/// Manages the lifecycle of the scene manager and the logger using a
/// singleton pattern with thread-safe access.
///
/// # Example
///
/// ```no_run
/// use pht_engine::pht::Engine;
/// # fn run<R: pht_engine::pht::render::Renderer + 'static>(backend: impl FnOnce() -> R) -> pht_engine::pht::Result<()> {
///
/// Engine::initialize()?;
/// Engine::create_scene_manager(backend())?;
///
/// let sm = Engine::scene_manager()?;
/// // sm.lock().unwrap().create_scene(...)
///
/// Engine::destroy_scene_manager()?;
/// Engine::shutdown();
/// # Ok(())
/// # }
/// ```
pub struct Engine;

impl Engine {
    /// Log an error before handing it back to the caller
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::InitializationFailed(msg) => {
                crate::engine_error!("pht::Engine", "Initialization failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("pht::Engine", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("pht::Engine", "Engine error: {}", error);
            }
        }
        error
    }

    fn state() -> Result<&'static EngineState> {
        ENGINE_STATE.get().ok_or_else(|| Self::log_and_return_error(
            Error::InitializationFailed("Engine not initialized. Call Engine::initialize() first.".to_string())
        ))
    }

    /// Initialize the engine
    ///
    /// Must be called once at application startup before creating any
    /// subsystem. Calling it again is harmless.
    pub fn initialize() -> Result<()> {
        ENGINE_STATE.get_or_init(EngineState::new);
        Ok(())
    }

    /// Shutdown the engine and destroy all singletons
    ///
    /// Scenes (and every object they own) are dropped with the scene manager.
    pub fn shutdown() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut sm) = state.scene_manager.write() {
                *sm = None;
            }
        }
    }

    // ===== SCENE MANAGER API =====

    /// Create and register the scene manager singleton
    ///
    /// The renderer is wrapped in `Arc<Mutex<..>>` and shared by every scene
    /// the manager creates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - A scene manager already exists
    pub fn create_scene_manager<R: Renderer + 'static>(renderer: R) -> Result<()> {
        let renderer: Arc<Mutex<dyn Renderer>> = Arc::new(Mutex::new(renderer));
        Self::register_scene_manager(SceneManager::new(renderer))?;

        crate::engine_info!("pht::Engine", "SceneManager singleton created successfully");
        Ok(())
    }

    /// Register a scene manager built around an existing shared renderer
    pub(crate) fn register_scene_manager(scene_manager: SceneManager) -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.scene_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        if lock.is_some() {
            return Err(Self::log_and_return_error(
                Error::InitializationFailed("SceneManager already exists. Call Engine::destroy_scene_manager() first.".to_string())
            ));
        }

        *lock = Some(Arc::new(Mutex::new(scene_manager)));
        Ok(())
    }

    /// Get the scene manager singleton
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The engine is not initialized
    /// - The scene manager has not been created
    pub fn scene_manager() -> Result<Arc<Mutex<SceneManager>>> {
        let state = Self::state()?;

        let lock = state.scene_manager.read()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        lock.clone()
            .ok_or_else(|| Self::log_and_return_error(
                Error::InitializationFailed("SceneManager not created. Call Engine::create_scene_manager() first.".to_string())
            ))
    }

    /// Destroy the scene manager singleton
    ///
    /// Existing `Arc` handles stay valid until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine is not initialized
    pub fn destroy_scene_manager() -> Result<()> {
        let state = Self::state()?;

        let mut lock = state.scene_manager.write()
            .map_err(|_| Self::log_and_return_error(
                Error::BackendError("SceneManager lock poisoned".to_string())
            ))?;

        *lock = None;

        crate::engine_info!("pht::Engine", "SceneManager singleton destroyed");
        Ok(())
    }

    /// Reset all singletons for testing (only available in test builds)
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state) = ENGINE_STATE.get() {
            if let Ok(mut sm) = state.scene_manager.write() {
                *sm = None;
            }
        }
    }

    // ===== LOGGING API =====

    /// Set a custom logger
    ///
    /// Replace the default logger with a custom implementation (file
    /// logger, in-game console, etc.)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pht_engine::pht::{Engine, log::{Logger, LogEntry}};
    ///
    /// struct FileLogger;
    /// impl Logger for FileLogger {
    ///     fn log(&self, entry: &LogEntry) {
    ///         // Write to file...
    ///     }
    /// }
    ///
    /// Engine::set_logger(FileLogger);
    /// ```
    pub fn set_logger<L: Logger + 'static>(logger_impl: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(logger_impl);
        }
    }

    /// Reset logger to the default console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_info!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by the engine_error! and engine_err! macros.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
