use thiserror::Error;

/// Error types for the click probe
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The OS declined to install the global pointer hook
    #[error("Failed to install pointer hook: {0}")]
    HookInstall(String),

    /// The COM runtime needed for accessibility queries could not start
    #[error("Failed to initialize COM runtime: {0}")]
    ComInit(String),

    /// Pointer capture is not available on this platform
    #[error("Pointer capture is only supported on Windows")]
    Unsupported,
}

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
