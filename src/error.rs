// Error type for the fallible edges: the window, snapshots and configuration.
// Geometry and painting never fail; their guard conditions are silent no-ops.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the window failed
    #[error("window init error: {0}")]
    WindowInit(String),
    /// Updating the window buffer failed
    #[error("window update error: {0}")]
    WindowUpdate(String),
    /// Encoding or writing a PNG snapshot failed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),
    /// A configuration value is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
