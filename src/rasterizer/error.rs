//! Error type for the rasterizer pipeline

use super::types::Primitive;

/// Convenience result type used across the rasterizer.
pub type RasterResult<T> = Result<T, RasterError>;

/// Which geometry list a handle or index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    Positions,
    Indices,
    Colors,
}

impl std::fmt::Display for BufferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BufferKind::Positions => "position",
            BufferKind::Indices => "index",
            BufferKind::Colors => "color",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// Width or height of zero
    #[error("invalid framebuffer dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Handle was never issued for this buffer kind
    #[error("unknown {kind} buffer handle {id}")]
    InvalidHandle { kind: BufferKind, id: u32 },

    /// Triangle references a vertex past the end of a position or color list
    #[error("triangle {triangle} references vertex {index}, but the {buffer} buffer holds {len}")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        len: usize,
        buffer: BufferKind,
    },

    #[error("primitive {0:?} is not supported")]
    UnsupportedPrimitive(Primitive),

    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RasterError {
    /// Build a [`RasterError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<ron::error::SpannedError> for RasterError {
    fn from(e: ron::error::SpannedError) -> Self {
        RasterError::config(format!("parse error: {}", e))
    }
}

impl From<ron::Error> for RasterError {
    fn from(e: ron::Error) -> Self {
        RasterError::config(format!("serialize error: {}", e))
    }
}
