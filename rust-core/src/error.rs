//! Error type shared by the transform, CQT and analysis layers
//!
//! Typed APIs return [`Result`]; the flat boolean interface collapses
//! these errors to `false` after logging them.

use thiserror::Error;

/// Failure category, one per class of rejected call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad size, non-positive parameter or missing buffer
    InvalidArgument,

    /// Engine not initialized, or held state does not match the request
    StateMismatch,

    /// An internal table could not be allocated
    Allocation,

    /// A nested transform failed while building kernels
    Cascading,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("Transform size {0} is not a power of two")]
    InvalidSize(usize),

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("Missing buffer `{0}`")]
    MissingBuffer(&'static str),

    #[error("Buffer `{name}` has length {got}, expected {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Transform state is not initialized")]
    NotInitialized,

    #[error("Transform initialized for size {initialized}, requested {requested}")]
    SizeMismatch { initialized: usize, requested: usize },

    #[error("CQT kernels have not been built")]
    KernelsNotBuilt,

    #[error("CQT kernels built for size {built}, requested {requested}")]
    KernelSizeMismatch { built: usize, requested: usize },

    #[error("Requested {requested} CQT bins but only {available} kernels are built")]
    BinCountExceeded { requested: usize, available: usize },

    #[error("Failed to allocate {0} elements")]
    Allocation(usize),

    #[error("Kernel bank shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Transform of kernel for bin {bin} failed: {source}")]
    KernelTransform {
        bin: usize,
        #[source]
        source: Box<TransformError>,
    },
}

impl TransformError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::InvalidSize(_)
            | TransformError::InvalidParameter { .. }
            | TransformError::MissingBuffer(_)
            | TransformError::LengthMismatch { .. } => ErrorKind::InvalidArgument,
            TransformError::NotInitialized
            | TransformError::SizeMismatch { .. }
            | TransformError::KernelsNotBuilt
            | TransformError::KernelSizeMismatch { .. }
            | TransformError::BinCountExceeded { .. } => ErrorKind::StateMismatch,
            TransformError::Allocation(_) | TransformError::Shape(_) => ErrorKind::Allocation,
            TransformError::KernelTransform { .. } => ErrorKind::Cascading,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Allocate a zero-filled buffer, reporting failure instead of aborting
pub(crate) fn try_zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| TransformError::Allocation(len))?;
    buffer.resize(len, T::default());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TransformError::InvalidSize(3).kind(), ErrorKind::InvalidArgument);
        assert_eq!(TransformError::NotInitialized.kind(), ErrorKind::StateMismatch);
        assert_eq!(TransformError::Allocation(8).kind(), ErrorKind::Allocation);

        let cascaded = TransformError::KernelTransform {
            bin: 2,
            source: Box::new(TransformError::NotInitialized),
        };
        assert_eq!(cascaded.kind(), ErrorKind::Cascading);
        assert!(cascaded.to_string().contains("bin 2"));
    }

    #[test]
    fn test_try_zeroed() {
        let buffer: Vec<f32> = try_zeroed(16).unwrap();
        assert_eq!(buffer.len(), 16);
        assert!(buffer.iter().all(|&x| x == 0.0));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_try_zeroed_overflow() {
        let result = try_zeroed::<f32>(usize::MAX / 2);
        assert_eq!(result, Err(TransformError::Allocation(usize::MAX / 2)));
    }
}
