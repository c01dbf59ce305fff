use crate::alloc::AllocationError;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;


pub type CodecResult<T> = Result<T, CodecError>;


/// Failure of a builder, codec or assembler operation.
///
/// Every variant is terminal for the operation in progress.
/// Nothing is retried internally.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A required argument was missing or does not fit the operation,
    /// e.g. a record count larger than the record slice
    /// or a builder bound to a different datatype.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The builder can't accept the operation in its current state,
    /// typically because it was already finished.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    AllocationFailure(#[from] AllocationError),

    #[error("datatype mismatch: expected {expected}, but got {actual}")]
    DatatypeMismatch {
        expected: DataType,
        actual: DataType
    },

    #[error("offsets {start}..{end} are out of bounds of a child array with {len} elements")]
    OffsetOutOfBounds {
        start: usize,
        end: usize,
        len: usize
    },

    #[error("missing data: {0}")]
    MissingData(String),

    /// Failure of an arrow kernel used while decoding
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error("{location}: {source}")]
    Context {
        location: String,
        source: Box<CodecError>
    }
}


impl CodecError {
    pub fn datatype_mismatch(expected: DataType, actual: &DataType) -> Self {
        CodecError::DatatypeMismatch {
            expected,
            actual: actual.clone()
        }
    }

    pub fn builder_mismatch(expected: &str, actual: &DataType) -> Self {
        CodecError::InvalidArgument(format!(
            "expected {} builder, but got a builder of {}",
            expected,
            actual
        ))
    }

    /// The underlying error with all context layers stripped.
    pub fn root(&self) -> &CodecError {
        let mut err = self;
        while let CodecError::Context { source, .. } = err {
            err = source
        }
        err
    }

    pub fn is_allocation_failure(&self) -> bool {
        matches!(self.root(), CodecError::AllocationFailure(_))
    }
}


pub trait ResultExt<T> {
    fn with_context(self, location: impl Into<String>) -> CodecResult<T>;
}


impl <T> ResultExt<T> for CodecResult<T> {
    #[inline]
    fn with_context(self, location: impl Into<String>) -> CodecResult<T> {
        self.map_err(|err| CodecError::Context {
            location: location.into(),
            source: Box::new(err)
        })
    }
}


macro_rules! invalid_argument {
    ($($arg:tt)*) => {
        $crate::error::CodecError::InvalidArgument(format!($($arg)*))
    };
}
pub(crate) use invalid_argument;


macro_rules! invalid_state {
    ($($arg:tt)*) => {
        $crate::error::CodecError::InvalidState(format!($($arg)*))
    };
}
pub(crate) use invalid_state;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_strips_context() {
        let err: CodecResult<()> = Err(CodecError::MissingData("no rows".to_string()));
        let err = err
            .with_context("arrowlog.datatypes.Vec3D#x")
            .with_context("arrowlog.datatypes.Vec3D")
            .unwrap_err();

        assert!(matches!(err.root(), CodecError::MissingData(_)));
        assert_eq!(
            err.to_string(),
            "arrowlog.datatypes.Vec3D: arrowlog.datatypes.Vec3D#x: missing data: no rows"
        );
    }
}
