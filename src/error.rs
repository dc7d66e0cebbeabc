use std::collections::TryReserveError;

use thiserror::Error;

use crate::stack::StackFull;

/// Classified failure of a single evaluation.
///
/// A well-formed, numerically defined expression yields `Ok(f64)`; every
/// other outcome is one of these three kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error)]
pub enum CalcError {
    /// Lexical or grammatical defect: empty input, dangling or doubled
    /// operators, unmatched or empty brackets, juxtaposed operands, trailing
    /// operator or an unrecognized character.
    #[error("invalid syntax")]
    InvalidSyntax,

    /// Well-formed but numerically undefined: division by zero, zero raised
    /// to a negative power.
    #[error("math error")]
    MathError,

    /// The evaluation-scoped stacks could not be obtained or overflowed.
    #[error("allocation failure")]
    AllocationFailure,
}

impl CalcError {
    /// Numeric status code: 0 is success, so errors start at 1.
    pub fn code(&self) -> i32 {
        match self {
            CalcError::MathError => 1,
            CalcError::InvalidSyntax => 2,
            CalcError::AllocationFailure => 3,
        }
    }
}

impl From<StackFull> for CalcError {
    fn from(_: StackFull) -> Self {
        CalcError::AllocationFailure
    }
}

impl From<TryReserveError> for CalcError {
    fn from(_: TryReserveError) -> Self {
        CalcError::AllocationFailure
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
