//! Error types for the labelmatch core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by an [`crate::AssignmentSolver`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum AssignmentError {
    /// A joint count was too large to be negated into a signed cost.
    #[error("count {count} cannot be represented as an assignment cost")]
    CostOverflow {
        /// The offending joint count.
        count: u128,
    },
    /// A cost-matrix row did not have the expected number of columns.
    #[error("cost matrix row {row} has {found} columns but {expected} were expected")]
    RaggedMatrix {
        /// Index of the malformed row.
        row: usize,
        /// Column count shared by the preceding rows.
        expected: usize,
        /// Column count of the malformed row.
        found: usize,
    },
    /// The solver returned a pair outside the matrix bounds.
    #[error("solver matched ({row}, {col}) outside a {rows}x{cols} cost matrix")]
    OutOfBounds {
        /// Row index reported by the solver.
        row: usize,
        /// Column index reported by the solver.
        col: usize,
        /// Number of rows in the cost matrix.
        rows: usize,
        /// Number of columns in the cost matrix.
        cols: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`AssignmentError`] variants.
    enum AssignmentErrorCode for AssignmentError {
        /// A joint count was too large to be negated into a signed cost.
        CostOverflow => CostOverflow { .. } => "ASSIGNMENT_COST_OVERFLOW",
        /// A cost-matrix row did not have the expected number of columns.
        RaggedMatrix => RaggedMatrix { .. } => "ASSIGNMENT_RAGGED_MATRIX",
        /// The solver returned a pair outside the matrix bounds.
        OutOfBounds => OutOfBounds { .. } => "ASSIGNMENT_OUT_OF_BOUNDS",
    }
}

/// Error type produced by the entropy, information and mapping APIs.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EvalError {
    /// The total observation or count mass was zero.
    #[error("{context} requires a non-zero total count")]
    EmptyInput {
        /// Operation that received the empty input.
        context: &'static str,
    },
    /// A sum of counts does not fit in `u128`.
    #[error("{context}: count total exceeds u128::MAX")]
    CountOverflow {
        /// Operation whose running total overflowed.
        context: &'static str,
    },
    /// Sampling weights were negative, non-finite, or otherwise unusable.
    #[error("{context}: invalid weights: {reason}")]
    InvalidWeights {
        /// Operation that rejected the weights.
        context: &'static str,
        /// Why the weights were rejected.
        reason: String,
    },
    /// KL divergence is undefined where the reference distribution is zero.
    #[error("KL divergence is undefined: q[{index}] is zero")]
    UndefinedDivergence {
        /// Position of the zero probability in `q`.
        index: usize,
    },
    /// Two distributions that must be aligned had different lengths.
    #[error("distribution length mismatch: left={left}, right={right}")]
    LengthMismatch {
        /// Length of the left-hand distribution.
        left: usize,
        /// Length of the right-hand distribution.
        right: usize,
    },
    /// The optimal-assignment step failed.
    #[error("optimal assignment failed: {error}")]
    Assignment {
        #[source]
        /// Underlying solver error.
        error: AssignmentError,
    },
}

define_error_codes! {
    /// Stable codes describing [`EvalError`] variants.
    enum EvalErrorCode for EvalError {
        /// The total observation or count mass was zero.
        EmptyInput => EmptyInput { .. } => "EVAL_EMPTY_INPUT",
        /// A sum of counts does not fit in `u128`.
        CountOverflow => CountOverflow { .. } => "EVAL_COUNT_OVERFLOW",
        /// Sampling weights were negative, non-finite, or otherwise unusable.
        InvalidWeights => InvalidWeights { .. } => "EVAL_INVALID_WEIGHTS",
        /// KL divergence is undefined where the reference distribution is zero.
        UndefinedDivergence => UndefinedDivergence { .. } => "EVAL_UNDEFINED_DIVERGENCE",
        /// Two distributions that must be aligned had different lengths.
        LengthMismatch => LengthMismatch { .. } => "EVAL_LENGTH_MISMATCH",
        /// The optimal-assignment step failed.
        AssignmentFailure => Assignment { .. } => "EVAL_ASSIGNMENT_FAILURE",
    }
}

impl EvalError {
    /// Retrieve the inner [`AssignmentErrorCode`] when the error originated in
    /// an [`crate::AssignmentSolver`].
    #[must_use]
    pub const fn assignment_code(&self) -> Option<AssignmentErrorCode> {
        match self {
            Self::Assignment { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<AssignmentError> for EvalError {
    fn from(error: AssignmentError) -> Self {
        Self::Assignment { error }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, EvalError>;
