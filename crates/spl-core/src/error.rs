//! Error types for the SPL compiler.
//!
//! Every phase fails fast: the first error aborts the pipeline and is
//! returned unchanged to the caller. Each variant carries the position of the
//! offending node and maps to a stable [`ErrorCode`] so callers can tell
//! failure categories apart programmatically.
//!
//! ## Error Categories
//!
//! ```text
//! SplError
//! ├── declaration  101-107  redeclarations, undefined/not-a type, array value params
//! ├── statement    108-117  assignments, conditions, calls
//! ├── expression   118-124  operators, variables, indexing
//! ├── entry point  125-127  main procedure checks
//! ├── storage      128-129  types and frames too large to address
//! └── codegen      140, 199 register overflow, internal invariants
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::{Identifier, Span};

/// Stable numeric code for each error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum ErrorCode {
    UndefinedType = 101,
    NotAType = 102,
    RedeclarationAsType = 103,
    MustBeAReferenceParameter = 104,
    RedeclarationAsProcedure = 105,
    RedeclarationAsParameter = 106,
    RedeclarationAsVariable = 107,
    AssignmentHasDifferentTypes = 108,
    AssignmentRequiresIntegers = 109,
    IfConditionMustBeBoolean = 110,
    WhileConditionMustBeBoolean = 111,
    UndefinedProcedure = 112,
    CallOfNonProcedure = 113,
    ArgumentTypeMismatch = 114,
    ArgumentMustBeAVariable = 115,
    TooFewArguments = 116,
    TooManyArguments = 117,
    OperatorDifferentTypes = 118,
    ComparisonNonInteger = 119,
    ArithmeticOperatorNonInteger = 120,
    UndefinedVariable = 121,
    NotAVariable = 122,
    IndexingNonArray = 123,
    IndexingWithNonInteger = 124,
    MainIsMissing = 125,
    MainIsNotAProcedure = 126,
    MainMustNotHaveParameters = 127,
    TypeTooLarge = 128,
    FrameTooLarge = 129,
    RegisterOverflow = 140,
    Internal = 199,
}

/// Errors raised by the scope resolver, body checker and code generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplError {
    // ========================================================================
    // Declarations
    // ========================================================================
    #[error("{span}: undefined type '{name}'")]
    UndefinedType { name: Identifier, span: Span },

    #[error("{span}: '{name}' is not a type")]
    NotAType { name: Identifier, span: Span },

    #[error("{span}: redeclaration of '{name}' as type")]
    RedeclarationAsType { name: Identifier, span: Span },

    /// A non-reference parameter was declared with an array type.
    #[error("{span}: parameter '{name}' must be a reference parameter")]
    MustBeAReferenceParameter { name: Identifier, span: Span },

    #[error("{span}: redeclaration of '{name}' as procedure")]
    RedeclarationAsProcedure { name: Identifier, span: Span },

    #[error("{span}: redeclaration of '{name}' as parameter")]
    RedeclarationAsParameter { name: Identifier, span: Span },

    #[error("{span}: redeclaration of '{name}' as variable")]
    RedeclarationAsVariable { name: Identifier, span: Span },

    // ========================================================================
    // Statements
    // ========================================================================
    #[error("{span}: assignment has different types")]
    AssignmentHasDifferentTypes { span: Span },

    #[error("{span}: assignment requires integer variable")]
    AssignmentRequiresIntegers { span: Span },

    #[error("{span}: 'if' test expression must be of type boolean")]
    IfConditionMustBeBoolean { span: Span },

    #[error("{span}: 'while' test expression must be of type boolean")]
    WhileConditionMustBeBoolean { span: Span },

    #[error("{span}: undefined procedure '{name}'")]
    UndefinedProcedure { name: Identifier, span: Span },

    #[error("{span}: call of non-procedure '{name}'")]
    CallOfNonProcedure { name: Identifier, span: Span },

    /// `argument` is the 1-based position of the offending argument.
    #[error("{span}: argument {argument} of call to '{procedure}' has the wrong type")]
    ArgumentTypeMismatch {
        procedure: Identifier,
        argument: usize,
        span: Span,
    },

    /// `argument` is the 1-based position of the offending argument.
    #[error("{span}: argument {argument} of call to '{procedure}' must be a variable")]
    ArgumentMustBeAVariable {
        procedure: Identifier,
        argument: usize,
        span: Span,
    },

    #[error("{span}: too few arguments for procedure '{procedure}'")]
    TooFewArguments { procedure: Identifier, span: Span },

    #[error("{span}: too many arguments for procedure '{procedure}'")]
    TooManyArguments { procedure: Identifier, span: Span },

    // ========================================================================
    // Expressions
    // ========================================================================
    #[error("{span}: expression combines different types")]
    OperatorDifferentTypes { span: Span },

    #[error("{span}: comparison requires integer operands")]
    ComparisonNonInteger { span: Span },

    #[error("{span}: arithmetic operation requires integer operands")]
    ArithmeticOperatorNonInteger { span: Span },

    #[error("{span}: undefined variable '{name}'")]
    UndefinedVariable { name: Identifier, span: Span },

    #[error("{span}: '{name}' is not a variable")]
    NotAVariable { name: Identifier, span: Span },

    #[error("{span}: illegal indexing a non-array")]
    IndexingNonArray { span: Span },

    #[error("{span}: illegal indexing with a non-integer")]
    IndexingWithNonInteger { span: Span },

    // ========================================================================
    // Entry point
    // ========================================================================
    #[error("{span}: procedure 'main' is missing")]
    MainIsMissing { span: Span },

    #[error("{span}: 'main' is not a procedure")]
    MainIsNotAProcedure { span: Span },

    #[error("{span}: procedure 'main' must not have any parameters")]
    MainMustNotHaveParameters { span: Span },

    // ========================================================================
    // Storage
    // ========================================================================
    /// An array type whose values would not fit in `u32` bytes.
    #[error("{span}: array type is too large")]
    TypeTooLarge { span: Span },

    /// Offsets in the frame of `procedure` would not fit in an `i32`.
    #[error("{span}: stack frame of procedure '{procedure}' is too large")]
    FrameTooLarge { procedure: Identifier, span: Span },

    // ========================================================================
    // Code generation
    // ========================================================================
    #[error("{span}: expression too complicated, running out of registers")]
    RegisterOverflow { span: Span },

    /// An invariant an earlier phase guarantees did not hold.
    #[error("{span}: internal compiler error: {message}")]
    Internal { message: String, span: Span },
}

impl SplError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            SplError::UndefinedType { span, .. }
            | SplError::NotAType { span, .. }
            | SplError::RedeclarationAsType { span, .. }
            | SplError::MustBeAReferenceParameter { span, .. }
            | SplError::RedeclarationAsProcedure { span, .. }
            | SplError::RedeclarationAsParameter { span, .. }
            | SplError::RedeclarationAsVariable { span, .. }
            | SplError::AssignmentHasDifferentTypes { span }
            | SplError::AssignmentRequiresIntegers { span }
            | SplError::IfConditionMustBeBoolean { span }
            | SplError::WhileConditionMustBeBoolean { span }
            | SplError::UndefinedProcedure { span, .. }
            | SplError::CallOfNonProcedure { span, .. }
            | SplError::ArgumentTypeMismatch { span, .. }
            | SplError::ArgumentMustBeAVariable { span, .. }
            | SplError::TooFewArguments { span, .. }
            | SplError::TooManyArguments { span, .. }
            | SplError::OperatorDifferentTypes { span }
            | SplError::ComparisonNonInteger { span }
            | SplError::ArithmeticOperatorNonInteger { span }
            | SplError::UndefinedVariable { span, .. }
            | SplError::NotAVariable { span, .. }
            | SplError::IndexingNonArray { span }
            | SplError::IndexingWithNonInteger { span }
            | SplError::MainIsMissing { span }
            | SplError::MainIsNotAProcedure { span }
            | SplError::MainMustNotHaveParameters { span }
            | SplError::TypeTooLarge { span }
            | SplError::FrameTooLarge { span, .. }
            | SplError::RegisterOverflow { span }
            | SplError::Internal { span, .. } => *span,
        }
    }

    /// Get the stable code for this error kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            SplError::UndefinedType { .. } => ErrorCode::UndefinedType,
            SplError::NotAType { .. } => ErrorCode::NotAType,
            SplError::RedeclarationAsType { .. } => ErrorCode::RedeclarationAsType,
            SplError::MustBeAReferenceParameter { .. } => ErrorCode::MustBeAReferenceParameter,
            SplError::RedeclarationAsProcedure { .. } => ErrorCode::RedeclarationAsProcedure,
            SplError::RedeclarationAsParameter { .. } => ErrorCode::RedeclarationAsParameter,
            SplError::RedeclarationAsVariable { .. } => ErrorCode::RedeclarationAsVariable,
            SplError::AssignmentHasDifferentTypes { .. } => ErrorCode::AssignmentHasDifferentTypes,
            SplError::AssignmentRequiresIntegers { .. } => ErrorCode::AssignmentRequiresIntegers,
            SplError::IfConditionMustBeBoolean { .. } => ErrorCode::IfConditionMustBeBoolean,
            SplError::WhileConditionMustBeBoolean { .. } => ErrorCode::WhileConditionMustBeBoolean,
            SplError::UndefinedProcedure { .. } => ErrorCode::UndefinedProcedure,
            SplError::CallOfNonProcedure { .. } => ErrorCode::CallOfNonProcedure,
            SplError::ArgumentTypeMismatch { .. } => ErrorCode::ArgumentTypeMismatch,
            SplError::ArgumentMustBeAVariable { .. } => ErrorCode::ArgumentMustBeAVariable,
            SplError::TooFewArguments { .. } => ErrorCode::TooFewArguments,
            SplError::TooManyArguments { .. } => ErrorCode::TooManyArguments,
            SplError::OperatorDifferentTypes { .. } => ErrorCode::OperatorDifferentTypes,
            SplError::ComparisonNonInteger { .. } => ErrorCode::ComparisonNonInteger,
            SplError::ArithmeticOperatorNonInteger { .. } => {
                ErrorCode::ArithmeticOperatorNonInteger
            }
            SplError::UndefinedVariable { .. } => ErrorCode::UndefinedVariable,
            SplError::NotAVariable { .. } => ErrorCode::NotAVariable,
            SplError::IndexingNonArray { .. } => ErrorCode::IndexingNonArray,
            SplError::IndexingWithNonInteger { .. } => ErrorCode::IndexingWithNonInteger,
            SplError::MainIsMissing { .. } => ErrorCode::MainIsMissing,
            SplError::MainIsNotAProcedure { .. } => ErrorCode::MainIsNotAProcedure,
            SplError::MainMustNotHaveParameters { .. } => ErrorCode::MainMustNotHaveParameters,
            SplError::TypeTooLarge { .. } => ErrorCode::TypeTooLarge,
            SplError::FrameTooLarge { .. } => ErrorCode::FrameTooLarge,
            SplError::RegisterOverflow { .. } => ErrorCode::RegisterOverflow,
            SplError::Internal { .. } => ErrorCode::Internal,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        i32::from(u16::from(self.code()))
    }

    /// Shorthand for an [`SplError::Internal`] error.
    pub fn internal(message: impl Into<String>, span: Span) -> Self {
        SplError::Internal {
            message: message.into(),
            span,
        }
    }
}
