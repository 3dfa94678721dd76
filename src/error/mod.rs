//! Error types for compilation and validation failures.
//!
//! Two failure classes never mix: [`CompileError`] aborts building a schema,
//! while [`ResultError`]s accumulate in the result of validating a document.
//! [`CustomKeywordError`] and [`ErrorDetails`] are what custom keyword
//! handlers hand back before the validator locates them.

mod compile_error;
mod keyword_error;
mod result_error;

pub use compile_error::{CompileError, DeclarationError};
pub use keyword_error::{CustomKeywordError, ErrorDetails};
pub use result_error::{ResultError, ResultErrors};
