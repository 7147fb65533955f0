//! Structural validation of layout contracts. Findings are advisory: the
//! validator never fails and never touches the document.

mod diagnostic;
mod rules;
mod validator;

pub use diagnostic::{Diagnostic, DiagnosticLevel, ValidationReport};
pub use rules::{RuleRegistry, ValidationRule};
pub use validator::{validate, validate_with, ValidateOptions, MAX_DEPTH};
