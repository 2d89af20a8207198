use itertools::Itertools;
use miette::Diagnostic;
use smol_str::SmolStr;
use strum::Display;
use thiserror::Error;

use crate::types::SqlType;

/// The part of a routine definition a [`RoutineError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Field {
    #[strum(to_string = "routine name")]
    Name,
    #[strum(to_string = "routine type")]
    Kind,
    #[strum(to_string = "definer")]
    Definer,
    #[strum(to_string = "name and type for each routine parameter")]
    Parameter,
    #[strum(to_string = "parameter direction")]
    Direction,
    #[strum(to_string = "return type")]
    ReturnType,
    #[strum(to_string = "routine definition")]
    Body,
}

/// A problem found while compiling a routine definition.
///
/// These are never raised: the compiler collects them next to the best-effort statement.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum RoutineError {
    #[error("you must provide a {0}")]
    #[diagnostic(code(routine::missing_field))]
    MissingField(Field),

    #[error("invalid {field}: \"{value}\"")]
    #[diagnostic(code(routine::invalid_value))]
    InvalidEnumValue { field: Field, value: SmolStr },

    #[error("invalid {field} format: \"{value}\"")]
    #[diagnostic(
        code(routine::invalid_format),
        help("the definer must be in the \"username@hostname\" format")
    )]
    InvalidFormat { field: Field, value: SmolStr },

    #[error("missing length/values for parameter of type {0}")]
    #[diagnostic(
        code(routine::missing_option),
        help("ENUM, SET, VARCHAR and VARBINARY require length/values")
    )]
    MissingRequiredOption(SqlType),
}

impl RoutineError {
    #[inline]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingField(field)
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidFormat { field, .. } => Some(*field),
            Self::MissingRequiredOption(_) => None,
        }
    }
}

/// All problems of a rejected routine definition, reported as one diagnostic.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error(
    "routine definition has {} error(s): {}",
    .errors.len(),
    .errors.iter().map(|e| e.to_string()).join("; ")
)]
pub struct CompileErrors {
    /// The statement as far as it could be assembled.
    pub statement: String,
    #[related]
    pub errors: Vec<RoutineError>,
}
