//! Statements issued around a routine definition: dropping it before an edit, and calling it.

use std::collections::HashMap;

use itertools::Itertools;
use routinec_common::error::{Field, RoutineError};
use routinec_common::quote::{quote_identifier, quote_value_literal};

use crate::spec::{Checked, RoutineKind, RoutineSpec};

/// `DROP <KIND> IF EXISTS `name`;`
pub fn drop_statement(kind: RoutineKind, name: &str) -> String {
    format!("DROP {kind} IF EXISTS {};", quote_identifier(name))
}

/// A value supplied for a routine parameter when executing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Single(String),
    /// The selected members of a SET parameter.
    Multiple(Vec<String>),
}

impl Argument {
    fn to_literal(&self) -> String {
        match self {
            Argument::Single(value) => quote_value_literal(value),
            Argument::Multiple(values) => quote_value_literal(&values.iter().join(",")),
        }
    }
}

impl From<&str> for Argument {
    fn from(value: &str) -> Self {
        Argument::Single(value.to_owned())
    }
}

/// Builds the statements that execute `spec` with the given arguments, keyed by parameter name.
///
/// Parameter `i` is bound to the session variable `@p{i}`. Parameters without an argument are
/// still passed, and keep whatever the variable held before. For procedures, OUT and INOUT
/// parameters are selected back after the call.
pub fn invocation_statements(
    spec: &RoutineSpec,
    arguments: &HashMap<String, Argument>,
) -> Result<Vec<String>, RoutineError> {
    let kind = match &spec.kind {
        Checked::Known(kind) => *kind,
        Checked::Unknown(raw) => {
            return Err(RoutineError::InvalidEnumValue {
                field: Field::Kind,
                value: raw.clone(),
            });
        }
    };
    let mut statements = Vec::new();
    let mut variables = Vec::with_capacity(spec.parameters.len());
    let mut outputs = Vec::new();

    for (i, parameter) in spec.parameters.iter().enumerate() {
        let variable = format!("@p{i}");
        if let Some(argument) = arguments.get(parameter.name.as_str()) {
            statements.push(format!("SET {variable}={};", argument.to_literal()));
        }
        if kind == RoutineKind::Procedure
            && matches!(&parameter.direction, Some(Checked::Known(d)) if d.is_output())
        {
            outputs.push(format!(
                "{variable} AS {}",
                quote_identifier(&parameter.name)
            ));
        }
        variables.push(variable);
    }

    let name = quote_identifier(&spec.name);
    let variables = variables.iter().join(", ");
    match kind {
        RoutineKind::Procedure => {
            statements.push(format!("CALL {name}({variables});"));
            if !outputs.is_empty() {
                statements.push(format!("SELECT {};", outputs.iter().join(", ")));
            }
        }
        RoutineKind::Function => {
            statements.push(format!("SELECT {name}({variables}) AS {name};"));
        }
    }
    Ok(statements)
}
