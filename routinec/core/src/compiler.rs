//! Assembly of `CREATE PROCEDURE` and `CREATE FUNCTION` statements.
//!
//! The compiler never stops at the first problem. Every rejected field is recorded and replaced
//! by an empty substitution, so the statement is always produced, even when it is not valid SQL.
//! The surrounding whitespace of a rejected clause is kept, which may leave double spaces behind.

use routinec_common::error::{CompileErrors, Field, RoutineError};
use routinec_common::quote::{quote_identifier, quote_identifier_once, quote_string_literal};
use routinec_common::types::{SqlType, TypeClass};
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::config::CompilerConfig;
use crate::spec::{Checked, ParameterSpec, RoutineKind, RoutineSpec, TypeSpec};

/// The outcome of compiling a [`RoutineSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub statement: String,
    /// In the order the offending fields were processed.
    pub errors: Vec<RoutineError>,
}

impl Compiled {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the statement if it can be executed, or all errors otherwise.
    pub fn into_result(self) -> Result<String, CompileErrors> {
        if self.errors.is_empty() {
            Ok(self.statement)
        } else {
            Err(CompileErrors {
                statement: self.statement,
                errors: self.errors,
            })
        }
    }
}

/// Compiles `spec` with the default configuration.
pub fn compile(spec: &RoutineSpec) -> Compiled {
    Compiler::new(&CompilerConfig::default()).compile(spec)
}

#[derive(Debug)]
pub struct Compiler<'a> {
    config: &'a CompilerConfig,
    statement: String,
    errors: Vec<RoutineError>,
    // Direction and length problems are reported once per statement.
    warned_about_direction: bool,
    warned_about_length: bool,
}

impl<'a> Compiler<'a> {
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self {
            config,
            statement: String::new(),
            errors: Vec::new(),
            warned_about_direction: false,
            warned_about_length: false,
        }
    }

    pub fn compile(mut self, spec: &RoutineSpec) -> Compiled {
        self.push("CREATE ");
        self.compile_definer(spec.definer.as_deref());
        let kind = self.compile_kind(&spec.kind);
        self.compile_name(&spec.name);
        self.compile_parameters(kind, &spec.parameters);
        if kind == Some(RoutineKind::Function) {
            self.compile_return_type(spec.return_type.as_ref());
        }
        if let Some(comment) = spec.comment.as_deref().filter(|c| !c.is_empty()) {
            self.push("COMMENT ");
            self.push(&quote_string_literal(comment));
            self.push(" ");
        }
        if spec.is_deterministic {
            self.push("DETERMINISTIC ");
        } else {
            self.push("NOT DETERMINISTIC ");
        }
        // Unrecognized data access values are dropped without an error.
        if let Some(Checked::Known(access)) = &spec.sql_data_access {
            self.push((*access).into());
            self.push(" ");
        }
        if let Some(Checked::Known(security)) = &spec.security_type {
            self.push("SQL SECURITY ");
            self.push((*security).into());
            self.push(" ");
        }
        if spec.body.is_empty() {
            self.reject(RoutineError::MissingField(Field::Body));
        } else {
            self.push(&spec.body);
        }

        debug!(
            kind = ?spec.kind,
            parameters = spec.parameters.len(),
            errors = self.errors.len(),
            "compiled routine definition"
        );
        Compiled {
            statement: self.statement,
            errors: self.errors,
        }
    }

    #[inline]
    fn push(&mut self, text: &str) {
        self.statement.push_str(text);
    }

    fn reject(&mut self, error: RoutineError) {
        trace!(%error, "rejected routine field");
        self.errors.push(error);
    }

    fn recognized(&self, base_type: &Checked<SqlType>) -> Option<SqlType> {
        base_type
            .known()
            .copied()
            .filter(|ty| self.config.flavor.recognizes(*ty))
    }

    fn compile_definer(&mut self, definer: Option<&str>) {
        let Some(definer) = definer.filter(|d| !d.is_empty()) else {
            return;
        };
        match definer.split_once('@') {
            Some((user, host)) if !host.contains('@') => {
                self.push("DEFINER=");
                self.push(&quote_identifier_once(user));
                self.push("@");
                self.push(&quote_identifier_once(host));
                self.push(" ");
            }
            _ => self.reject(RoutineError::InvalidFormat {
                field: Field::Definer,
                value: definer.into(),
            }),
        }
    }

    fn compile_kind(&mut self, kind: &Checked<RoutineKind>) -> Option<RoutineKind> {
        match kind {
            Checked::Known(kind) => {
                self.push((*kind).into());
                self.push(" ");
                Some(*kind)
            }
            Checked::Unknown(raw) => {
                self.reject(RoutineError::InvalidEnumValue {
                    field: Field::Kind,
                    value: raw.clone(),
                });
                None
            }
        }
    }

    fn compile_name(&mut self, name: &str) {
        if name.is_empty() {
            self.reject(RoutineError::MissingField(Field::Name));
        } else {
            self.push(&quote_identifier(name));
        }
    }

    /// Rendering stops at the first parameter without a name or a recognized type.
    fn compile_parameters(&mut self, kind: Option<RoutineKind>, parameters: &[ParameterSpec]) {
        self.push("(");
        for (i, parameter) in parameters.iter().enumerate() {
            let base_type = match self.recognized(&parameter.ty.base_type) {
                Some(base_type) if !parameter.name.is_empty() => base_type,
                _ => {
                    self.reject(RoutineError::MissingField(Field::Parameter));
                    break;
                }
            };
            self.compile_parameter_head(kind, parameter, base_type);
            self.compile_type_options(&parameter.ty, Some(base_type), true);
            if i + 1 < parameters.len() {
                self.push(", ");
            }
        }
        self.push(") ");
    }

    /// Renders `[DIRECTION ]`name` TYPE`, or nothing if the direction is unusable.
    fn compile_parameter_head(
        &mut self,
        kind: Option<RoutineKind>,
        parameter: &ParameterSpec,
        base_type: SqlType,
    ) {
        match (kind, &parameter.direction) {
            (Some(RoutineKind::Procedure), Some(Checked::Known(direction))) => {
                self.push((*direction).into());
                self.push(" ");
            }
            (Some(RoutineKind::Function), _) => {}
            (None, _) => {
                if !self.warned_about_direction {
                    self.warned_about_direction = true;
                    self.reject(RoutineError::MissingField(Field::Parameter));
                }
                return;
            }
            (Some(RoutineKind::Procedure), direction) => {
                if !self.warned_about_direction {
                    self.warned_about_direction = true;
                    let value = match direction {
                        Some(Checked::Unknown(raw)) => raw.clone(),
                        _ => SmolStr::default(),
                    };
                    self.reject(RoutineError::InvalidEnumValue {
                        field: Field::Direction,
                        value,
                    });
                }
                return;
            }
        }
        self.push(&quote_identifier(&parameter.name));
        self.push(" ");
        self.push(base_type.as_str());
    }

    /// Renders `(length)`, the character set, and numeric modifiers following a type keyword.
    ///
    /// An unrecognized `base_type` still gets its length, but no type-specific options.
    fn compile_type_options(
        &mut self,
        ty: &TypeSpec,
        base_type: Option<SqlType>,
        is_parameter: bool,
    ) {
        let length = ty.length.as_deref().filter(|l| !l.is_empty());
        match (length, base_type) {
            (Some(length), base_type) if base_type.is_none_or(SqlType::accepts_length) => {
                self.push("(");
                self.push(length);
                self.push(")");
            }
            (None, Some(base_type)) if base_type.requires_length() => {
                if !self.warned_about_length {
                    self.warned_about_length = true;
                    self.reject(RoutineError::MissingRequiredOption(base_type));
                }
            }
            _ => {}
        }

        let Some(base_type) = base_type else {
            return;
        };
        if let Some(charset) = ty.charset.as_deref().filter(|c| !c.is_empty()) {
            let binary = is_parameter && base_type.is_binary_string();
            if base_type.class() == TypeClass::Char && !binary {
                self.push(" CHARSET ");
                self.push(&charset.to_lowercase());
            }
        }
        if let Some(options) = ty.numeric_options.as_deref().filter(|o| !o.is_empty()) {
            if base_type.class() == TypeClass::Number {
                self.push(" ");
                self.push(&options.to_uppercase());
            }
        }
    }

    /// Renders `RETURNS TYPE[(length)][ options] `; the type token is empty if unusable.
    fn compile_return_type(&mut self, return_type: Option<&TypeSpec>) {
        let base_type = return_type.and_then(|ty| self.recognized(&ty.base_type));
        match base_type {
            Some(base_type) => {
                self.push("RETURNS ");
                self.push(base_type.as_str());
            }
            None => {
                let value = match return_type.map(|ty| &ty.base_type) {
                    Some(Checked::Known(ty)) => SmolStr::new_static(ty.as_str()),
                    Some(Checked::Unknown(raw)) => raw.clone(),
                    None => SmolStr::default(),
                };
                self.reject(RoutineError::InvalidEnumValue {
                    field: Field::ReturnType,
                    value,
                });
            }
        }
        if let Some(ty) = return_type {
            self.compile_type_options(ty, base_type, false);
        }
        self.push(" ");
    }
}
