//! Typed description of a stored routine as submitted by the routine editor.
//!
//! Keyword-valued fields keep unrecognized input as [`Checked::Unknown`], so that the compiler
//! can report it instead of losing it at the conversion boundary.

use std::str::FromStr;

use routinec_common::types::SqlType;
use smol_str::SmolStr;
use strum::{Display, EnumString, IntoStaticStr};

use crate::macros::base;

/// A keyword that either parsed into `T` or is kept verbatim.
#[apply(base)]
pub enum Checked<T> {
    Known(T),
    Unknown(SmolStr),
}

impl<T: FromStr> Checked<T> {
    pub fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(value) => Checked::Known(value),
            Err(_) => Checked::Unknown(raw.into()),
        }
    }
}

impl<T> Checked<T> {
    #[inline]
    pub fn known(&self) -> Option<&T> {
        match self {
            Checked::Known(value) => Some(value),
            Checked::Unknown(_) => None,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        matches!(self, Checked::Known(_))
    }
}

impl<T> From<T> for Checked<T> {
    #[inline]
    fn from(value: T) -> Self {
        Checked::Known(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RoutineKind {
    Procedure,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    In,
    Out,
    InOut,
}

impl Direction {
    /// Returns `true` if the routine writes a value back through the parameter.
    #[inline]
    pub fn is_output(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SecurityType {
    Definer,
    Invoker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum SqlDataAccess {
    #[strum(serialize = "CONTAINS SQL")]
    ContainsSql,
    #[strum(serialize = "NO SQL")]
    NoSql,
    #[strum(serialize = "READS SQL DATA")]
    ReadsSqlData,
    #[strum(serialize = "MODIFIES SQL DATA")]
    ModifiesSqlData,
}

#[apply(base)]
pub struct TypeSpec {
    pub base_type: Checked<SqlType>,
    /// `M`, `M,D`, or for ENUM/SET the quoted literal list.
    pub length: Option<SmolStr>,
    /// Modifiers such as `UNSIGNED ZEROFILL`, honored for numeric types only.
    pub numeric_options: Option<SmolStr>,
    /// Character set, honored for character types only.
    pub charset: Option<SmolStr>,
}

impl TypeSpec {
    pub fn new(base_type: impl Into<Checked<SqlType>>) -> Self {
        Self {
            base_type: base_type.into(),
            length: None,
            numeric_options: None,
            charset: None,
        }
    }

    pub fn with_length(mut self, length: impl Into<SmolStr>) -> Self {
        self.length = Some(length.into());
        self
    }

    pub fn with_numeric_options(mut self, options: impl Into<SmolStr>) -> Self {
        self.numeric_options = Some(options.into());
        self
    }

    pub fn with_charset(mut self, charset: impl Into<SmolStr>) -> Self {
        self.charset = Some(charset.into());
        self
    }
}

#[apply(base)]
pub struct ParameterSpec {
    /// Only meaningful for procedures.
    pub direction: Option<Checked<Direction>>,
    pub name: SmolStr,
    pub ty: TypeSpec,
}

impl ParameterSpec {
    pub fn new(name: impl Into<SmolStr>, ty: TypeSpec) -> Self {
        Self {
            direction: None,
            name: name.into(),
            ty,
        }
    }

    pub fn with_direction(mut self, direction: impl Into<Checked<Direction>>) -> Self {
        self.direction = Some(direction.into());
        self
    }
}

#[apply(base)]
pub struct RoutineSpec {
    pub name: SmolStr,
    pub kind: Checked<RoutineKind>,
    pub parameters: Vec<ParameterSpec>,
    /// Only meaningful for functions.
    pub return_type: Option<TypeSpec>,
    /// Expected as `user@host`.
    pub definer: Option<SmolStr>,
    pub is_deterministic: bool,
    pub security_type: Option<Checked<SecurityType>>,
    pub sql_data_access: Option<Checked<SqlDataAccess>>,
    pub comment: Option<String>,
    pub body: String,
}

impl RoutineSpec {
    pub fn new(kind: impl Into<Checked<RoutineKind>>, name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            parameters: Vec::new(),
            return_type: None,
            definer: None,
            is_deterministic: false,
            security_type: None,
            sql_data_access: None,
            comment: None,
            body: String::new(),
        }
    }

    #[inline]
    pub fn procedure(name: impl Into<SmolStr>) -> Self {
        Self::new(RoutineKind::Procedure, name)
    }

    #[inline]
    pub fn function(name: impl Into<SmolStr>) -> Self {
        Self::new(RoutineKind::Function, name)
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: TypeSpec) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_definer(mut self, definer: impl Into<SmolStr>) -> Self {
        self.definer = Some(definer.into());
        self
    }

    pub fn with_deterministic(mut self, is_deterministic: bool) -> Self {
        self.is_deterministic = is_deterministic;
        self
    }

    pub fn with_security_type(mut self, security_type: impl Into<Checked<SecurityType>>) -> Self {
        self.security_type = Some(security_type.into());
        self
    }

    pub fn with_sql_data_access(mut self, access: impl Into<Checked<SqlDataAccess>>) -> Self {
        self.sql_data_access = Some(access.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}
