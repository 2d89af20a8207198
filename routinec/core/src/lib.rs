#[macro_use(apply)]
extern crate macro_rules_attribute;

pub mod compiler;
pub mod config;
pub mod form;
mod macros;
pub mod spec;
pub mod statement;

pub use compiler::{Compiled, Compiler, compile};
pub use config::CompilerConfig;
pub use form::{FormData, FormValue};
pub use routinec_common as common;
pub use spec::{Checked, ParameterSpec, RoutineSpec, TypeSpec};
