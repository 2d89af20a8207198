//! Conversion of a raw routine editor submission into a [`RoutineSpec`].

use std::collections::HashMap;

use serde::Deserialize;
use smol_str::SmolStr;

use crate::spec::{Checked, ParameterSpec, RoutineKind, RoutineSpec, TypeSpec};

pub const ITEM_NAME: &str = "item_name";
pub const ITEM_ORIGINAL_NAME: &str = "item_original_name";
pub const ITEM_ORIGINAL_TYPE: &str = "item_original_type";
pub const ITEM_TYPE: &str = "item_type";
pub const ITEM_DEFINER: &str = "item_definer";
pub const ITEM_COMMENT: &str = "item_comment";
pub const ITEM_DEFINITION: &str = "item_definition";
pub const ITEM_IS_DETERMINISTIC: &str = "item_isdeterministic";
pub const ITEM_SECURITY_TYPE: &str = "item_securitytype";
pub const ITEM_SQL_DATA_ACCESS: &str = "item_sqldataaccess";
pub const ITEM_RETURN_TYPE: &str = "item_returntype";
pub const ITEM_RETURN_LENGTH: &str = "item_returnlength";
pub const ITEM_RETURN_OPTS_NUM: &str = "item_returnopts_num";
pub const ITEM_RETURN_OPTS_TEXT: &str = "item_returnopts_text";
pub const ITEM_PARAM_DIR: &str = "item_param_dir";
pub const ITEM_PARAM_NAME: &str = "item_param_name";
pub const ITEM_PARAM_TYPE: &str = "item_param_type";
pub const ITEM_PARAM_LENGTH: &str = "item_param_length";
pub const ITEM_PARAM_OPTS_NUM: &str = "item_param_opts_num";
pub const ITEM_PARAM_OPTS_TEXT: &str = "item_param_opts_text";

/// A single submitted field.
///
/// Anything that is neither a string nor a list of strings is kept as [`FormValue::Other`] and
/// reads as absent, except for presence checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Scalar(String),
    List(Vec<String>),
    Other(serde_json::Value),
}

/// The flat field map of a routine editor submission.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormData(HashMap<String, FormValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_scalar(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), FormValue::Scalar(value.into()));
        self
    }

    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.0.insert(key.into(), FormValue::List(values));
        self
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the scalar value of `key`, or an empty string.
    pub fn scalar(&self, key: &str) -> &str {
        match self.0.get(key) {
            Some(FormValue::Scalar(value)) => value,
            _ => "",
        }
    }

    /// Returns the list value of `key` if it holds at least one entry.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(FormValue::List(values)) if !values.is_empty() => Some(values),
            _ => None,
        }
    }

    /// Kind and name of the routine being edited, falling back to the submitted ones.
    pub fn original_routine(&self) -> (Checked<RoutineKind>, SmolStr) {
        let or_current = |original: &str, current: &str| {
            let value = self.scalar(original);
            if value.is_empty() {
                self.scalar(current)
            } else {
                value
            }
        };
        (
            Checked::parse(or_current(ITEM_ORIGINAL_TYPE, ITEM_TYPE)),
            or_current(ITEM_ORIGINAL_NAME, ITEM_NAME).into(),
        )
    }

    fn list_entry(&self, key: &str, index: usize) -> &str {
        self.list(key)
            .and_then(|values| values.get(index))
            .map_or("", String::as_str)
    }
}

fn non_empty(value: &str) -> Option<SmolStr> {
    (!value.is_empty()).then(|| value.into())
}

impl RoutineSpec {
    /// Builds a routine description from a routine editor submission.
    ///
    /// This never fails: missing fields become empty values and unrecognized keywords are kept
    /// as [`Checked::Unknown`] for the compiler to report.
    pub fn from_form(form: &FormData) -> Self {
        let return_fields = [
            ITEM_RETURN_TYPE,
            ITEM_RETURN_LENGTH,
            ITEM_RETURN_OPTS_NUM,
            ITEM_RETURN_OPTS_TEXT,
        ];
        let return_type = return_fields
            .iter()
            .any(|key| !form.scalar(key).is_empty())
            .then(|| TypeSpec {
                base_type: Checked::parse(form.scalar(ITEM_RETURN_TYPE)),
                length: non_empty(form.scalar(ITEM_RETURN_LENGTH)),
                numeric_options: non_empty(form.scalar(ITEM_RETURN_OPTS_NUM)),
                charset: non_empty(form.scalar(ITEM_RETURN_OPTS_TEXT)),
            });

        Self {
            name: form.scalar(ITEM_NAME).into(),
            kind: Checked::parse(form.scalar(ITEM_TYPE)),
            parameters: parameters_from_form(form),
            return_type,
            definer: non_empty(form.scalar(ITEM_DEFINER)),
            is_deterministic: form.contains(ITEM_IS_DETERMINISTIC),
            security_type: non_empty(form.scalar(ITEM_SECURITY_TYPE))
                .map(|value| Checked::parse(&value)),
            sql_data_access: non_empty(form.scalar(ITEM_SQL_DATA_ACCESS))
                .map(|value| Checked::parse(&value)),
            comment: Some(form.scalar(ITEM_COMMENT))
                .filter(|comment| !comment.is_empty())
                .map(str::to_owned),
            body: form.scalar(ITEM_DEFINITION).to_owned(),
        }
    }
}

/// Parameters are only read when names, types and lengths were all submitted as lists.
/// The name list decides how many there are.
fn parameters_from_form(form: &FormData) -> Vec<ParameterSpec> {
    let (Some(names), Some(_), Some(_)) = (
        form.list(ITEM_PARAM_NAME),
        form.list(ITEM_PARAM_TYPE),
        form.list(ITEM_PARAM_LENGTH),
    ) else {
        return Vec::new();
    };
    names
        .iter()
        .enumerate()
        .map(|(i, name)| ParameterSpec {
            direction: non_empty(form.list_entry(ITEM_PARAM_DIR, i))
                .map(|value| Checked::parse(&value)),
            name: name.as_str().into(),
            ty: TypeSpec {
                base_type: Checked::parse(form.list_entry(ITEM_PARAM_TYPE, i)),
                length: non_empty(form.list_entry(ITEM_PARAM_LENGTH, i)),
                numeric_options: non_empty(form.list_entry(ITEM_PARAM_OPTS_NUM, i)),
                charset: non_empty(form.list_entry(ITEM_PARAM_OPTS_TEXT, i)),
            },
        })
        .collect()
}
