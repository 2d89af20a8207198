use clap::ValueEnum;
use routinec::Compiled;
use serde_json::json;
use strum::Display;

#[derive(Debug, ValueEnum, Clone, Copy, Default, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum OutputMode {
    /// The statement alone.
    #[default]
    Text,
    /// An object holding the statement and the errors, each with the field it concerns.
    Json,
}

impl OutputMode {
    pub fn render(self, compiled: &Compiled) -> String {
        match self {
            OutputMode::Text => compiled.statement.clone(),
            OutputMode::Json => json!({
                "statement": compiled.statement,
                "errors": compiled
                    .errors
                    .iter()
                    .map(|e| json!({
                        "field": e.field().map(|field| field.to_string()),
                        "message": e.to_string(),
                    }))
                    .collect::<Vec<_>>(),
            })
            .to_string(),
        }
    }
}
