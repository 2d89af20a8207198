use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, WrapErr};
use routinec::common::types::ServerFlavor;
use routinec::{CompilerConfig, FormData};
use tracing::debug;

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// JSON file holding the submitted routine editor fields.
    /// If not provided, the submission is read from stdin.
    pub file: Option<PathBuf>,

    /// The server the statements are generated for.
    #[arg(long, default_value = "mysql", value_parser = parse_flavor)]
    pub flavor: ServerFlavor,
}

fn parse_flavor(s: &str) -> Result<ServerFlavor, strum::ParseError> {
    s.parse()
}

impl InputArgs {
    pub fn config(&self) -> CompilerConfig {
        CompilerConfig::new(self.flavor)
    }

    pub fn read_form(&self) -> Result<FormData> {
        let content = match &self.file {
            Some(path) => std::fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| format!("failed to read {}", path.display()))?,
            None => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .into_diagnostic()
                    .wrap_err("failed to read stdin")?;
                content
            }
        };
        debug!(bytes = content.len(), "read routine submission");
        FormData::from_json(&content)
            .into_diagnostic()
            .wrap_err("invalid routine submission")
    }
}
