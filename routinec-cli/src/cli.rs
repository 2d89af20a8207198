use std::collections::HashMap;

use clap::Parser;
use miette::{Result, miette};
use routinec::spec::Checked;
use routinec::statement::{Argument, drop_statement, invocation_statements};
use routinec::{Compiler, RoutineSpec};
use tracing::info;

use crate::input::InputArgs;
use crate::output::OutputMode;

#[derive(Debug, Parser)]
#[command(
    name = "routinec",
    version,
    about = "Compile stored routine editor submissions into SQL statements"
)]
pub enum Cli {
    /// Print the CREATE statement of a routine.
    ///
    /// The statement is printed even when the submission has errors; the errors are reported
    /// afterwards and the command fails.
    Compile {
        #[command(flatten)]
        input: InputArgs,

        /// How the statement is printed.
        #[arg(long, value_enum, default_value_t = OutputMode::Text)]
        output: OutputMode,

        /// Drop the routine being edited before creating the new one.
        #[arg(long)]
        replace: bool,
    },

    /// Print the statement dropping the routine being edited.
    Drop {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the statements executing a routine.
    Call {
        #[command(flatten)]
        input: InputArgs,

        /// An argument as NAME=VALUE. Repeat a name to pass several members of a SET.
        #[arg(short, long = "arg", value_parser = parse_argument)]
        args: Vec<(String, String)>,
    },
}

fn parse_argument(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self {
            Cli::Compile {
                input,
                output,
                replace,
            } => {
                let form = input.read_form()?;
                if replace {
                    println!("{}", drop_original(&form)?);
                }
                let spec = RoutineSpec::from_form(&form);
                let config = input.config();
                let compiled = Compiler::new(&config).compile(&spec);
                println!("{}", output.render(&compiled));
                info!(flavor = %config.flavor, valid = compiled.is_valid(), "compiled routine");
                compiled.into_result()?;
                Ok(())
            }
            Cli::Drop { input } => {
                let form = input.read_form()?;
                println!("{}", drop_original(&form)?);
                Ok(())
            }
            Cli::Call { input, args } => {
                let form = input.read_form()?;
                let spec = RoutineSpec::from_form(&form);
                let mut arguments: HashMap<String, Argument> = HashMap::new();
                for (name, value) in args {
                    match arguments.remove(&name) {
                        None => {
                            arguments.insert(name, Argument::Single(value));
                        }
                        Some(Argument::Single(first)) => {
                            arguments.insert(name, Argument::Multiple(vec![first, value]));
                        }
                        Some(Argument::Multiple(mut values)) => {
                            values.push(value);
                            arguments.insert(name, Argument::Multiple(values));
                        }
                    }
                }
                for statement in invocation_statements(&spec, &arguments)? {
                    println!("{statement}");
                }
                Ok(())
            }
        }
    }
}

fn drop_original(form: &routinec::FormData) -> Result<String> {
    match form.original_routine() {
        (Checked::Known(kind), name) if !name.is_empty() => Ok(drop_statement(kind, &name)),
        (Checked::Known(_), _) => Err(miette!("the submission does not name a routine")),
        (Checked::Unknown(raw), _) => Err(miette!("invalid routine type: \"{raw}\"")),
    }
}
