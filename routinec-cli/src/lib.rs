use tracing_subscriber::EnvFilter;

mod cli;
mod input;
mod output;

pub use cli::Cli;

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to warnings only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
