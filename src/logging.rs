//! Logger installation for the `coat` binary.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "COAT_LOG";

/// Install the global logger.
///
/// `COAT_LOG` wins over `default_level`. Records go to stderr unless a log
/// file is given, which keeps them off the terminal while a widget is drawn.
pub fn initialize(default_level: &str, file: Option<&Path>) -> Result<()> {
	let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV, default_level));
	if let Some(path) = file {
		let file = OpenOptions::new()
			.create(true)
			.append(true)
			.open(path)
			.with_context(|| format!("failed to open log file {}", path.display()))?;
		builder.target(Target::Pipe(Box::new(file)));
	}
	builder
		.try_init()
		.context("a logger is already installed")
}
