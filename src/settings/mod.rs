//! Layered configuration for the `coat` binary.

mod errors;
mod raw;
mod resolved;
mod sources;

use anyhow::{Context, Result};

use crate::cli::CliArgs;
use raw::RawConfig;
pub(crate) use resolved::ResolvedConfig;
use sources::build_config;

/// Load configuration by combining config files, environment variables and
/// CLI overrides.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);
	Ok(raw.resolve()?)
}
