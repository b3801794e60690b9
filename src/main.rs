mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::WidgetWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;
	coat::logging::initialize(&resolved.log_level, resolved.log_file.as_deref())?;

	if cli.print_config {
		resolved.print_summary();
	}

	let workflow = WidgetWorkflow::from_config(resolved);
	if cli.list {
		workflow.list();
		return Ok(());
	}

	run_widget(cli.output, workflow)
}

/// Run the active widget and print its outcome in the chosen format.
fn run_widget(format: OutputFormat, workflow: WidgetWorkflow) -> Result<()> {
	let outcome = workflow.run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
