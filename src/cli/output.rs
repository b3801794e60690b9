use anyhow::Result;
use coat::listbox::SelectionValue;
use coat::tui::Outcome;

/// Print a plain-text representation of the outcome.
pub(crate) fn print_plain(outcome: &Outcome) {
	print!("{}", format_plain(outcome));
}

fn format_plain(outcome: &Outcome) -> String {
	if !outcome.accepted {
		return format!("Cancelled ({})\n", outcome.widget);
	}

	let lines: Vec<&str> = match (&outcome.value, &outcome.command) {
		(Some(SelectionValue::Single(Some(value))), _) => vec![value.as_str()],
		(Some(SelectionValue::Multi(values)), _) if !values.is_empty() => {
			values.iter().map(String::as_str).collect()
		}
		(_, Some(command)) => vec![command.as_str()],
		_ => vec!["No selection"],
	};
	lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Format the outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the outcome.
pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
