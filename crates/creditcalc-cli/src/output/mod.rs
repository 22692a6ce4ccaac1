pub mod csv_out;
pub mod minimal;
pub mod table;
pub mod text;

use std::io::Write;

use creditcalc_core::loan::LoanOutput;
use creditcalc_core::ComputationOutput;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output<W: Write>(
    out: &mut W,
    format: &OutputFormat,
    output: &ComputationOutput<LoanOutput>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Text => text::write_text(out, &output.result)?,
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(output)?)?,
        OutputFormat::Table => table::write_table(out, &serde_json::to_value(output)?)?,
        OutputFormat::Csv => csv_out::write_csv(out, &serde_json::to_value(output)?)?,
        OutputFormat::Minimal => minimal::write_minimal(out, &serde_json::to_value(output)?)?,
    }
    Ok(())
}
