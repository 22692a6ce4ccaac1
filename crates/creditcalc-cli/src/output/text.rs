use std::io::{self, Write};

use creditcalc_core::loan::report::render_lines;
use creditcalc_core::loan::LoanOutput;

/// Write the plain-text report, one line per fact.
pub fn write_text<W: Write>(out: &mut W, output: &LoanOutput) -> io::Result<()> {
    for line in render_lines(output) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}
