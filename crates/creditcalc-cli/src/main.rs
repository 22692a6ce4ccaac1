mod commands;
mod input;
mod output;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::debug;
use std::ffi::OsString;
use std::io::{self, Write};
use std::process;

use commands::loan::LoanArgs;

/// Message printed for every rejected input.
const INCORRECT_PARAMETERS: &str = "Incorrect parameters";

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;

/// Annuity and differentiated loan calculator
#[derive(Parser, Debug)]
#[command(
    name = "creditcalc",
    version,
    about = "Annuity and differentiated loan calculator",
    long_about = "Computes the monthly payment, the loan principal or the repayment term \
                  of an annuity loan from the other two, or the month-by-month schedule \
                  of a differentiated loan. Give any three of --payment, --principal and \
                  --periods together with --interest."
)]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();

    let stdout = io::stdout();
    let status = run(std::env::args_os(), &mut stdout.lock());
    process::exit(status);
}

/// Parse `args`, compute and write the report to `out`. Returns the exit
/// status.
fn run<I, T, W>(args: I, out: &mut W) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return match write!(out, "{}", e.render()) {
                Ok(()) => EXIT_OK,
                Err(_) => EXIT_FAILURE,
            };
        }
        Err(e) => {
            debug!("argument parsing failed: {}", e);
            return incorrect_parameters(out);
        }
    };

    match commands::loan::run_loan(&cli.loan) {
        Ok(result) => match output::format_output(out, &cli.output, &result) {
            Ok(()) => EXIT_OK,
            Err(e) => {
                eprintln!("output error: {}", e);
                EXIT_FAILURE
            }
        },
        Err(e) => {
            debug!("{}", e);
            incorrect_parameters(out)
        }
    }
}

fn incorrect_parameters<W: Write>(out: &mut W) -> i32 {
    // The status is a failure whether or not the message got through.
    let _ = writeln!(out, "{}", INCORRECT_PARAMETERS);
    EXIT_FAILURE
}
