use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use dprw_build::{build_measurement, load_document, Options};
use dprw_core::DprwError;

#[derive(Parser, Debug)]
#[command(
    name = "dprw-sim",
    about = "Monte Carlo spin random walk and spin-echo simulator",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// YAML configuration describing the measurement.
    config: Option<PathBuf>,
    /// Values for `!option` references, as `--key=value` or `--key value`.
    /// Every key is an option name, including `help` and `version`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
}

fn report_parse_line(err: &DprwError) {
    if let (DprwError::Config(_), Some(line)) = (err, err.context("line")) {
        eprintln!("YAML parsing error at line {line}");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let Some(config) = cli.config else {
        eprintln!("{}", Cli::command().render_usage());
        process::exit(1);
    };

    let options = Options::from_args(&cli.options)?;
    let document = load_document(&config).inspect_err(report_parse_line)?;
    log::info!("loaded {} with {} option(s)", config.display(), options.len());

    let mut measurement = build_measurement(&document, &options)?;
    let table = measurement.run()?;
    log::info!("wrote {} samples of {} columns", table.len(), table.columns.len());
    Ok(())
}
