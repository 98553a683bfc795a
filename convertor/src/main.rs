//! Convertor CLI - turn `output_hhi_cpi.csv` into `output_hhi_cpi.json`
//!
//! ```bash
//! convertor      # run in the directory holding output_hhi_cpi.csv
//! ```

use clap::Parser;
use convertor::logs::log_error;
use convertor::{convert, ConvertConfig};

#[derive(Parser)]
#[command(name = "convertor", version)]
#[command(about = "Convert output_hhi_cpi.csv to output_hhi_cpi.json", long_about = None)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run() {
        log_error(e.to_string());
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let summary = convert(&ConvertConfig::default())?;
    println!("{}", summary.confirmation());
    Ok(())
}
