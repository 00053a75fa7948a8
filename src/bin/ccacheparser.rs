// ccacheparser - parse ccache statistics from stdin and print them as JSON

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use ccache_exporter::ccache::{legacy, tsv};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Fixed-format text from `ccache --show-stats` (ccache < 3.7)
    Legacy,
    /// Tab-separated output from `ccache --print-stats` (ccache >= 3.7)
    Tsv,
}

/// Parse ccache statistics from stdin and print them as JSON
#[derive(Parser, Debug)]
#[command(name = "ccacheparser", version, about, long_about = None)]
struct Args {
    /// Statistics format to parse
    #[arg(long, value_enum, default_value_t = Format::Tsv)]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read statistics from stdin")?;

    let stats = match args.format {
        Format::Legacy => legacy::parse_show_stats(&text)?.1,
        Format::Tsv => tsv::parse_print_stats(&text)?,
    };

    println!("{}", serde_json::to_string(&stats)?);

    Ok(())
}
