use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use combine_code::cli::Cli;
use combine_code::output::{self, Verbosity};
use combine_code::{Combiner, utils};
use std::io;
use std::process;

fn main() {
    // RUST_LOG controls tracing output; default to warnings only on stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {cause}");
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    if cli.verbose {
        output::set_verbosity(Verbosity::Verbose);
    } else if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    }

    let config = cli.resolve_config()?;

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let report = Combiner::new(config.clone()).run()?;

    output::verbose(&format!(
        "{} file(s), {}, {} skipped",
        report.entries,
        utils::format_size(report.bytes),
        report.skipped.len()
    ));
    output::result(&format!(
        "Code combined into {}",
        config.core.output.display()
    ));

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
