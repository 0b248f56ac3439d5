//! RVD CLI - RISC-V ELF reader and disassembler

mod cli;

use std::fs;

use clap::Parser;
use console::style;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, EXIT_FAILURE, EXIT_SUCCESS};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "rvd=debug"
    } else if cli.silent {
        "rvd=error"
    } else {
        "rvd=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(default_level.parse().unwrap()),
        )
        .with_target(false)
        .init();

    std::process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let source = cli.input.display().to_string();
    let data = match fs::read(&cli.input) {
        Ok(data) => data,
        Err(e) => {
            error!("failed to read {source}: {e}");
            eprintln!("{} cannot read {source}: {e}", style("✗").red().bold());
            return EXIT_FAILURE;
        }
    };

    let report = match rvd::dump_to_string(data, &source, cli.dump_flags()) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            eprintln!("{} {e}", style("✗").red().bold());
            return EXIT_FAILURE;
        }
    };

    if cli.inline {
        print!("{report}");
        return EXIT_SUCCESS;
    }

    // output is mandatory when not inline, enforced by clap
    let Some(output) = &cli.output else {
        return EXIT_FAILURE;
    };
    if let Err(e) = fs::write(output, &report) {
        error!("failed to write {}: {e}", output.display());
        eprintln!(
            "{} cannot write {}: {e}",
            style("✗").red().bold(),
            output.display()
        );
        return EXIT_FAILURE;
    }
    if !cli.silent {
        eprintln!(
            "{} report written to {}",
            style("✓").green().bold(),
            output.display()
        );
    }
    EXIT_SUCCESS
}
