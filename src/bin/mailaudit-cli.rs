use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use mailaudit_lib::{DomainVerifier, Pipeline};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[path = "mailaudit-cli/args.rs"]
mod args;
#[path = "mailaudit-cli/input.rs"]
mod input;
#[path = "mailaudit-cli/output.rs"]
mod output;

use args::Cli;
use output::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format = OutputFormat::parse(&cli.format);

    let Some(domains) = input::collect_domains(&cli)? else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    };
    if domains.is_empty() {
        warn!("no domains provided");
        return Ok(());
    }

    let probe_options = cli.probe_options();
    let bar = progress_bar(domains.len(), cli.show_progress())?;
    let outcomes = Pipeline::new(cli.pipeline_config())
        .run(
            domains,
            || DomainVerifier::from_system_conf(probe_options.clone()),
            |_| bar.inc(1),
        )
        .context("cannot start verification")?;
    bar.finish_and_clear();

    output::write_report(&outcomes, format, cli.out.as_deref())
}

/// Logs go to stderr; stdout only carries the report. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_bar(total: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}] {msg}")
            .context("progress bar template")?,
    );
    Ok(bar)
}
