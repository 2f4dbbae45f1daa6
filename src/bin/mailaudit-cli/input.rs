use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};

use anyhow::{Context, Result};

use crate::args::Cli;

/// Splits on commas and whitespace: `"a,b c"` gives `["a", "b", "c"]`.
pub fn split_domains(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Domains given on the command line (`-e` first, then positionals). Stray
/// tokens that look like flags are ignored.
pub fn inline_domains(email: Option<&str>, positionals: &[String]) -> Vec<String> {
    let mut domains = Vec::new();
    if let Some(list) = email {
        domains.extend(split_domains(list));
    }
    for arg in positionals {
        if arg.starts_with('-') {
            continue;
        }
        domains.extend(split_domains(arg));
    }
    domains
}

/// One domain per line, trimmed; blank lines skipped.
pub fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut domains = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            domains.push(trimmed.to_string());
        }
    }
    Ok(domains)
}

/// Picks the input source: inline list, then `--file`, then piped stdin.
/// `None` means nothing was provided on an interactive terminal.
pub fn collect_domains(cli: &Cli) -> Result<Option<Vec<String>>> {
    let inline = inline_domains(cli.email.as_deref(), &cli.domains);
    if !inline.is_empty() {
        return Ok(Some(inline));
    }

    if let Some(path) = &cli.file {
        let file = File::open(path)
            .with_context(|| format!("failed to open file {}", path.display()))?;
        let domains = read_lines(BufReader::new(file)).context("error reading input file")?;
        return Ok(Some(domains));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let domains = read_lines(stdin.lock()).context("error reading stdin")?;
    Ok(Some(domains))
}
