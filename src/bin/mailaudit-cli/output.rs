use anyhow::{Context, Result};
use colored::Colorize;
use tabled::{Table, Tabled, settings::Style};
use tracing::warn;

use mailaudit_lib::VerificationOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    /// Unknown names fall back to the table layout.
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Self::Csv,
            "json" => Self::Json,
            "table" => Self::Table,
            other => {
                warn!(format = other, "unknown --format, using table (table|csv|json)");
                Self::Table
            }
        }
    }
}

pub const CSV_HEADER: [&str; 10] = [
    "domain",
    "has_mx",
    "mx_hosts",
    "has_spf",
    "spf",
    "has_dmarc",
    "dmarc",
    "smtp_reachable",
    "latency_ms",
    "error",
];

/// Encodes the sorted outcomes and writes them to `out` (atomically) or
/// stdout.
pub fn write_report(
    outcomes: &[VerificationOutcome],
    format: OutputFormat,
    out: Option<&str>,
) -> Result<()> {
    let bytes = match format {
        OutputFormat::Table => {
            let mut rendered = render_table(outcomes);
            rendered.push('\n');
            rendered.into_bytes()
        }
        OutputFormat::Csv => render_csv(outcomes)?,
        OutputFormat::Json => render_json(outcomes)?,
    };

    match out {
        Some(path) => write_all_atomically(path, &bytes),
        None => {
            use std::io::Write;

            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Domain")]
    domain: String,
    #[tabled(rename = "MX")]
    mx: String,
    #[tabled(rename = "SPF")]
    spf: String,
    #[tabled(rename = "DMARC")]
    dmarc: String,
    #[tabled(rename = "SMTP")]
    smtp: String,
    #[tabled(rename = "Latency(ms)")]
    latency_ms: u64,
    #[tabled(rename = "Error")]
    error: String,
}

impl From<&VerificationOutcome> for TableRow {
    fn from(outcome: &VerificationOutcome) -> Self {
        let smtp = if outcome.smtp_reachable {
            "ok".green().to_string()
        } else {
            "no".red().to_string()
        };
        Self {
            domain: outcome.domain.clone(),
            mx: outcome.mx_hosts_joined(","),
            spf: outcome.spf_record.clone(),
            dmarc: outcome.dmarc_record.clone(),
            smtp,
            latency_ms: outcome.latency_ms,
            error: outcome.error.clone(),
        }
    }
}

pub fn render_table(outcomes: &[VerificationOutcome]) -> String {
    let rows: Vec<TableRow> = outcomes.iter().map(TableRow::from).collect();
    Table::new(rows).with(Style::ascii()).to_string()
}

#[cfg(feature = "with-csv")]
pub fn render_csv(outcomes: &[VerificationOutcome]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for outcome in outcomes {
        wtr.write_record(csv_record(outcome))?;
    }
    wtr.into_inner().context("flush CSV writer")
}

#[cfg(not(feature = "with-csv"))]
pub fn render_csv(_: &[VerificationOutcome]) -> Result<Vec<u8>> {
    anyhow::bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(outcome: &VerificationOutcome) -> [String; 10] {
    [
        outcome.domain.clone(),
        outcome.has_mx.to_string(),
        outcome.mx_hosts_joined(" "),
        outcome.has_spf.to_string(),
        outcome.spf_record.clone(),
        outcome.has_dmarc.to_string(),
        outcome.dmarc_record.clone(),
        outcome.smtp_reachable.to_string(),
        outcome.latency_ms.to_string(),
        outcome.error.clone(),
    ]
}

#[cfg(feature = "with-serde")]
pub fn render_json(outcomes: &[VerificationOutcome]) -> Result<Vec<u8>> {
    let mut s = serde_json::to_string_pretty(outcomes).context("encode JSON report")?;
    s.push('\n');
    Ok(s.into_bytes())
}

#[cfg(not(feature = "with-serde"))]
pub fn render_json(_: &[VerificationOutcome]) -> Result<Vec<u8>> {
    anyhow::bail!("format=json nécessite la feature 'with-serde'")
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<VerificationOutcome> {
        let mut reachable = VerificationOutcome::new("a.example");
        reachable.has_mx = true;
        reachable.mx_hosts = vec!["mx1.a.example".to_string(), "mx2.a.example".to_string()];
        reachable.has_spf = true;
        reachable.spf_record = "v=spf1 -all".to_string();
        reachable.has_dmarc = true;
        reachable.dmarc_record = "v=DMARC1; p=reject".to_string();
        reachable.smtp_reachable = true;
        reachable.latency_ms = 42;

        let mut unreachable = VerificationOutcome::new("b.example");
        unreachable.error = "connection to b.example:25 failed".to_string();

        vec![reachable, unreachable]
    }

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("csv"), OutputFormat::Csv);
        assert_eq!(OutputFormat::parse("Table"), OutputFormat::Table);
    }

    #[test]
    fn unknown_format_falls_back_to_table() {
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse(""), OutputFormat::Table);
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_layout() {
        let rendered = String::from_utf8(render_csv(&sample()).expect("csv")).expect("utf8");
        insta::assert_snapshot!(rendered.trim_end(), @r"
        domain,has_mx,mx_hosts,has_spf,spf,has_dmarc,dmarc,smtp_reachable,latency_ms,error
        a.example,true,mx1.a.example mx2.a.example,true,v=spf1 -all,true,v=DMARC1; p=reject,true,42,
        b.example,false,,false,,false,,false,0,connection to b.example:25 failed
        ");
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn json_omits_empty_fields() {
        let rendered = render_json(&sample()).expect("json");
        let value: serde_json::Value = serde_json::from_slice(&rendered).expect("parse");
        let expected = serde_json::json!([
            {
                "domain": "a.example",
                "has_mx": true,
                "mx_hosts": ["mx1.a.example", "mx2.a.example"],
                "has_spf": true,
                "spf_record": "v=spf1 -all",
                "has_dmarc": true,
                "dmarc_record": "v=DMARC1; p=reject",
                "smtp_reachable": true,
                "latency_ms": 42
            },
            {
                "domain": "b.example",
                "has_mx": false,
                "mx_hosts": null,
                "has_spf": false,
                "has_dmarc": false,
                "smtp_reachable": false,
                "error": "connection to b.example:25 failed"
            }
        ]);
        assert_eq!(value, expected);
    }

    #[test]
    fn report_file_replaced_atomically() {
        let dir = std::env::temp_dir().join(format!("mailaudit-out-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("report.txt");
        let path = path.to_str().expect("utf8 path");

        std::fs::write(path, b"stale").expect("seed");
        write_report(&sample(), OutputFormat::Table, Some(path)).expect("write report");

        let written = std::fs::read_to_string(path).expect("read back");
        assert!(written.contains("a.example"));
        assert!(!written.contains("stale"));
        assert!(!std::path::Path::new(&format!("{path}.tmp")).exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn table_has_expected_columns() {
        colored::control::set_override(false);
        let rendered = render_table(&sample());
        let header = rendered.lines().nth(1).expect("header line");
        for column in ["Domain", "MX", "SPF", "DMARC", "SMTP", "Latency(ms)", "Error"] {
            assert!(header.contains(column), "missing {column} in {header}");
        }
        assert!(rendered.contains("mx1.a.example,mx2.a.example"));
        assert!(rendered.contains(" ok "));
        assert!(rendered.contains(" no "));
    }
}
