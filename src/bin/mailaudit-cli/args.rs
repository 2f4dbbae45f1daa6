use std::path::PathBuf;

use clap::Parser;
use mailaudit_lib::{PipelineConfig, SmtpProbeOptions};

#[derive(Parser, Debug)]
#[command(name = "mailaudit-cli")]
#[command(about = "Audit MX, SPF, DMARC et joignabilité SMTP pour une liste de domaines")]
pub struct Cli {
    /// domaines à vérifier (séparés par virgules ou espaces)
    pub domains: Vec<String>,

    /// fichier de domaines (un par ligne); sinon stdin
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// domaine(s) ou adresse(s) en ligne, liste séparée par virgules ou espaces
    #[arg(short = 'e', long = "email")]
    pub email: Option<String>,

    /// format: table|csv|json
    #[arg(long, default_value = "table")]
    pub format: String,

    /// write report to file instead of stdout
    #[arg(long)]
    pub out: Option<String>,

    /// nombre de workers concurrents
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    /// limite de débit (vérifications par seconde), 0 = illimité
    #[arg(long, default_value_t = 0)]
    pub rate: u32,

    /// active le test SMTP léger (EHLO), plus lent
    #[arg(long)]
    pub smtp: bool,

    /// nom utilisé pour EHLO
    #[arg(long)]
    pub helo: Option<String>,

    /// timeout connexion et échange SMTP (ms)
    #[arg(long = "timeout-ms", default_value_t = 6_000)]
    pub timeout_ms: u64,

    /// port SMTP
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// logs détaillés (debug) sur stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// désactive les couleurs
    #[arg(long)]
    pub no_color: bool,

    /// masque la barre de progression
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_concurrency(self.concurrency)
            .with_rate(self.rate)
            .with_smtp_check(self.smtp)
    }

    pub fn probe_options(&self) -> SmtpProbeOptions {
        let mut options = SmtpProbeOptions {
            port: self.port,
            connect_timeout_ms: self.timeout_ms,
            exchange_timeout_ms: self.timeout_ms,
            ..SmtpProbeOptions::default()
        };
        if let Some(helo) = &self.helo {
            options.helo_identity = helo.clone();
        }
        options
    }

    pub fn show_progress(&self) -> bool {
        !(self.no_progress || self.verbose)
    }
}
