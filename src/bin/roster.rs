use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use roster_parser::{
    export_file_name, scrape_from_html, scrape_from_url_with, write_csv, ExportOptions,
    ScraperConfig, Sport,
};

#[derive(Parser)]
#[command(name = "roster", about = "Scrape a college athletics roster page")]
struct Cli {
    /// Roster page to fetch
    #[arg(long, conflicts_with = "html")]
    url: Option<String>,

    /// Saved HTML file to parse instead of fetching
    #[arg(long)]
    html: Option<PathBuf>,

    /// Page URL used to resolve photo links when parsing a saved file
    #[arg(long, default_value = "")]
    base_url: String,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Sheet layout for CSV output: basketball, baseball or softball
    #[arg(long, default_value = "basketball")]
    sport: String,

    /// Write to this file; "-" for stdout. Defaults to stdout for JSON and
    /// to <team>_<Sport>_roster.csv for CSV.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    no_number: bool,
    #[arg(long)]
    no_position: bool,
    #[arg(long)]
    no_year: bool,
    #[arg(long)]
    no_height: bool,
    #[arg(long)]
    no_weight: bool,
    #[arg(long)]
    no_photo: bool,

    /// Request timeout in seconds (overrides ROSTER_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl Cli {
    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            number: !self.no_number,
            position: !self.no_position,
            year: !self.no_year,
            height: !self.no_height,
            weight: !self.no_weight,
            photo: !self.no_photo,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let roster = match (&cli.url, &cli.html) {
        (Some(url), None) => {
            let mut config = ScraperConfig::from_env();
            if let Some(secs) = cli.timeout {
                config.timeout_secs = secs;
            }
            scrape_from_url_with(&config, url)?
        }
        (None, Some(path)) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            scrape_from_html(&html, &cli.base_url)
        }
        _ => bail!("pass exactly one of --url or --html"),
    };

    tracing::info!(
        platform = %roster.platform,
        players = roster.players.len(),
        coaches = roster.coaches.len(),
        "scraped roster"
    );

    let (body, default_path) = match cli.format {
        Format::Json => (serde_json::to_string_pretty(&roster)? + "\n", None),
        Format::Csv => {
            let sport = Sport::from_name(&cli.sport);
            let mut buf = Vec::new();
            write_csv(&mut buf, &roster, sport, &cli.export_options())?;
            let path = PathBuf::from(export_file_name(&roster, sport));
            (String::from_utf8(buf)?, Some(path))
        }
    };

    match cli.output.or(default_path) {
        Some(path) if path.as_os_str() != "-" => {
            fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote roster");
        }
        _ => io::stdout().write_all(body.as_bytes())?,
    }

    Ok(())
}
