mod api;
mod calc;
mod cmd;
mod data;
mod logging;
mod state;
mod ui;

use crate::data::app_settings::BASE_URL_ENV;
use crate::data::options::HolidayType;
use crate::data::{AppSettings, persistence};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "holidays", about = "browse public holidays by country and year")]
struct Cli {
    /// Directory holding config.yaml and the TUI log file (default: ./config)
    #[arg(long, default_value = "./config")]
    config_dir: PathBuf,

    /// Holiday API base URL (overrides HOLIDAYS_API_BASE_URL and config.yaml)
    #[arg(long)]
    base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of holidays, optionally filtered by month, day and type
    List {
        /// Country code (e.g. US, GB)
        #[arg(short, long)]
        country: Option<String>,
        /// Year (default: current year)
        #[arg(short, long)]
        year: Option<String>,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=31))]
        day: Option<u32>,
        /// national, local, religious or observance
        #[arg(short = 't', long = "type", value_parser = parse_holiday_type)]
        holiday_type: Option<HolidayType>,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Write a default config.yaml into the config directory
    Init {
        /// Overwrite an existing config.yaml
        #[arg(long)]
        force: bool,
    },
    /// Print one page of holidays whose name or description matches a query
    Search {
        /// Free-text query (e.g. Christmas)
        query: String,
        #[arg(short, long)]
        country: Option<String>,
        #[arg(short, long)]
        year: Option<String>,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

fn parse_holiday_type(s: &str) -> Result<HolidayType, String> {
    HolidayType::parse(s).ok_or_else(|| {
        format!("unknown holiday type '{s}' (expected national, local, religious or observance)")
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve config_dir to an absolute path so file I/O works regardless of
    // later directory changes within the process.
    let config_dir = resolve_dir(&cli.config_dir, &std::env::current_dir()?);
    persistence::set_config_dir(config_dir.clone());

    if let Some(Commands::Init { force }) = cli.command {
        return cmd::init::run(&config_dir, force);
    }

    dotenvy::dotenv().ok();
    let settings = AppSettings::load()?.with_overrides(
        std::env::var(BASE_URL_ENV).ok(),
        cli.base_url.clone(),
        cli.timeout_secs,
    );
    settings.validate()?;

    let current_year = Local::now().year().to_string();
    match cli.command {
        None => {
            logging::init_file(&config_dir)?;
            cmd::root::run(&settings)
        }
        Some(Commands::List {
            country,
            year,
            month,
            day,
            holiday_type,
            page,
        }) => {
            logging::init_stderr()?;
            let criteria = cmd::page::criteria_for(
                country.as_deref().unwrap_or(&settings.default_country),
                year.as_deref().unwrap_or(&current_year),
                month,
                day,
                holiday_type,
                None,
            )?;
            cmd::page::run(&settings, &criteria, page)
        }
        Some(Commands::Search {
            query,
            country,
            year,
            page,
        }) => {
            logging::init_stderr()?;
            let criteria = cmd::page::criteria_for(
                country.as_deref().unwrap_or(&settings.default_country),
                year.as_deref().unwrap_or(&current_year),
                None,
                None,
                None,
                Some(&query),
            )?;
            cmd::page::run(&settings, &criteria, page)
        }
        Some(Commands::Init { .. }) => Ok(()),
    }
}

fn resolve_dir(dir: &Path, cwd: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        cwd.join(dir)
    }
}
