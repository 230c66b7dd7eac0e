use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use std::path::PathBuf;

use weather_core::{
    RunMode, SearchOutcome, Settings, WeatherRecord, WeatherSearch, config::DEFAULT_BASE_URL,
};

use crate::{app::AppContext, render};

const ANY_COUNTRY: &str = "(any country)";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup with search history")]
pub struct Cli {
    /// Directory for stored search history (defaults to the platform data dir).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, endpoint and run mode.
    Configure,

    /// Show current weather for a city. Prompts when no city is given.
    Search {
        city: Option<String>,

        /// Country name, e.g. "France". Unknown names are ignored.
        #[arg(long)]
        country: Option<String>,
    },

    /// Show or edit recent searches.
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
    },

    /// List known countries.
    Countries {
        /// Case-insensitive substring filter.
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Print the history (default).
    List,
    /// Look up entry N again and add the fresh result on top.
    Again { index: usize },
    /// Remove entry N.
    Remove { index: usize },
    /// Remove all entries.
    Clear,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Search { city, country } => {
                let ctx = AppContext::load(self.data_dir)?;
                let search = ctx.weather_search()?;
                search_command(&search, city, country).await
            }
            Command::History { action } => {
                let ctx = AppContext::load(self.data_dir)?;
                history_command(&ctx, action.unwrap_or(HistoryCommand::List)).await
            }
            Command::Countries { filter } => {
                let ctx = AppContext::load(self.data_dir)?;
                let needle = filter.unwrap_or_default().to_lowercase();
                for c in ctx.reference.countries() {
                    if c.label.to_lowercase().contains(&needle) {
                        println!("{}  {}", c.value, c.label);
                    }
                }
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut settings = Settings::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt cancelled")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    settings.set_api_key(api_key.trim().to_string());

    let mode = Select::new("Run mode:", RunMode::all().to_vec())
        .with_starting_cursor(if settings.mode == RunMode::Development { 1 } else { 0 })
        .prompt()
        .context("Run mode prompt cancelled")?;
    settings.mode = mode;

    if mode == RunMode::Production {
        let current = settings.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Text::new("Base URL:")
            .with_default(&current)
            .prompt()
            .context("Base URL prompt cancelled")?;
        settings.base_url = Some(base_url);
    }

    settings.resolve().context("Configuration is incomplete")?;
    settings.save()?;
    println!("Saved configuration to {}", Settings::config_file_path()?.display());
    Ok(())
}

async fn search_command(
    search: &WeatherSearch,
    city: Option<String>,
    country: Option<String>,
) -> Result<()> {
    let (city, country) = match city {
        Some(city) => (city, country.unwrap_or_default()),
        None => prompt_location(search)?,
    };

    search.set_city(city);
    search.set_country(country);
    let outcome = search.submit().await;
    show_result(search, outcome);
    Ok(())
}

fn prompt_location(search: &WeatherSearch) -> Result<(String, String)> {
    let city = Text::new("City:").prompt().context("City prompt cancelled")?;

    let mut options = vec![ANY_COUNTRY.to_string()];
    options.extend(
        search
            .reference()
            .countries_for_combo_box()
            .into_iter()
            .map(|c| c.value),
    );

    let country = Select::new("Country:", options)
        .with_page_size(10)
        .prompt_skippable()
        .context("Country prompt failed")?
        .filter(|c| c != ANY_COUNTRY)
        .unwrap_or_default();

    Ok((city.trim().to_string(), country))
}

async fn history_command(ctx: &AppContext, action: HistoryCommand) -> Result<()> {
    match action {
        HistoryCommand::List => println!("{}", render::history(&ctx.history.entries())),
        HistoryCommand::Again { index } => {
            let entry = history_entry(ctx, index)?;
            let search = ctx.weather_search()?;
            let outcome = search.search_again(&entry).await;
            show_result(&search, outcome);
        }
        HistoryCommand::Remove { index } => {
            let entry = history_entry(ctx, index)?;
            ctx.history.remove_weather_result(&entry);
            println!("Removed #{index} {}, {}", entry.city, entry.country);
        }
        HistoryCommand::Clear => {
            ctx.history.clear_search_history();
            println!("Search history cleared");
        }
    }
    Ok(())
}

/// 1-based, as printed by `history list`.
fn history_entry(ctx: &AppContext, index: usize) -> Result<WeatherRecord> {
    index
        .checked_sub(1)
        .and_then(|i| ctx.history.get(i))
        .with_context(|| format!("No history entry #{index} (have {})", ctx.history.len()))
}

fn show_result(search: &WeatherSearch, outcome: SearchOutcome) {
    if let Some(error) = search.error() {
        println!("✗ {}", error.message);
    }

    match (outcome, search.current().current_weather()) {
        (SearchOutcome::Found, Some(record)) => {
            println!("{}", render::current_weather(&record, search.reference()))
        }
        (SearchOutcome::Skipped, _) => println!("Enter a city to search."),
        _ => println!("{}", render::welcome(search.reference())),
    }
}
