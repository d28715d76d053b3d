// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::Serialize;
use skyguide_core::catalog;
use skyguide_core::config::BrowseConfig;
use skyguide_core::favorites::{FavoriteCollection, FavoritesManager};
use skyguide_core::source::Dataset;
use skyguide_core::{
    Airline, Airport, BrowseRecord, BrowseState, CachedSource, FilterSelectionSet, FilterValue,
    Filterable, JsonDirSource, Locale, RecordKind,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding <locale>/airports.json and <locale>/airlines.json
    #[arg(short, long, env = "SKYGUIDE_DATA")]
    data_dir: Option<PathBuf>,

    /// Dataset locale (en, tr, pt-BR, ...)
    #[arg(short, long, env = "SKYGUIDE_LOCALE")]
    locale: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse airports
    Airports(BrowseArgs),
    /// Browse airlines
    Airlines(BrowseArgs),
    /// Manage favorite airports and airlines
    Favorites {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// List filter keys, or the options offered for one key
    Options { kind: KindArg, key: Option<String> },
}

#[derive(Args)]
struct BrowseArgs {
    /// Free-text search; an exact IATA code wins over partial matches
    #[arg(short, long)]
    search: Option<String>,

    /// Filter as key=value, e.g. region=europe, is24Hour=true, openedYear=1990-2000
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, FilterValue)>,

    /// Number of pages to show
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum FavoriteAction {
    List,
    Add { kind: KindArg, code: String },
    Remove { kind: KindArg, code: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Airport,
    Airline,
}

impl From<KindArg> for RecordKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Airport => RecordKind::Airport,
            KindArg::Airline => RecordKind::Airline,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, FilterValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in '{}'", raw));
    }
    Ok((key.to_string(), FilterValue::from_cli(value)))
}

/// One-line rendering for terminal listings.
trait Summary: BrowseRecord {
    fn details(&self) -> String;

    fn summary(&self) -> String {
        let code = self.short_code().or(self.long_code()).unwrap_or("---");
        let name = self.name().unwrap_or("(unnamed)");
        let place = match (self.city(), self.country()) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => String::new(),
        };
        format!("{:<4} {:<40} {:<30} {}", code, name, place, self.details())
    }
}

impl Summary for Airport {
    fn details(&self) -> String {
        let mut parts = Vec::new();
        if let Some(kind) = &self.airport_type {
            parts.push(kind.clone());
        }
        if let Some(pax) = self.operations.as_ref().and_then(|o| o.annual_passengers) {
            parts.push(format!("{:.1}M pax", pax / 1_000_000.0));
        }
        if let Some(rating) = self.rating {
            parts.push(format!("{:.1}★", rating));
        }
        parts.join(" · ")
    }
}

impl Summary for Airline {
    fn details(&self) -> String {
        let mut parts = Vec::new();
        if let Some(kind) = &self.business_type {
            parts.push(kind.clone());
        }
        if let Some(size) = self.fleet.as_ref().and_then(|f| f.size) {
            parts.push(format!("{} aircraft", size));
        }
        if let Some(alliance) = &self.alliance {
            parts.push(alliance.clone());
        }
        parts.join(" · ")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => std::env::var("SKYGUIDE_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );

    let config = BrowseConfig::load().context("Failed to load configuration")?;
    let favorites_manager = FavoritesManager::new();

    match &cli.command {
        Commands::Airports(args) => {
            let favorites = favorites_manager.load()?;
            browse::<Airport>(&cli, &config, args, &favorites, RecordKind::Airport)?;
        }
        Commands::Airlines(args) => {
            let favorites = favorites_manager.load()?;
            browse::<Airline>(&cli, &config, args, &favorites, RecordKind::Airline)?;
        }
        Commands::Favorites { action } => {
            let mut favorites = favorites_manager.load()?;
            match action {
                FavoriteAction::List => {
                    for (label, kind) in [
                        ("Airports", RecordKind::Airport),
                        ("Airlines", RecordKind::Airline),
                    ] {
                        let codes: Vec<&str> = favorites.codes(kind).collect();
                        println!("{}: {}", label, codes.join(", "));
                    }
                }
                FavoriteAction::Add { kind, code } => {
                    if favorites.add((*kind).into(), code) {
                        favorites_manager.save(&favorites)?;
                        println!("Added: {}", code.to_uppercase());
                    } else {
                        println!("Already a favorite: {}", code.to_uppercase());
                    }
                }
                FavoriteAction::Remove { kind, code } => {
                    if favorites.remove((*kind).into(), code) {
                        favorites_manager.save(&favorites)?;
                        println!("Removed: {}", code.to_uppercase());
                    } else {
                        println!("Not a favorite: {}", code.to_uppercase());
                    }
                }
            }
        }
        Commands::Options { kind, key } => match kind {
            KindArg::Airport => print_options::<Airport>(RecordKind::Airport, key.as_deref())?,
            KindArg::Airline => print_options::<Airline>(RecordKind::Airline, key.as_deref())?,
        },
    }

    Ok(())
}

fn browse<R>(
    cli: &Cli,
    config: &BrowseConfig,
    args: &BrowseArgs,
    favorites: &FavoriteCollection,
    kind: RecordKind,
) -> Result<()>
where
    R: Filterable + Dataset + Summary + Serialize,
{
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.data_dir.clone())
        .ok_or_else(|| anyhow!("No data directory. Please specify with --data-dir."))?;
    let locale = Locale::parse(cli.locale.as_deref().unwrap_or(&config.locale))?;

    let mut filters = FilterSelectionSet::new();
    for (key, value) in &args.filters {
        if !R::registry().contains(key) {
            let known: Vec<&str> = R::registry().keys().collect();
            bail!("Unknown filter '{}'. Known filters: {}", key, known.join(", "));
        }
        filters.insert(key.clone(), value.clone());
    }

    let mut source: CachedSource<JsonDirSource, R> =
        CachedSource::new(JsonDirSource::new(&data_dir));
    let mut state = BrowseState::<R>::new()
        .with_page_size(config.page_size)
        .with_debounce(config.debounce());
    state.set_fetch_state(source.load(&locale));
    state.set_filters(filters);
    if let Some(term) = &args.search {
        state.set_search_term(term.as_str(), Instant::now());
        state.submit_search();
    }
    for _ in 1..args.page.max(1) {
        if !state.load_more() {
            break;
        }
    }

    let view = state.view();
    if let Some(err) = view.error {
        bail!("Failed to load {} data: {}", R::LABEL, err);
    }

    let results = &view.paginated_results;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for record in results {
        let starred = record
            .short_code()
            .is_some_and(|c| favorites.contains(kind, c));
        println!("{} {}", if starred { "★" } else { " " }, record.summary());
    }
    println!(
        "\nShowing {} of {} {}s (page {})",
        results.len(),
        view.filtered_count,
        R::LABEL,
        view.page
    );
    if !view.filters.is_empty() {
        let applied: Vec<String> = view
            .filters
            .iter()
            .map(|(key, value)| describe_filter(kind, key, value))
            .collect();
        println!("Filters: {}", applied.join("; "));
    }
    if view.has_more {
        println!("More results available: use --page {}", view.page + 1);
    }

    Ok(())
}

/// `key: label` using the catalog label when the value is one of its options.
fn describe_filter(kind: RecordKind, key: &str, value: &FilterValue) -> String {
    let label = |raw: &str| {
        catalog::label_for(kind, key, raw)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string())
    };
    let shown = match value {
        FilterValue::Flag(b) => b.to_string(),
        FilterValue::Number(n) => label(&n.to_string()),
        FilterValue::Text(text) => label(text),
        FilterValue::List(items) => items
            .iter()
            .map(|item| label(item))
            .collect::<Vec<_>>()
            .join(" / "),
    };
    format!("{}: {}", key, shown)
}

fn print_options<R: Filterable>(kind: RecordKind, key: Option<&str>) -> Result<()> {
    let registry = R::registry();
    match key {
        None => {
            for def in registry.defs() {
                let hint = if catalog::options_for(kind, def.key).is_some() {
                    " (options available)"
                } else {
                    ""
                };
                println!("{:<20} {}{}", def.key, def.kind.label(), hint);
            }
        }
        Some(key) => {
            let def = registry
                .get(key)
                .ok_or_else(|| anyhow!("Unknown filter '{}'", key))?;
            match catalog::options_for(kind, key) {
                Some(options) => {
                    for option in options {
                        println!("{:<20} {}", option.value, option.label);
                    }
                }
                None => println!("'{}' is a {} filter without fixed options", key, def.kind.label()),
            }
        }
    }
    Ok(())
}
