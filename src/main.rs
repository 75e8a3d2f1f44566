use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use unicode_width::UnicodeWidthStr;

use manasift::config::{self, Config};
use manasift::history::{BackgroundStore, FileStore, KeyValueStore};
use manasift::{
    FieldConfig, FieldRegistry, FilterHistoryStore, MatchRange, SearchFilter, SuggestionCandidate,
    SuggestionEngine,
};

/// Filter suggestions and ranked history for card search queries
#[derive(Parser, Debug)]
#[command(name = "manasift", version, about)]
struct Cli {
    /// Config file (default: ~/.config/manasift/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the filter history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank suggestions for partially typed input
    Suggest {
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Filters already applied to the query
        #[arg(short = 'x', long = "exclude", allow_hyphen_values = true)]
        exclude: Vec<String>,
    },
    /// Record that a filter was applied
    Record {
        #[arg(allow_hyphen_values = true)]
        filter: String,
    },
    Pin {
        #[arg(allow_hyphen_values = true)]
        filter: String,
    },
    Unpin {
        #[arg(allow_hyphen_values = true)]
        filter: String,
    },
    Delete {
        #[arg(allow_hyphen_values = true)]
        filter: String,
    },
    /// Search the filter history (recent entries when no term is given)
    History { term: Option<String> },
    /// Describe filter fields
    Fields { key: Option<String> },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };
    if let Some(warning) = &loaded.warning {
        log::warn!("{}", warning);
    }

    let mut config = loaded.config;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    run(cli.command, &config)
}

fn run(command: Command, config: &Config) -> Result<()> {
    let mut engine = open_engine(config)?;

    match command {
        Command::Suggest { text, exclude } => {
            let excluded = exclude
                .iter()
                .map(|f| f.parse::<SearchFilter>())
                .collect::<manasift::Result<Vec<_>>>()?;
            for candidate in engine.get_suggestions(&text, &excluded) {
                println!("{}", render_candidate(&candidate));
            }
        }
        Command::Record { filter } => {
            let filter: SearchFilter = filter.parse()?;
            println!("Recorded {}", filter);
            engine.record_usage(filter);
        }
        Command::Pin { filter } => {
            let filter: SearchFilter = filter.parse()?;
            report(engine.pin(&filter), "Pinned", &filter);
        }
        Command::Unpin { filter } => {
            let filter: SearchFilter = filter.parse()?;
            report(engine.unpin(&filter), "Unpinned", &filter);
        }
        Command::Delete { filter } => {
            let filter: SearchFilter = filter.parse()?;
            report(engine.delete(&filter), "Deleted", &filter);
        }
        Command::History { term } => {
            for found in engine.history().search(term.as_deref().unwrap_or("")) {
                let pin = if found.is_pinned { "*" } else { " " };
                println!(
                    "{} {}  {}",
                    pin,
                    highlight(&found.display, found.match_range),
                    found.last_used_at.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Command::Fields { key } => match key {
            Some(key) => match engine.registry().lookup(&key) {
                Some(field) => print_field(field),
                None => println!("Unknown field '{}'", key),
            },
            None => print_field_table(engine.registry()),
        },
    }

    Ok(())
}

fn open_engine(config: &Config) -> Result<SuggestionEngine> {
    let dir = config
        .storage
        .resolve_data_dir()
        .ok_or_else(|| eyre!("Could not determine a data directory; pass --data-dir"))?;

    let files = FileStore::new(dir);
    let storage: Box<dyn KeyValueStore> = if config.storage.background_writes {
        Box::new(BackgroundStore::new(files))
    } else {
        Box::new(files)
    };

    let history = FilterHistoryStore::load(storage, &config.history);
    Ok(SuggestionEngine::new(Arc::new(FieldRegistry::standard()), history).with_config(&config.suggestions))
}

fn report(found: bool, action: &str, filter: &SearchFilter) {
    if found {
        println!("{} {}", action, filter);
    } else {
        println!("No history entry for {}", filter);
    }
}

/// Wrap the matched span in brackets
fn highlight(text: &str, range: Option<MatchRange>) -> String {
    match range {
        Some(range) => {
            let (before, matched, after) = range.split(text);
            format!("{}[{}]{}", before, matched, after)
        }
        None => text.to_string(),
    }
}

fn render_candidate(candidate: &SuggestionCandidate) -> String {
    match candidate {
        SuggestionCandidate::History {
            filter,
            is_pinned,
            match_range,
        } => {
            let pin = if *is_pinned { " (pinned)" } else { "" };
            format!("history  {}{}", highlight(&filter.to_string(), *match_range), pin)
        }
        SuggestionCandidate::FilterType {
            filter_type,
            matched_key,
            is_exact,
            match_range,
        } => {
            let mut line = format!("field    {}", filter_type);
            if matched_key != filter_type {
                line.push_str(&format!(" via {}", highlight(matched_key, *match_range)));
            }
            if *is_exact {
                line.push_str(" (exact)");
            }
            line
        }
        SuggestionCandidate::Enumeration {
            filter_type,
            operator,
            options,
        } => {
            let values: Vec<String> = options
                .iter()
                .map(|option| highlight(&option.value, option.match_range))
                .collect();
            format!("values   {}{} {}", filter_type, operator, values.join(" "))
        }
    }
}

fn print_field(field: &FieldConfig) {
    println!("{} ({})", field.canonical_key, field.display_name);
    if !field.aliases.is_empty() {
        println!("  aliases: {}", field.aliases.join(", "));
    }
    println!("  values: {}", field.value_kind);
    if let Some(options) = field.value_kind.options() {
        println!("  options: {}", options.join(", "));
    }
}

fn print_field_table(registry: &FieldRegistry) {
    let rows: Vec<[String; 3]> = registry
        .fields()
        .iter()
        .map(|field| {
            [
                field.canonical_key.clone(),
                field.aliases.join(","),
                field.display_name.clone(),
            ]
        })
        .collect();

    let key_width = rows.iter().map(|r| r[0].width()).max().unwrap_or(0);
    let alias_width = rows.iter().map(|r| r[1].width()).max().unwrap_or(0);

    for [key, aliases, name] in rows {
        println!(
            "{}{}  {}{}  {}",
            key,
            " ".repeat(key_width - key.width()),
            aliases,
            " ".repeat(alias_width - aliases.width()),
            name
        );
    }
}
