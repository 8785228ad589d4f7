// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::{Config, Credentials};
use crate::app_controller::Controller;
use crate::database::{DatabaseConnection, Repository};
use crate::server::Server;

mod app_config;
mod app_controller;
mod content;
mod database;
mod errors;
mod prompt;
mod providers;
mod resolver;
mod server;
mod vocabulary;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a flashcard for a word (default command)
    #[command(alias = "new")]
    Create(CreateArgs),

    /// List the most recent cards in the deck
    Deck {
        /// Maximum number of cards to show
        #[arg(short, long, default_value_t = 20)]
        limit: u32,
    },

    /// Show one card as JSON
    Show {
        /// Card id
        id: i64,
    },

    /// Serve the deck over HTTP
    Serve {
        /// Bind address, overriding the configured one
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Generate shell completions for lexicard
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Word or phrase to make a card for
    #[arg(value_name = "WORD")]
    word: String,

    /// Category hint used in image queries (e.g. 'object', 'action')
    #[arg(short = 'C', long)]
    category: Option<String>,

    /// Keyword hints used in image queries
    #[arg(short, long)]
    keyword: Vec<String>,

    /// Source language code (e.g. 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ja', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,
}

/// Lexicard - vocabulary flashcards with generated media
///
/// Creates language-learning flashcards: a translation and a picture for each
/// word, fetched from chains of providers that degrade gracefully to local
/// stand-ins when the network or the credentials are missing.
#[derive(Parser, Debug)]
#[command(name = "lexicard")]
#[command(version = "0.1.0")]
#[command(about = "Vocabulary flashcards with generated media")]
#[command(long_about = "Lexicard builds vocabulary flashcards: each word gets a translation and a
picture, produced by ordered provider chains that fall back to a local
placeholder when every provider fails.

EXAMPLES:
    lexicard book                               # Create a card for 'book'
    lexicard create book -C object -k reading   # With image query hints
    lexicard -t fr book                         # Translate to French instead
    lexicard deck --limit 10                    # Show the 10 newest cards
    lexicard show 3                             # Print card #3 as JSON
    lexicard serve                              # Start the HTTP API
    lexicard completions bash > lexicard.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

CREDENTIALS (environment variables, all optional):
    HUGGINGFACE_API_TOKEN  - HuggingFace inference token
    PIXABAY_API_KEY        - Pixabay API key
    LEXICARD_LLM_API_KEY   - Key for the OpenAI-compatible endpoint

    A missing credential disables that provider; the chain moves on to the
    next one.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word or phrase to make a card for
    #[arg(value_name = "WORD")]
    word: Option<String>,

    /// Category hint used in image queries
    #[arg(short = 'C', long)]
    category: Option<String>,

    /// Keyword hints used in image queries
    #[arg(short, long)]
    keyword: Vec<String>,

    /// Source language code (e.g. 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g. 'ja', 'fr', 'es')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lexicard", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Create(args)) => {
            let config = load_config(&cli.config_path, &cli.log_level, |config| {
                apply_create_overrides(config, &args);
            })?;
            run_create(config, args).await
        }
        Some(Commands::Deck { limit }) => {
            let config = load_config(&cli.config_path, &cli.log_level, |_| {})?;
            run_deck(config, limit).await
        }
        Some(Commands::Show { id }) => {
            let config = load_config(&cli.config_path, &cli.log_level, |_| {})?;
            run_show(config, id).await
        }
        Some(Commands::Serve { bind }) => {
            let mut config = load_config(&cli.config_path, &cli.log_level, |_| {})?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            run_serve(config).await
        }
        None => {
            // Default behavior - treat a bare word as `create`
            let word = cli.word.clone().ok_or_else(|| {
                anyhow::anyhow!("WORD is required when no subcommand is specified")
            })?;

            let args = CreateArgs {
                word,
                category: cli.category.clone(),
                keyword: cli.keyword.clone(),
                source_language: cli.source_language.clone(),
                target_language: cli.target_language.clone(),
            };

            let config = load_config(&cli.config_path, &cli.log_level, |config| {
                apply_create_overrides(config, &args);
            })?;
            run_create(config, args).await
        }
    }
}

/// Load the configuration, creating a default file when none exists, then
/// apply CLI overrides and adjust the log level
fn load_config(
    config_path: &str,
    log_level: &Option<CliLogLevel>,
    apply_overrides: impl FnOnce(&mut Config),
) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(level) = log_level {
        config.log_level = level.clone().into();
    }
    apply_overrides(&mut config);

    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.into());

    Ok(config)
}

/// Apply create-command language overrides onto the loaded configuration
fn apply_create_overrides(config: &mut Config, args: &CreateArgs) {
    if let Some(source) = &args.source_language {
        config.source_language = source.clone();
    }
    if let Some(target) = &args.target_language {
        config.target_language = target.clone();
    }
}

/// Open the repository at the configured (or default) database location
fn open_repository(config: &Config) -> Result<Repository> {
    let db = match &config.storage.database_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    Ok(Repository::new(db))
}

async fn run_create(config: Config, args: CreateArgs) -> Result<()> {
    let repository = open_repository(&config)?;
    let credentials = Credentials::from_env();
    let controller = Controller::new(config, &credentials, repository);

    let request = controller.request_for(&args.word, args.category, args.keyword);
    let outcome = controller.create_card(request).await?;

    let card = &outcome.card;
    println!(
        "Card #{}: {} -> {}",
        card.id.unwrap_or_default(),
        card.source_text,
        card.target_text
    );
    if let Some(kana) = &card.kana {
        println!("  kana:   {}", kana);
    }
    if let Some(romaji) = &card.romaji {
        println!("  romaji: {}", romaji);
    }
    if let Some(path) = &card.image_path {
        println!("  image:  {} ({})", path, card.image_provider);
    }
    println!("  translated by: {}", card.translation_provider);

    if !outcome.diagnostics.is_empty() {
        println!("  provider fallbacks:");
        for diagnostic in &outcome.diagnostics {
            println!("    - {}", diagnostic);
        }
    }

    Ok(())
}

async fn run_deck(config: Config, limit: u32) -> Result<()> {
    let repository = open_repository(&config)?;
    let cards = repository.list_recent(limit).await?;

    if cards.is_empty() {
        println!("The deck is empty.");
        return Ok(());
    }

    for card in cards {
        println!(
            "#{:<4} {:<20} {:<20} [{} / {}]",
            card.id.unwrap_or_default(),
            card.source_text,
            card.target_text,
            card.translation_provider,
            card.image_provider
        );
    }

    Ok(())
}

async fn run_show(config: Config, id: i64) -> Result<()> {
    let repository = open_repository(&config)?;

    match repository.get(id).await? {
        Some(card) => {
            println!("{}", serde_json::to_string_pretty(&card)?);
            Ok(())
        }
        None => Err(anyhow::anyhow!("No card with id {}", id)),
    }
}

async fn run_serve(config: Config) -> Result<()> {
    let repository = open_repository(&config)?;
    let credentials = Credentials::from_env();
    let bind = config.server.bind.clone();
    let controller = Arc::new(Controller::new(config, &credentials, repository));

    let server = Server::bind(&bind, controller).await?;
    server.run().await
}
