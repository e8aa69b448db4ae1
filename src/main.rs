// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use argstash::app_config::{self, Config, StorageBackend};
use argstash::database::open_repository;
use argstash::{ArgumentPair, CombinePolicy, Combiner, Controller, RepositoryScope};

/// CLI Wrapper for StorageBackend to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStorageBackend {
    Memory,
    Json,
    Sqlite,
}

impl From<CliStorageBackend> for StorageBackend {
    fn from(cli_backend: CliStorageBackend) -> Self {
        match cli_backend {
            CliStorageBackend::Memory => StorageBackend::Memory,
            CliStorageBackend::Json => StorageBackend::Json,
            CliStorageBackend::Sqlite => StorageBackend::Sqlite,
        }
    }
}

/// CLI Wrapper for CombinePolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliCombinePolicy {
    NumericSum,
    Concatenate,
}

impl From<CliCombinePolicy> for CombinePolicy {
    fn from(cli_policy: CliCombinePolicy) -> Self {
        match cli_policy {
            CliCombinePolicy::NumericSum => CombinePolicy::NumericSum,
            CliCombinePolicy::Concatenate => CombinePolicy::Concatenate,
        }
    }
}

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
    /// Run the interactive menu (default command)
    Interactive,

    /// Print stored argument pairs and exit
    List,

    /// Combine two arguments without storing them
    Combine {
        /// First argument
        arg1: String,
        /// Second argument
        arg2: String,
    },

    /// Generate shell completions for argstash
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// argstash - keep and combine argument pairs
#[derive(Parser, Debug)]
#[command(name = "argstash")]
#[command(version)]
#[command(about = "Capture, persist and combine pairs of arguments")]
#[command(long_about = "argstash asks for two arguments, stores every accepted pair, lists the history and combines the current pair.

EXAMPLES:
    argstash                              # Interactive menu using conf.json
    argstash -b json -d ./pairs.jsonl     # Store pairs in a JSON-lines file
    argstash list                         # Print stored pairs
    argstash combine 3 4                  # Prints 7
    argstash completions bash > argstash.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Storage backend to use
    #[arg(short, long, value_enum, global = true)]
    backend: Option<CliStorageBackend>,

    /// Storage file path (database or JSON-lines file)
    #[arg(short, long, global = true)]
    database_path: Option<PathBuf>,

    /// How the add action combines the arguments
    #[arg(short, long, value_enum, global = true)]
    policy: Option<CliCombinePolicy>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet until the config says otherwise
    CustomLogger::init(LevelFilter::Warn)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "argstash", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;

    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Some(Commands::Combine { arg1, arg2 }) => {
            let pair = ArgumentPair::from_parts(&arg1, &arg2, config.session.max_argument_length)?;
            let combiner = Combiner::new(config.combine_policy);
            println!("{}", combiner.combine(pair.first(), pair.second()));
            Ok(())
        }
        Some(Commands::List) => run_list(&config).await,
        Some(Commands::Interactive) | None => run_interactive(&config).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;

    if let Some(backend) = &cli.backend {
        config.storage.backend = backend.clone().into();
    }

    if let Some(path) = &cli.database_path {
        config.storage.path = Some(path.clone());
    }

    if let Some(policy) = &cli.policy {
        config.combine_policy = policy.clone().into();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    Ok(config)
}

async fn run_list(config: &Config) -> Result<()> {
    let scope = RepositoryScope::new(open_repository(&config.storage)?);

    let records = scope.repository().get_all().await?;
    if records.is_empty() {
        println!("No records stored yet.");
    }
    for record in &records {
        println!("{}", record);
    }

    scope.close()?;
    Ok(())
}

async fn run_interactive(config: &Config) -> Result<()> {
    info!("Using {} storage", config.storage.backend);

    let scope = RepositoryScope::new(open_repository(&config.storage)?);
    let mut controller = Controller::with_config(scope.repository(), config);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let session = controller.run(&mut input, &mut output).await;

    // Close before reporting a session error so disposal is never skipped
    scope.close().context("Failed to close storage")?;
    session?;

    Ok(())
}
