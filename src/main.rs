// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::sync::Arc;

use transrelay::app_config::{Config, LogLevel};
use transrelay::server;
use transrelay::translation::{TranslationRequest, TranslationResolver};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP relay (default command)
    Serve,

    /// Translate a single text and print the result
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Source language code (e.g., 'en', 'es', or 'auto')
        #[arg(short, long)]
        source_language: Option<String>,

        /// Target language code (e.g., 'fr', 'de', 'ja')
        #[arg(short, long)]
        target_language: Option<String>,
    },

    /// Generate shell completions for transrelay
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// transrelay - translation relay with a dictionary fallback
#[derive(Parser, Debug)]
#[command(name = "transrelay")]
#[command(version)]
#[command(about = "Translation relay with a dictionary fallback")]
#[command(long_about = "transrelay serves the /api/translate route of the translation UI.
It asks the MyMemory service first and answers from a built-in phrase
dictionary whenever the service is unreachable or returns garbage.

EXAMPLES:
    transrelay                                  # Serve on the configured address
    transrelay --port 8080 serve                # Serve on another port
    transrelay translate -t fr hello            # One-shot translation
    transrelay --offline translate -t de 'thank you'
    transrelay completions bash > transrelay.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't
    exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Address to bind
    #[arg(long, env = "HOST", global = true)]
    host: Option<String>,

    /// Port to bind
    #[arg(long, env = "PORT", global = true)]
    port: Option<u16>,

    /// Skip the external service and answer from the dictionary only
    #[arg(long, global = true)]
    offline: bool,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "❌ "),
            Level::Warn => ("\x1B[1;33m", "🚧 "),
            Level::Info => ("\x1B[1;32m", " "),
            Level::Debug => ("\x1B[1;36m", "🔍 "),
            Level::Trace => ("\x1B[1;35m", "📋 "),
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
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(std::io::stderr(), "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "transrelay", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let resolver = Arc::new(TranslationResolver::from_config(&config)?);

    match cli.command {
        Some(Commands::Translate { text, source_language, target_language }) => {
            let request = TranslationRequest::new(
                text,
                target_language.unwrap_or_else(|| config.default_target_language.clone()),
            )
            .with_source(source_language.unwrap_or_else(|| config.default_source_language.clone()));

            let result = resolver.resolve(&request).await?;
            info!("Provenance: {}", result.provenance);
            println!("{}", result.translated_text);
            Ok(())
        }
        Some(Commands::Serve) | None => server::serve(&config.server, resolver).await,
        Some(Commands::Completions { .. }) => Ok(()),
    }
}

/// Load or create the configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)
        .with_context(|| format!("Failed to load configuration from {}", cli.config_path))?;

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.offline {
        config.provider.enabled = false;
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
