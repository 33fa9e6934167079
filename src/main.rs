#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;

use weblingo::app_config::{self, Config, NlpProvider, TranslatorKind};
use weblingo::Controller;

/// CLI Wrapper for NlpProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Ollama,
    Anthropic,
}

impl From<CliProvider> for NlpProvider {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Ollama => NlpProvider::Ollama,
            CliProvider::Anthropic => NlpProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for TranslatorKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslator {
    Google,
    Llm,
}

impl From<CliTranslator> for TranslatorKind {
    fn from(cli_translator: CliTranslator) -> Self {
        match cli_translator {
            CliTranslator::Google => TranslatorKind::Google,
            CliTranslator::Llm => TranslatorKind::Llm,
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

/// Options shared by every command that loads the configuration
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// LLM provider for sentiment and summarization
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Model name for the LLM provider
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Args, Debug)]
struct ProcessArgs {
    /// Web page to process
    #[arg(value_name = "URL")]
    url: String,

    /// Target language menu option (see `weblingo languages`)
    #[arg(short, long, default_value = "")]
    language: String,

    /// Summarize before translating
    #[arg(short, long)]
    summarize: bool,

    /// Translation backend
    #[arg(short, long, value_enum)]
    translator: Option<CliTranslator>,

    /// Directory reports are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract, gate, optionally summarize, translate and render a web page
    Process(ProcessArgs),

    /// Summarize a text file, or standard input when no file is given
    Summarize {
        /// Text file to summarize
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Print the target language menu
    Languages {
        /// Configuration file path
        #[arg(short, long, default_value = "conf.json")]
        config_path: PathBuf,
    },

    /// Generate shell completions for weblingo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// weblingo - web page summarization and translation
///
/// Extracts the paragraph text of a web page, refuses harsh content,
/// optionally summarizes it and translates it into a language from a
/// numbered menu, then writes a Markdown report.
#[derive(Parser, Debug)]
#[command(name = "weblingo")]
#[command(version)]
#[command(about = "Summarize and translate web pages")]
#[command(long_about = "weblingo extracts paragraph text from a web page, checks its sentiment, \
optionally summarizes it and translates it into the chosen language.

EXAMPLES:
    weblingo process https://example.com/article -l 2            # Translate to Hindi
    weblingo process https://example.com/article -l 1 --summarize # Summarize, then translate to Tamil
    weblingo summarize notes.txt                                  # Summarize a local file
    weblingo languages                                            # Show the language menu
    weblingo completions bash > weblingo.bash                     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
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
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "weblingo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Languages { config_path } => {
            let config = Config::load_or_create(&config_path)?;
            config.languages.validate().context("Invalid language menu")?;
            for line in config.languages.describe() {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Process(args) => run_process(args).await,
        Commands::Summarize { file, common } => run_summarize(file, common).await,
    }
}

/// Load the configuration, apply CLI overrides, validate it and set the log level
fn load_config(common: &CommonArgs, apply: impl FnOnce(&mut Config)) -> Result<Config> {
    if let Some(level) = &common.log_level {
        log::set_max_level(app_config::LogLevel::from(level.clone()).to_level_filter());
    }

    let mut config = Config::load_or_create(&common.config_path)?;

    if let Some(provider) = &common.provider {
        config.nlp.provider = provider.clone().into();
    }
    if let Some(model) = &common.model {
        config.nlp.set_model(model.clone());
    }
    if let Some(level) = &common.log_level {
        config.log_level = level.clone().into();
    }
    apply(&mut config);

    config.validate().context("Configuration validation failed")?;

    if common.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}

async fn run_process(args: ProcessArgs) -> Result<()> {
    let config = load_config(&args.common, |config| {
        if let Some(translator) = &args.translator {
            config.nlp.translator = translator.clone().into();
        }
        if let Some(output_dir) = &args.output_dir {
            config.pipeline.output_dir = output_dir.clone();
        }
    })?;

    let controller = Controller::with_config(config)?;
    let processed = controller.process_url(&args.url, &args.language, args.summarize).await?;

    let report = &processed.report;
    println!("Original ({} characters):\n{}\n", report.original.chars().count(), report.original);
    if let Some(summary) = &report.summarized {
        println!("Summary:\n{}\n", summary);
    }
    println!("Translation ({}):\n{}\n", report.target_language, report.translated);
    info!("Report {} saved to {}", processed.report_id, processed.report_path.display());

    Ok(())
}

async fn run_summarize(file: Option<PathBuf>, common: CommonArgs) -> Result<()> {
    let config = load_config(&common, |_| {})?;

    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read standard input")?;
            buffer
        }
    };

    let controller = Controller::with_config(config)?;
    let summary = controller.summarize_text(&text).await?;
    println!("{}", summary.text);

    if summary.failed_chunks() > 0 {
        info!("{} of {} chunks could not be summarized", summary.failed_chunks(), summary.chunks.len());
    }

    Ok(())
}
