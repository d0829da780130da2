mod browser;
mod input;
mod logging;
mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use kbnode_core::{
    Clock, CreationRequest, Error as CoreError, FixedClock, LinkOpener, NODE_DIR, NODE_EXTENSION,
    NodeDocument, NodeId, NoopOpener, SubmitError, Submission, Submitter, SystemClock,
    parse_document,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use browser::SystemBrowser;
use input::read_node_text;
use settings::{DEFAULT_CONFIG_FILE, KbConfig, load_or_default, save_config};

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] settings::SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(name = "kbnode", version, about = "Compose knowledge-base nodes as pre-filled new-file links")]
struct Cli {
    /// Path to the kbnode config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Log pipeline events to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a node and open its link in the browser.
    New(NewArgs),
    /// Print the node document and link without opening anything.
    Preview(ComposeArgs),
    /// Verify that a node file follows the front matter format.
    Check(CheckArgs),
    /// Inspect or create the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Node text. Read from stdin when omitted or `-`.
    #[arg(value_name = "TEXT")]
    text: Vec<String>,
    /// Seed for the identifier generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Use this node id instead of generating one.
    #[arg(long, value_name = "ID", conflicts_with = "seed")]
    id: Option<String>,
    /// Creation instant (RFC 3339) instead of the current time.
    #[arg(long, value_name = "INSTANT")]
    created: Option<String>,
}

#[derive(Args, Debug)]
struct NewArgs {
    #[command(flatten)]
    compose: ComposeArgs,
    /// Print the link without opening a browser.
    #[arg(long, default_value_t = false)]
    no_open: bool,
    /// Print the creation request and link as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Node file to check, e.g. kb/<id>.md.
    file: PathBuf,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the effective config.
    Show,
}

type CliSubmitter = Submitter<Box<dyn Clock>, Box<dyn RngCore>, Box<dyn LinkOpener>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Submit(err)) => {
            eprintln!("warning: {err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::New(args) => run_new(&cli.config, args),
        Command::Preview(args) => run_preview(&cli.config, args),
        Command::Check(args) => run_check(args),
        Command::Config(ConfigCommand::Init { force }) => run_config_init(&cli.config, force),
        Command::Config(ConfigCommand::Show) => run_config_show(&cli.config),
    }
}

fn run_new(config_path: &Path, args: NewArgs) -> Result<(), CliError> {
    let NewArgs {
        compose,
        no_open,
        json,
    } = args;

    let config = load_or_default(config_path)?;
    let opener: Box<dyn LinkOpener> = if no_open {
        Box::new(NoopOpener)
    } else {
        Box::new(SystemBrowser::new(config.browser.clone()))
    };

    let submission = compose_node(&config, compose, opener)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    } else {
        println!("{}", submission.url);
    }

    if !no_open && !submission.opened {
        eprintln!("warning: could not open a browser, use the link above");
    }

    Ok(())
}

fn run_preview(config_path: &Path, args: ComposeArgs) -> Result<(), CliError> {
    let config = load_or_default(config_path)?;
    let submission = compose_node(&config, args, Box::new(NoopOpener))?;
    let CreationRequest {
        path,
        content,
        message,
        ..
    } = &submission.request;

    println!("{content}");
    println!();
    println!("path:    {path}");
    println!("message: {message}");
    println!("url:     {}", submission.url);
    Ok(())
}

fn compose_node(
    config: &KbConfig,
    args: ComposeArgs,
    opener: Box<dyn LinkOpener>,
) -> Result<Submission, CliError> {
    let ComposeArgs {
        text,
        seed,
        id,
        created,
    } = args;

    let id = id.as_deref().map(NodeId::parse).transpose()?;
    let clock: Box<dyn Clock> = match created.as_deref() {
        Some(value) => Box::new(FixedClock(parse_instant(value)?)),
        None => Box::new(SystemClock),
    };
    let rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let raw = read_node_text(&text)?;
    let mut submitter: CliSubmitter =
        Submitter::new(config.destination.clone(), clock, rng, opener);

    let submission = match id {
        Some(id) => submitter.submit_as(&raw, id)?,
        None => submitter.submit(&raw)?,
    };
    Ok(submission)
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| CliError::InvalidArgs(format!("--created {value}: {err}")))
}

fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let document = check_node_file(&args.file)?;
    tracing::info!(event = "node_checked", node_id = %document.id);
    println!("ok {} created {}", document.id, document.created);
    Ok(())
}

/// Parse a node file and require it to live at `kb/<id>.md`.
fn check_node_file(path: &Path) -> Result<NodeDocument, CliError> {
    let text = std::fs::read_to_string(path)?;
    let document = parse_document(&text)?;

    let expected_name = format!("{}.{NODE_EXTENSION}", document.id);
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if file_name != expected_name {
        return Err(CliError::InvalidArgs(format!(
            "file name {} does not match node id, expected {expected_name}",
            path.display()
        )));
    }

    let resolved = path.canonicalize()?;
    let dir_name = resolved
        .parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if dir_name != NODE_DIR {
        return Err(CliError::InvalidArgs(format!(
            "{} is not inside a {NODE_DIR}/ directory",
            path.display()
        )));
    }

    Ok(document)
}

fn run_config_init(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "{} already exists, pass --force to overwrite",
            config_path.display()
        )));
    }
    save_config(config_path, &KbConfig::default())?;
    tracing::info!(event = "config_written", path = %config_path.display());
    println!("wrote {}", config_path.display());
    Ok(())
}

fn run_config_show(config_path: &Path) -> Result<(), CliError> {
    let config = load_or_default(config_path)?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
