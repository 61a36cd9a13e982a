//! githell: bulk status, pull, push, commit and checkout across sibling git repositories

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use githell::commands::{
    handle_bulk_command, handle_debug_command, handle_status_command, BulkRequest,
    MessagePrompt, NoPrompt, Operation, TerminalPrompt,
};
use githell::core::{get_git_concurrency, RunConfig, UnpushedStrategy, DEFAULT_REMOTE};
use githell::error::UsageError;
use githell::git::SystemGit;
use githell::utils::{RenderConfig, Renderer};

const TIMEOUT_HELP: &str = "Time limit in seconds for each git invocation [default: 180]";
const DEFAULT_LOG_FILTER: &str = "githell=warn";
const VERBOSE_LOG_FILTER: &str = "githell=debug";

// Exit codes
const EXIT_FAILED_REPOS: u8 = 1;
const EXIT_USAGE: u8 = 2;

fn build_cli() -> ClapCommand {
    ClapCommand::new("githell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and drive every git repository directly under a directory")
        .arg(
            Arg::new("operation")
                .required(true)
                .value_name("OPERATION")
                .help("status (or list), debug, pull, push, commit, checkout"),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("TEXT")
                .help("Commit message; prompted for when omitted"),
        )
        .arg(
            Arg::new("branch")
                .short('b')
                .long("branch")
                .value_name("NAME")
                .allow_hyphen_values(true)
                .help("Branch for checkout"),
        )
        .arg(
            Arg::new("new")
                .long("new")
                .help("Create the checkout branch (git checkout -b)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory whose subdirectories are scanned [default: current directory]"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .value_name("N")
                .value_parser(clap::value_parser!(usize))
                .help("Repositories processed at once [default: CPU cores + 2, max 12]"),
        )
        .arg(
            Arg::new("sequential")
                .long("sequential")
                .help("Process one repository at a time")
                .conflicts_with("jobs")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .help(TIMEOUT_HELP),
        )
        .arg(
            Arg::new("remote")
                .long("remote")
                .value_name("NAME")
                .default_value(DEFAULT_REMOTE)
                .help("Remote used when push has to set an upstream"),
        )
        .arg(
            Arg::new("legacy-unpushed")
                .long("legacy-unpushed")
                .help("Detect unpushed commits from the `git status` summary text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Exit with status 1 when any repository reports [failed]")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable styled output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show failure reasons and debug logging")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore a second initialisation; only the first subscriber matters
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run_config(matches: &ArgMatches) -> Result<RunConfig> {
    let root = match matches.get_one::<PathBuf>("root") {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to determine the current directory")?,
    };

    let mut config = RunConfig::new(root);
    config.jobs = get_git_concurrency(
        matches.get_one::<usize>("jobs").copied(),
        matches.get_flag("sequential"),
    );
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*secs);
    }
    if let Some(remote) = matches.get_one::<String>("remote") {
        config.remote = remote.clone();
    }
    if matches.get_flag("legacy-unpushed") {
        config.unpushed_strategy = UnpushedStrategy::StatusSummary;
    }
    config.strict = matches.get_flag("strict");
    config.verbose = matches.get_flag("verbose");
    Ok(config)
}

async fn run(matches: &ArgMatches) -> Result<ExitCode> {
    let operation: Operation = matches
        .get_one::<String>("operation")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;

    let config = run_config(matches)?;
    tracing::debug!(%operation, root = %config.root.display(), jobs = config.jobs, "starting");

    let git = SystemGit::new(config.timeout);
    let renderer = Renderer::new(RenderConfig::detect(matches.get_flag("no-color")));
    let mut stdout = std::io::stdout().lock();

    match operation {
        Operation::Status => {
            handle_status_command(&git, &config, &renderer, &mut stdout).await?;
        }
        Operation::Debug => {
            handle_debug_command(&git, &config, &mut stdout).await?;
        }
        _ => {
            let request = BulkRequest {
                message: matches.get_one::<String>("message").cloned(),
                branch: matches.get_one::<String>("branch").cloned(),
                create: matches.get_flag("new"),
            };
            let prompt: &dyn MessagePrompt = if std::io::stdin().is_terminal() {
                &TerminalPrompt
            } else {
                &NoPrompt
            };
            let statistics = handle_bulk_command(
                &git, &config, operation, request, &renderer, prompt, &mut stdout,
            )
            .await?;

            if config.strict && statistics.has_failures() {
                stdout.flush()?;
                return Ok(ExitCode::from(EXIT_FAILED_REPOS));
            }
        }
    }

    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            if let Some(usage) = e.downcast_ref::<UsageError>() {
                eprintln!("{usage}");
                ExitCode::from(EXIT_USAGE)
            } else {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }
}
