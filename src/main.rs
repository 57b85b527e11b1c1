use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::bail;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use reposort::commands;
use reposort::output::{Output, OutputFormat, print_error};
use reposort::types::Config;

#[derive(Parser)]
#[command(name = "reposort")]
#[command(about = "Organize git repositories into a host/path layout derived from their origin URL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort repositories into the host/path layout
    #[command(visible_alias = "organize")]
    Sort {
        /// Source directory containing git repositories
        #[arg(long, default_value = ".")]
        source: PathBuf,

        /// Target base directory (default: configured target, or ~/code)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Show what would be done without making changes
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show repositories under a directory
    Status {
        /// Directory to scan (default: current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Clone a repository into its canonical location
    Clone {
        /// Remote URL to clone
        url: String,

        /// Target base directory (default: configured target, or ~/code)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Disable fsck checks during clone (for repos with malformed objects)
        #[arg(long)]
        no_fsck: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let out = Output::new(format, cli.verbose);

    if let Err(e) = run(cli, &out) {
        print_error(&e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli, out: &Output) -> anyhow::Result<()> {
    if let Commands::Completion { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = Config::load_default();

    match cli.command {
        Commands::Sort {
            source,
            target,
            dry_run,
            yes,
        } => {
            let opts = commands::sort::SortOptions {
                source,
                target: resolve_target(target, &config)?,
                dry_run,
                yes,
            };
            commands::sort(opts, out)
        }

        Commands::Status { dir } => {
            let opts = commands::status::StatusOptions {
                dir: dir.unwrap_or_else(|| PathBuf::from(".")),
            };
            commands::status(opts, out)
        }

        Commands::Clone {
            url,
            target,
            no_fsck,
        } => {
            let opts = commands::clone::CloneOptions {
                url,
                target: resolve_target(target, &config)?,
                no_fsck: no_fsck || config.no_fsck,
            };
            commands::clone(opts, out)
        }

        Commands::Completion { .. } => unreachable!(),
    }
}

/// Target base directory: --target flag, then config, then ~/code
fn resolve_target(flag: Option<PathBuf>, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(target) = flag {
        return Ok(target);
    }
    if let Some(target) = &config.target {
        return Ok(target.clone());
    }
    match env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join("code")),
        None => bail!("cannot determine target directory: pass --target or set it in the config"),
    }
}

fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
