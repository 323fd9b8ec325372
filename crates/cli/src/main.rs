use anyhow::Result;
use clap::{Parser, Subcommand};
use fragpatch::commands::{check_command, config_info_command, fix_command, init_command};
use fragpatch::init_logging;
use fragpatch_core::files::PatchOptions;

/// Inserts a missing closing fragment tag into a JSX/TSX file.
///
/// This CLI is a thin wrapper around `fragpatch-core` (exposed in code as
/// `fragpatch_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "fragpatch",
    version,
    about = "Insert a missing closing fragment tag (</>) after a closing element",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default `fragpatch.json` at the given root.
    Init {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// File to patch, relative to the root. Defaults to the orchestration page.
        #[arg(long)]
        target: Option<String>,

        /// Overwrite an existing config.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Insert the fragment marker at the first matching location.
    ///
    /// Only the first occurrence is patched per run. When the pattern is not
    /// found the file is left alone and a "No change" line is printed.
    Fix {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// File to patch. Overrides the config target.
        #[arg(long)]
        file: Option<String>,

        /// Config file (json, yaml, or yml). Defaults to `<root>/fragpatch.json` if present.
        #[arg(long)]
        config: Option<String>,

        /// Show what would change without writing.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Keep a timestamped `.bak` copy of the original.
        #[arg(long, default_value_t = false)]
        backup: bool,

        /// Exit non-zero when the pattern is not found.
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Report whether the target still needs the fragment marker.
    Check {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// File to inspect. Overrides the config target.
        #[arg(long)]
        file: Option<String>,

        /// Config file (json, yaml, or yml).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the resolved configuration, rule, and target.
    ConfigInfo {
        /// Project root directory. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Config file (json, yaml, or yml).
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Default to fixing the configured target if no command is provided.
    let command = cli.command.unwrap_or(Command::Fix {
        root: ".".to_string(),
        file: None,
        config: None,
        dry_run: false,
        backup: false,
        strict: false,
        json: false,
    });

    match command {
        Command::Init { root, target, force } => init_command(&root, target, force)?,
        Command::Fix { root, file, config, dry_run, backup, strict, json } => {
            let options = PatchOptions { dry_run, backup };
            fix_command(&root, file.as_deref(), config.as_deref(), options, strict, json)?;
        }
        Command::Check { root, file, config, json } => {
            check_command(&root, file.as_deref(), config.as_deref(), json)?;
        }
        Command::ConfigInfo { root, config, json } => {
            config_info_command(&root, config.as_deref(), json)?
        }
    }

    Ok(())
}
