use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Build stamp written by `build.rs`.
struct BuildInfo {
    version: &'static str,
    git_hash: &'static str,
    commit_date: &'static str,
    release: bool,
}

impl BuildInfo {
    const CURRENT: BuildInfo = BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        commit_date: env!("GIT_COMMIT_DATE"),
        release: matches!(env!("IS_RELEASE").as_bytes(), b"true"),
    };

    /// `0.3.2` for releases and builds outside git, `0.3.2@abc1234 2024-01-15` otherwise.
    fn describe(&self) -> String {
        if self.release || self.git_hash.is_empty() {
            self.version.to_string()
        } else {
            format!("{}@{} {}", self.version, self.git_hash, self.commit_date)
        }
    }
}

fn mmset_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| BuildInfo::CURRENT.describe())
}

#[derive(Parser, Debug)]
#[command(name = "mmset", bin_name = "mmset", version = mmset_version())]
#[command(about = "Inspect and edit mind-map settings in markdown files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the global settings.json (default: $MMSET_CONFIG_DIR or the OS config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the mind-map code blocks in a file
    #[command(alias = "ls")]
    Blocks {
        /// Markdown file
        file: PathBuf,
    },

    /// Print the effective settings as JSON
    Show {
        /// Markdown file
        file: PathBuf,

        /// Code block ordinal (omit for the document level)
        #[arg(short, long)]
        block: Option<usize>,
    },

    /// Print a single effective setting and the scope it comes from
    Get {
        /// Markdown file
        file: PathBuf,

        /// Setting name (e.g. lineHeight)
        key: String,

        /// Code block ordinal (omit for the document level)
        #[arg(short, long)]
        block: Option<usize>,
    },

    /// Store a setting in the file or block header
    Set {
        /// Markdown file
        file: PathBuf,

        /// Setting name (e.g. height)
        key: String,

        /// Value, read as a YAML scalar
        #[arg(allow_negative_numbers = true)]
        value: String,

        /// Code block ordinal (omit for the document header)
        #[arg(short, long)]
        block: Option<usize>,
    },

    /// Remove a setting from the file or block header
    #[command(alias = "rm")]
    Unset {
        /// Markdown file
        file: PathBuf,

        /// Setting name
        key: String,

        /// Code block ordinal (omit for the document header)
        #[arg(short, long)]
        block: Option<usize>,
    },

    /// Replay drag deltas on a block's height and commit the result
    Resize {
        /// Markdown file
        file: PathBuf,

        /// Code block ordinal
        #[arg(short, long)]
        block: usize,

        /// Height deltas in pixels (e.g. 10 -4 12)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        deltas: Vec<f64>,
    },

    /// Get or set global settings
    Config {
        /// Setting name (omit to print all)
        key: Option<String>,

        /// Value to store, read as a YAML scalar
        #[arg(allow_negative_numbers = true)]
        value: Option<String>,

        /// Restore the setting's default
        #[arg(long, requires = "key", conflicts_with = "value")]
        unset: bool,
    },
}
