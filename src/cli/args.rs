use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// QuickClean — find and safely reclaim disk space
#[derive(Parser, Debug)]
#[command(
    name = "quickclean",
    version,
    about = "Find and safely reclaim disk space",
    long_about = "QuickClean scans for cache directories, developer tool caches,\n\
                  leftover files from uninstalled apps, oversized files, and\n\
                  byte-identical duplicates, then removes them safely (trash by default).",
    after_help = "EXAMPLES:\n  \
        quickclean quick                       Run all five scanners in parallel\n  \
        quickclean caches --system             Include /Library/Caches\n  \
        quickclean dev                         Probe developer cache catalog\n  \
        quickclean orphans                     Find leftovers from uninstalled apps\n  \
        quickclean large ~/Downloads --min-size 500   Files over 500 MB\n  \
        quickclean dup ~/Pictures ~/Desktop    Duplicates across two trees\n  \
        quickclean clean ~/.npm                Empty a dev cache in place\n  \
        quickclean delete ~/Library/Caches/com.old.app   Move to trash\n  \
        quickclean quick --format json         Machine-readable output"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (defaults to the configured preference)
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (enables debug logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output, no progress
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run all five scanners in parallel and summarize
    Quick,

    /// Scan cache directories
    Caches {
        /// Also scan the system-wide caches root
        #[arg(long)]
        system: bool,
    },

    /// Probe known developer tool cache locations
    Dev,

    /// Find leftover files from uninstalled applications
    Orphans,

    /// Find large files
    Large {
        /// Directory to scan (defaults to common user directories)
        path: Option<PathBuf>,

        /// Minimum file size in MB
        #[arg(long, value_name = "MB")]
        min_size: Option<u64>,

        /// Restrict to categories (video, image, audio, archive,
        /// document, application, disk-image, other)
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,
    },

    /// Find byte-identical duplicate files
    Dup {
        /// Directories to scan (defaults to common user directories)
        paths: Vec<PathBuf>,

        /// Minimum file size in MB
        #[arg(long, value_name = "MB")]
        min_size: Option<u64>,

        /// Show every file in each group
        #[arg(long)]
        detailed: bool,
    },

    /// Empty a developer cache directory in place (keeps the directory)
    Clean {
        /// Cache directory to clean
        path: PathBuf,
    },

    /// Remove a file or directory found by a scan
    Delete {
        /// Path to remove
        path: PathBuf,

        /// Permanently delete instead of moving to trash
        #[arg(long)]
        permanent: bool,
    },

    /// Reveal a path in the file browser
    Reveal {
        /// Path to reveal
        path: PathBuf,
    },

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Write the default configuration file
    Init,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
