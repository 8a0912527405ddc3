//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bitacora")]
#[command(about = "Journal and food log backed by a table and a document bucket", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Workspace directory (default: BITACORA_ROOT, then the nearest .bitacora upwards)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Without a command the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a workspace and create its table and bucket
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[arg(long)]
        region: Option<String>,

        #[arg(long)]
        table: Option<String>,

        #[arg(long)]
        bucket: Option<String>,
    },

    /// Create an entry
    New {
        #[arg(short, long)]
        title: Option<String>,

        /// Entry text (markdown)
        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Compose the content in the configured editor
        #[arg(short, long)]
        editor: bool,

        /// Start from the saved draft and clear it on success
        #[arg(long)]
        from_draft: bool,
    },

    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one entry in full
    Show { id: String },

    /// Change the title, content or tags of an entry
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        /// Comma-separated tags (replaces the current ones; "" clears them)
        #[arg(long)]
        tags: Option<String>,

        /// Edit the content in the configured editor
        #[arg(short, long)]
        editor: bool,
    },

    /// Delete an entry
    Delete { id: String },

    /// Entries written on a date (today, yesterday, a weekday, or YYYY-MM-DD)
    Date {
        #[arg(default_value = "today")]
        date: String,
    },

    /// Entries carrying a tag (case-sensitive)
    Tag { tag: String },

    /// Search by text, date window and tag
    Search {
        /// Case-insensitive text matched against title and content
        text: Option<String>,

        /// Date window: today, week, month
        #[arg(short, long, value_name = "WINDOW")]
        when: Option<String>,

        /// Exact tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// List every tag in use
    Tags,

    /// Show entry counts and the current streak
    Stats,

    /// List rendered documents in the bucket
    Documents {
        /// Path prefix, e.g. 2025-01-17/
        #[arg(default_value = "")]
        prefix: String,
    },

    /// Manage the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },

    /// Write every entry to stdout as a JSON array
    Export,

    /// Load entries from a JSON array written by export
    Import { file: PathBuf },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Answer one API-Gateway request read from stdin
    Api,

    /// Start the interactive menu
    Menu,
}

#[derive(Subcommand, Debug)]
pub enum DraftAction {
    /// Save a draft, replacing any previous one
    Save {
        #[arg(short, long, default_value = "")]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,

        #[arg(long, default_value = "")]
        tags: String,
    },

    /// Print the saved draft
    Show,

    /// Discard the saved draft
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_means_menu() {
        let cli = Cli::try_parse_from(["bitacora"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_root_after_subcommand() {
        let cli = Cli::try_parse_from(["bitacora", "list", "--root", "/tmp/j", "-n", "3"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/j")));
        assert!(matches!(cli.command, Some(Commands::List { limit: Some(3) })));
    }

    #[test]
    fn test_search_flags() {
        let cli =
            Cli::try_parse_from(["bitacora", "search", "avena", "--when", "week", "--tag", "x"])
                .unwrap();
        match cli.command {
            Some(Commands::Search { text, when, tag }) => {
                assert_eq!(text.as_deref(), Some("avena"));
                assert_eq!(when.as_deref(), Some("week"));
                assert_eq!(tag.as_deref(), Some("x"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
