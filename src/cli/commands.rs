use crate::config::StoreBackend;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(
    author,
    version,
    about = "A minimal Markdown blog authoring tool backed by a document store"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (searches upward for .mdblog.toml by default)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "MDBLOG_LOG_FILE")]
    pub log_file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new blog in the current directory
    Init {
        /// Where posts are stored
        #[arg(long, value_enum, default_value = "local")]
        backend: BackendArg,

        /// Firestore project id (firestore backend)
        #[arg(long)]
        project_id: Option<String>,

        /// Firestore collection holding the posts
        #[arg(long)]
        collection: Option<String>,

        /// Firestore REST base URL, e.g. an emulator at http://localhost:8080/v1
        #[arg(long)]
        base_url: Option<String>,
    },

    /// List all posts, newest first
    #[command(visible_alias = "ls")]
    List {
        /// Print raw Markdown instead of rendering it
        #[arg(long)]
        raw: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Publish a new post
    #[command(visible_alias = "new")]
    Publish {
        /// Title of the post
        title: String,

        /// Markdown content (use '-' to read from stdin)
        #[arg(short, long)]
        content: Option<String>,

        /// Read Markdown content from a file
        #[arg(long, conflicts_with = "content")]
        content_file: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a post permanently
    #[command(visible_alias = "rm")]
    Delete {
        /// Post ID
        id: String,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a Markdown file into a draft and export it as <title>.md
    Export {
        /// Draft title, used as the file name
        title: String,

        /// File whose text becomes the draft content
        #[arg(long)]
        content_file: String,

        /// Directory to write into (defaults to the current directory)
        #[arg(short, long)]
        out_dir: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive editor
    Tui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Local,
    Firestore,
}

impl From<BackendArg> for StoreBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => StoreBackend::Local,
            BackendArg::Firestore => StoreBackend::Firestore,
        }
    }
}
