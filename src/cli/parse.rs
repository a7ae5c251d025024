//! CLI parse: clap types for rdcli. No behavior beyond flag translation.

use crate::config::Overrides;
use crate::output::{GlobalOptions, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// rdcli - Raindrop.io bookmarks from the terminal
#[derive(Debug, Parser)]
#[command(name = "rdcli")]
#[command(about = "Browse Raindrop.io collections, bookmarks, tags and highlights")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (default: plain on a terminal, json when piped)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print only record identifiers, one per line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log everything, including retry state transitions
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Request timeout in seconds (1-300)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Configuration file path (replaces the default config file lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            debug: self.debug,
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format,
            timeout_secs: self.timeout,
            no_color: self.no_color,
            verbose: self.verbose,
            debug: self.debug,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collections (folders)
    Collections {
        #[command(subcommand)]
        command: CollectionCommands,
    },
    /// Bookmarks
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
    /// Bookmarks marked as favorite
    Favorites {
        #[command(subcommand)]
        command: PagedListCommands,
    },
    /// Bookmarks in the trash
    Trash {
        #[command(subcommand)]
        command: PagedListCommands,
    },
    /// Tags
    Tags {
        #[command(subcommand)]
        command: ScopedListCommands,
    },
    /// Highlights
    Highlights {
        #[command(subcommand)]
        command: ScopedListCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommands {
    /// List root and nested collections
    List,
    /// Show collections as a tree
    Tree,
}

#[derive(Debug, Subcommand)]
pub enum BookmarkCommands {
    /// List bookmarks in a collection
    List {
        /// Collection id (0 = all, -1 = unsorted, -99 = trash)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        collection: i64,

        /// Search query
        #[arg(long)]
        search: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a single bookmark
    Get {
        /// Bookmark id
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum PagedListCommands {
    /// List bookmarks
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScopedListCommands {
    /// List entries, optionally limited to one collection
    List {
        /// Collection id
        #[arg(long, allow_negative_numbers = true)]
        collection: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PageArgs {
    /// Page number (0-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (max 50)
    #[arg(long)]
    pub per_page: Option<u32>,
}

impl PageArgs {
    /// Query pairs in the API's naming.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("perpage", per_page.to_string()));
        }
        query
    }
}
