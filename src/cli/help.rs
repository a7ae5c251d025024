//! Command-name contract used in log fields.

use crate::cli::parse::{BookmarkCommands, CollectionCommands, Commands};

/// Dotted command name (e.g. "collections.tree", "bookmarks.get").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Collections { command } => match command {
            CollectionCommands::List => "collections.list",
            CollectionCommands::Tree => "collections.tree",
        },
        Commands::Bookmarks { command } => match command {
            BookmarkCommands::List { .. } => "bookmarks.list",
            BookmarkCommands::Get { .. } => "bookmarks.get",
        },
        Commands::Favorites { .. } => "favorites.list",
        Commands::Trash { .. } => "trash.list",
        Commands::Tags { .. } => "tags.list",
        Commands::Highlights { .. } => "highlights.list",
    }
}
