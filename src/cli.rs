//! CLI domain: parse, route, columns, help, and output only.
//! No domain logic; the single route table calls the HTTP client and the output layer.

mod columns;
mod help;
mod output;
mod parse;
mod route;

pub use columns::{bookmark_columns, collection_columns, highlight_columns, tag_columns};
pub use help::command_name;
pub use output::map_error;
pub use parse::{
    BookmarkCommands, Cli, CollectionCommands, Commands, PageArgs, PagedListCommands,
    ScopedListCommands,
};
pub use route::{unwrap_items, RunContext, ALL_COLLECTIONS, FAVORITES_SEARCH, TRASH_COLLECTION};
