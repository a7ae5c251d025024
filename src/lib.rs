//! rdcli: Raindrop.io bookmarks from the command line
//!
//! Fetches collections, bookmarks, tags and highlights through a retrying HTTP
//! client and renders them as json, tsv, a table, or plain-text cards.

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod output;
pub mod tree;
