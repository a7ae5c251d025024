//! CLI route: single route table and run context. Each command is one or two
//! API calls followed by one call into the output layer.

use crate::cli::columns::{bookmark_columns, collection_columns, highlight_columns, tag_columns};
use crate::cli::command_name;
use crate::cli::parse::{
    BookmarkCommands, CollectionCommands, Commands, PageArgs, PagedListCommands,
    ScopedListCommands,
};
use crate::config::RuntimeConfig;
use crate::error::CliError;
use crate::http::{HttpConfig, ResilientClient};
use crate::output::{output, output_tree, ColumnConfig, GlobalOptions, OutputOptions};
use crate::tree::{build_tree, TreeItem};
use serde_json::Value;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Collection id the API uses for "all bookmarks".
pub const ALL_COLLECTIONS: i64 = 0;
/// Collection id of the trash.
pub const TRASH_COLLECTION: i64 = -99;
/// Search expression matching favorite bookmarks.
pub const FAVORITES_SEARCH: &str = "❤️";

/// Runtime context for CLI execution: resolved configuration, output options
/// and the shared HTTP client.
pub struct RunContext {
    config: RuntimeConfig,
    options: OutputOptions,
    client: ResilientClient,
}

impl RunContext {
    pub fn new(config: RuntimeConfig, global: &GlobalOptions) -> Result<Self, CliError> {
        let client = ResilientClient::new(HttpConfig::from_runtime(&config))?;
        Ok(Self::with_client(config, global, client))
    }

    /// Build with a preconfigured client (custom retry policy, test servers).
    pub fn with_client(config: RuntimeConfig, global: &GlobalOptions, client: ResilientClient) -> Self {
        let options = OutputOptions::resolve(global, &config);
        Self {
            config,
            options,
            client,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn output_options(&self) -> &OutputOptions {
        &self.options
    }

    /// Execute a CLI command via the single route table, writing to `out`.
    pub async fn execute<W: Write>(&self, command: &Commands, out: &mut W) -> Result<(), CliError> {
        let name = command_name(command);
        let started = Instant::now();
        debug!(command = name, format = %self.options.format, quiet = self.options.quiet, "Executing command");
        let result = self.execute_inner(command, out).await;
        match &result {
            Ok(()) => info!(
                command = name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Command completed"
            ),
            Err(e) => debug!(command = name, error = %e, "Command failed"),
        }
        result
    }

    async fn execute_inner<W: Write>(&self, command: &Commands, out: &mut W) -> Result<(), CliError> {
        match command {
            Commands::Collections { command } => match command {
                CollectionCommands::List => {
                    let (roots, children) = self.fetch_collections().await?;
                    let mut all = roots;
                    all.extend(children);
                    self.emit(out, &Value::Array(all), &collection_columns())
                }
                CollectionCommands::Tree => {
                    let (roots, children) = self.fetch_collections().await?;
                    let forest = build_tree(&tree_items(&roots), &tree_items(&children));
                    output_tree(out, &forest, &self.options)?;
                    Ok(())
                }
            },
            Commands::Bookmarks { command } => match command {
                BookmarkCommands::List {
                    collection,
                    search,
                    page,
                } => {
                    let data = self.list_bookmarks(*collection, search.as_deref(), page).await?;
                    self.emit(out, &data, &bookmark_columns())
                }
                BookmarkCommands::Get { id } => {
                    let body = self.client.get_json(&format!("raindrop/{}", id)).await?;
                    self.emit(out, &unwrap_items(body), &bookmark_columns())
                }
            },
            Commands::Favorites {
                command: PagedListCommands::List { page },
            } => {
                let data = self
                    .list_bookmarks(ALL_COLLECTIONS, Some(FAVORITES_SEARCH), page)
                    .await?;
                self.emit(out, &data, &bookmark_columns())
            }
            Commands::Trash {
                command: PagedListCommands::List { page },
            } => {
                let data = self.list_bookmarks(TRASH_COLLECTION, None, page).await?;
                self.emit(out, &data, &bookmark_columns())
            }
            Commands::Tags {
                command: ScopedListCommands::List { collection },
            } => {
                let body = self.client.get_json(&scoped_path("tags", *collection)).await?;
                self.emit(out, &unwrap_items(body), &tag_columns())
            }
            Commands::Highlights {
                command: ScopedListCommands::List { collection },
            } => {
                let body = self
                    .client
                    .get_json(&scoped_path("highlights", *collection))
                    .await?;
                self.emit(out, &unwrap_items(body), &highlight_columns())
            }
        }
    }

    fn emit<W: Write>(&self, out: &mut W, data: &Value, columns: &[ColumnConfig]) -> Result<(), CliError> {
        output(out, data, columns, &self.options)?;
        Ok(())
    }

    async fn fetch_collections(&self) -> Result<(Vec<Value>, Vec<Value>), CliError> {
        let roots = self.client.get_json("collections").await?;
        let children = self.client.get_json("collections/childrens").await?;
        Ok((into_vec(unwrap_items(roots)), into_vec(unwrap_items(children))))
    }

    async fn list_bookmarks(
        &self,
        collection: i64,
        search: Option<&str>,
        page: &PageArgs,
    ) -> Result<Value, CliError> {
        let mut query = page.query();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        let response = self
            .client
            .get(&format!("raindrops/{}", collection), &query)
            .await?;
        Ok(unwrap_items(response.body))
    }
}

/// Strip the `{result, items}` / `{result, item}` envelope. Bodies without one
/// pass through unchanged.
pub fn unwrap_items(body: Value) -> Value {
    match body {
        Value::Object(mut map) => {
            if let Some(items) = map.remove("items") {
                items
            } else if let Some(item) = map.remove("item") {
                item
            } else {
                Value::Object(map)
            }
        }
        other => other,
    }
}

fn into_vec(data: Value) -> Vec<Value> {
    match data {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn tree_items(records: &[Value]) -> Vec<TreeItem> {
    records.iter().filter_map(TreeItem::from_record).collect()
}

fn scoped_path(resource: &str, collection: Option<i64>) -> String {
    match collection {
        Some(id) => format!("{}/{}", resource, id),
        None => resource.to_string(),
    }
}
