//! End-to-end command tests: route table, HTTP client, and output layer.

use super::test_utils::{fast_client, runtime_config};
use clap::Parser;
use rdcli::cli::{Cli, RunContext};
use rdcli::error::{CliError, ClientError};
use rdcli::output::{GlobalOptions, OutputFormat};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_collections(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "items": [
                {"_id": 1, "title": "Work", "count": 4},
                {"_id": 2, "title": "Home", "count": 1}
            ]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/collections/childrens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "items": [
                {"_id": 10, "title": "Rust", "count": 3, "parent": {"$id": 1}},
                {"_id": 11, "title": "Archive", "count": 0, "parent": {"$id": 1}},
                {"_id": 12, "title": "Lost", "count": 2, "parent": {"$id": 999}}
            ]
        })))
        .mount(server)
        .await;
}

async fn run(server: &MockServer, args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(args).unwrap();
    let context = RunContext::with_client(
        runtime_config(&server.uri()),
        &cli.global_options(),
        fast_client(&server.uri()),
    );
    let mut out = Vec::new();
    context.execute(&cli.command, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_collections_tree_tsv() {
    let server = MockServer::start().await;
    mount_collections(&server).await;

    let out = run(&server, &["rdcli", "--format", "tsv", "collections", "tree"])
        .await
        .unwrap();
    assert_eq!(
        out,
        "title\tid\tcount\tparentId\tdepth\n\
         Home\t2\t1\t\t0\n\
         Lost\t12\t2\t999\t0\n\
         Work\t1\t4\t\t0\n\
         Archive\t11\t0\t1\t1\n\
         Rust\t10\t3\t1\t1\n"
    );
}

#[tokio::test]
async fn test_collections_tree_plain() {
    let server = MockServer::start().await;
    mount_collections(&server).await;

    let out = run(&server, &["rdcli", "--format", "plain", "collections", "tree"])
        .await
        .unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "├── 📁 Home (1 item)");
    assert_eq!(lines[2], "└── 📁 Work (4 items)");
    assert_eq!(lines[3], "    ├── 📁 Archive (0 items)");
    assert_eq!(lines[4], "    └── 📁 Rust (3 items)");
}

#[tokio::test]
async fn test_collections_list_quiet() {
    let server = MockServer::start().await;
    mount_collections(&server).await;

    let out = run(&server, &["rdcli", "-q", "collections", "list"]).await.unwrap();
    assert_eq!(out, "1\n2\n10\n11\n12\n");
}

#[tokio::test]
async fn test_bookmarks_list_json_unwraps_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raindrops/5"))
        .and(query_param("search", "tokio"))
        .and(query_param("perpage", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "items": [{"_id": 100, "title": "Tokio docs", "link": "https://tokio.rs"}]
        })))
        .mount(&server)
        .await;

    let out = run(
        &server,
        &[
            "rdcli", "--format", "json", "bookmarks", "list", "--collection", "5", "--search",
            "tokio", "--per-page", "10",
        ],
    )
    .await
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!([{"_id": 100, "title": "Tokio docs", "link": "https://tokio.rs"}]));
}

#[tokio::test]
async fn test_bookmark_get_single_record_tsv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raindrop/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "item": {"_id": 7, "title": "Line\tbreak", "link": "https://a.example", "tags": ["a", "b"]}
        })))
        .mount(&server)
        .await;

    let out = run(&server, &["rdcli", "--format", "tsv", "bookmarks", "get", "7"])
        .await
        .unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], "Title\tLink\tID\tExcerpt\tTags\tType\tCollection\tCreated");
    assert_eq!(rows[1], "Line\\tbreak\thttps://a.example\t7\t\ta,b\t\t\t");
}

#[tokio::test]
async fn test_favorites_and_trash_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/raindrops/0"))
        .and(query_param("search", "❤️"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"_id": 1}]})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/raindrops/-99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"_id": 9}]})))
        .mount(&server)
        .await;

    assert_eq!(run(&server, &["rdcli", "-q", "favorites", "list"]).await.unwrap(), "1\n");
    assert_eq!(run(&server, &["rdcli", "-q", "trash", "list"]).await.unwrap(), "9\n");
}

#[tokio::test]
async fn test_tags_scoped_to_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tags/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": true,
            "items": [{"_id": "rust", "count": 4}, {"_id": "web", "count": 1}]
        })))
        .mount(&server)
        .await;

    let out = run(&server, &["rdcli", "--format", "tsv", "tags", "list", "--collection", "3"])
        .await
        .unwrap();
    assert_eq!(out, "Tag\tCount\nrust\t4\nweb\t1\n");
}

#[tokio::test]
async fn test_command_surfaces_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"errorMessage": "x", "error": "Unauthorized"})))
        .mount(&server)
        .await;

    let err = run(&server, &["rdcli", "highlights", "list"]).await.unwrap_err();
    match err {
        CliError::Client(ClientError::Api(api)) => {
            assert_eq!(api.http_status, Some(401));
            assert_eq!(api.message, "Unauthorized");
        }
        other => panic!("expected client error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_piped_default_format_is_json() {
    let server = MockServer::start().await;
    mount_collections(&server).await;

    let context = RunContext::with_client(
        runtime_config(&server.uri()),
        &GlobalOptions::default(),
        fast_client(&server.uri()),
    );
    assert_eq!(context.output_options().format, OutputFormat::Json);
}
