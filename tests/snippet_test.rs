//! Integration tests for snippets, tags and search.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_snippet_normalizes_fields() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let snippet = app
        .create_snippet(
            &token,
            json!({
                "title": "  Hello  ",
                "content": "  print('hi')\n",
                "language": "Python",
                "description": "   ",
            }),
        )
        .await;

    assert_eq!(snippet["title"], "Hello");
    assert_eq!(snippet["content"], "  print('hi')\n");
    assert_eq!(snippet["language"], "python");
    assert!(snippet["description"].is_null());
    assert!(snippet["folder_id"].is_null());
    assert_eq!(snippet["is_favorite"], false);
    assert_eq!(snippet["tags"], json!([]));
}

#[tokio::test]
async fn test_missing_required_fields_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let no_title = app
        .request(
            "POST",
            "/api/v1/snippets",
            Some(json!({ "content": "x", "language": "go" })),
            Some(&token),
        )
        .await;
    let blank_content = app
        .request(
            "POST",
            "/api/v1/snippets",
            Some(json!({ "title": "t", "content": "   ", "language": "go" })),
            Some(&token),
        )
        .await;

    assert_eq!(no_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_title.message(), "Title is required");
    assert_eq!(blank_content.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank_content.message(), "Content is required");
}

#[tokio::test]
async fn test_tags_deduplicate_case_insensitively() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let snippet = app
        .create_snippet(
            &token,
            json!({
                "title": "Goroutines",
                "content": "go func() {}()",
                "language": "go",
                "tags": ["Go", "go", "GO "],
            }),
        )
        .await;

    assert_eq!(snippet["tags"], json!(["Go"]));

    let tags = app.request("GET", "/api/v1/tags", None, Some(&token)).await;
    assert_eq!(tags.status, StatusCode::OK);
    let tags = tags.data().as_array().unwrap().clone();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "Go");
    assert_eq!(tags[0]["snippet_count"], 1);
}

#[tokio::test]
async fn test_get_snippet_loads_tags_sorted() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let snippet = app
        .create_snippet(
            &token,
            json!({
                "title": "Tagged",
                "content": "x",
                "language": "text",
                "tags": ["zeta", "alpha", "mid"],
            }),
        )
        .await;
    let uri = format!("/api/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let fetched = app.request("GET", &uri, None, Some(&token)).await;

    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.data()["tags"], json!(["alpha", "mid", "zeta"]));
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    app.create_snippet(
        &token,
        json!({ "title": "Only", "content": "x", "language": "text" }),
    )
    .await;

    let response = app
        .request(
            "GET",
            "/api/v1/snippets?page=18446744073709551615&limit=100",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(response.body["pagination"]["total"], 1);
    assert_eq!(response.body["pagination"]["has_next"], false);
}

#[tokio::test]
async fn test_too_many_tags_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let tags: Vec<String> = (0..21).map(|i| format!("tag{i}")).collect();

    let response = app
        .request(
            "POST",
            "/api/v1/snippets",
            Some(json!({
                "title": "Busy",
                "content": "x",
                "language": "text",
                "tags": tags,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_tags_only_when_given() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let snippet = app
        .create_snippet(
            &token,
            json!({
                "title": "Tagged",
                "content": "x",
                "language": "text",
                "tags": ["one", "two"],
            }),
        )
        .await;
    let uri = format!("/api/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let kept = app
        .request(
            "PUT",
            &uri,
            Some(json!({ "title": "Renamed", "content": "x", "language": "text" })),
            Some(&token),
        )
        .await;
    assert_eq!(kept.status, StatusCode::OK);
    assert_eq!(kept.data()["title"], "Renamed");
    assert_eq!(kept.data()["tags"].as_array().unwrap().len(), 2);

    let replaced = app
        .request(
            "PUT",
            &uri,
            Some(json!({
                "title": "Renamed",
                "content": "x",
                "language": "text",
                "tags": ["three"],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(replaced.data()["tags"], json!(["three"]));

    let cleared = app
        .request(
            "PUT",
            &uri,
            Some(json!({
                "title": "Renamed",
                "content": "x",
                "language": "text",
                "tags": [],
            })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.data()["tags"], json!([]));
}

#[tokio::test]
async fn test_foreign_folder_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, owner) = app.register_user().await;
    let (_, other) = app.register_user().await;
    let folder = app.create_folder(&owner, "Private", None).await;

    let response = app
        .request(
            "POST",
            "/api/v1/snippets",
            Some(json!({
                "title": "Sneaky",
                "content": "x",
                "language": "text",
                "folder_id": folder,
            })),
            Some(&other),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Folder does not exist");
}

#[tokio::test]
async fn test_foreign_snippets_look_missing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, owner) = app.register_user().await;
    let (_, intruder) = app.register_user().await;
    let snippet = app
        .create_snippet(
            &owner,
            json!({ "title": "Mine", "content": "secret", "language": "text" }),
        )
        .await;
    let uri = format!("/api/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let read = app.request("GET", &uri, None, Some(&intruder)).await;
    let write = app
        .request(
            "PUT",
            &uri,
            Some(json!({ "title": "Stolen", "content": "x", "language": "text" })),
            Some(&intruder),
        )
        .await;
    let delete = app.request("DELETE", &uri, None, Some(&intruder)).await;
    let listed = app
        .request("GET", "/api/v1/snippets", None, Some(&intruder))
        .await;

    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(write.status, StatusCode::NOT_FOUND);
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(listed.body["pagination"]["total"], 0);

    let own = app.request("GET", &uri, None, Some(&owner)).await;
    assert_eq!(own.data()["title"], "Mine");
}

#[tokio::test]
async fn test_search_matches_content_and_paginates() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    for i in 0..3 {
        app.create_snippet(
            &token,
            json!({
                "title": format!("Runtime {i}"),
                "content": "tokio spawn a task",
                "language": "rust",
            }),
        )
        .await;
    }
    app.create_snippet(
        &token,
        json!({ "title": "Unrelated", "content": "select star", "language": "sql" }),
    )
    .await;

    let page = app
        .request(
            "GET",
            "/api/v1/snippets?search=tokio&page=2&limit=2",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["pagination"]["total"], 3);
    assert_eq!(page.body["pagination"]["total_pages"], 2);
    assert_eq!(page.body["data"].as_array().unwrap().len(), 1);

    let all = app
        .request("GET", "/api/v1/snippets?search=%20%20", None, Some(&token))
        .await;
    assert_eq!(all.body["pagination"]["total"], 4);
}

#[tokio::test]
async fn test_delete_snippet() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let snippet = app
        .create_snippet(
            &token,
            json!({ "title": "Gone", "content": "x", "language": "text" }),
        )
        .await;
    let uri = format!("/api/v1/snippets/{}", snippet["id"].as_str().unwrap());

    let first = app.request("DELETE", &uri, None, Some(&token)).await;
    let second = app.request("DELETE", &uri, None, Some(&token)).await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}
