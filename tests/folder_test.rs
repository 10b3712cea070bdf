//! Integration tests for folder CRUD and hierarchy rules.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_create_and_get_folder() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let id = app.create_folder(&token, "  Work  ", None).await;
    let response = app
        .request("GET", &format!("/api/v1/folders/{id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Work");
    assert!(response.data()["parent_id"].is_null());
}

#[tokio::test]
async fn test_duplicate_sibling_name_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let parent = app.create_folder(&token, "Parent", None).await;
    app.create_folder(&token, "Child", Some(&parent)).await;

    let duplicate = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Child", "parent_id": parent })),
            Some(&token),
        )
        .await;
    let elsewhere = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Child" })),
            Some(&token),
        )
        .await;

    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(elsewhere.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_folder_name_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let response = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "bad/name" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}

#[tokio::test]
async fn test_list_filters_by_parent() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let root = app.create_folder(&token, "Root", None).await;
    app.create_folder(&token, "A", Some(&root)).await;
    app.create_folder(&token, "B", Some(&root)).await;

    let children = app
        .request(
            "GET",
            &format!("/api/v1/folders?parent_id={root}&limit=1"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(children.status, StatusCode::OK);
    assert_eq!(children.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(children.body["pagination"]["total"], 2);
    assert_eq!(children.body["pagination"]["has_next"], true);

    let bad = app
        .request("GET", "/api/v1/folders?parent_id=nope", None, Some(&token))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_into_descendant_is_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;
    let c = app.create_folder(&token, "C", Some(&b)).await;

    let circular = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{a}"),
            Some(json!({ "name": "A", "parent_id": c })),
            Some(&token),
        )
        .await;
    let own_parent = app
        .request(
            "PUT",
            &format!("/api/v1/folders/{a}"),
            Some(json!({ "name": "A", "parent_id": a })),
            Some(&token),
        )
        .await;

    assert_eq!(circular.status, StatusCode::BAD_REQUEST);
    assert!(circular.message().contains("Circular"));
    assert_eq!(own_parent.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_depth_cap_is_enforced() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let max_depth = app.config.folders.max_depth;

    let mut parent = app.create_folder(&token, "L0", None).await;
    for level in 1..=max_depth {
        parent = app
            .create_folder(&token, &format!("L{level}"), Some(&parent))
            .await;
    }

    let too_deep = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Deepest", "parent_id": parent })),
            Some(&token),
        )
        .await;

    assert_eq!(too_deep.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_with_children_conflicts() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let parent = app.create_folder(&token, "Parent", None).await;
    let child = app.create_folder(&token, "Child", Some(&parent)).await;

    let blocked = app
        .request(
            "DELETE",
            &format!("/api/v1/folders/{parent}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);

    let child_deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/folders/{child}"),
            None,
            Some(&token),
        )
        .await;
    let parent_deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/folders/{parent}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(child_deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(parent_deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_delete_unfiles_snippets() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;
    let folder = app.create_folder(&token, "Temp", None).await;
    let snippet = app
        .create_snippet(
            &token,
            json!({
                "title": "Filed",
                "content": "fn main() {}",
                "language": "rust",
                "folder_id": folder,
            }),
        )
        .await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/v1/folders/{folder}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let id = snippet["id"].as_str().unwrap();
    let after = app
        .request("GET", &format!("/api/v1/snippets/{id}"), None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::OK);
    assert!(after.data()["folder_id"].is_null());
}

#[tokio::test]
async fn test_foreign_folders_look_missing() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, owner) = app.register_user().await;
    let (_, intruder) = app.register_user().await;
    let folder = app.create_folder(&owner, "Private", None).await;
    let uri = format!("/api/v1/folders/{folder}");

    let read = app.request("GET", &uri, None, Some(&intruder)).await;
    let write = app
        .request("PUT", &uri, Some(json!({ "name": "Mine" })), Some(&intruder))
        .await;
    let delete = app.request("DELETE", &uri, None, Some(&intruder)).await;
    let as_parent = app
        .request(
            "POST",
            "/api/v1/folders",
            Some(json!({ "name": "Sneaky", "parent_id": folder })),
            Some(&intruder),
        )
        .await;

    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(write.status, StatusCode::NOT_FOUND);
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(as_parent.status, StatusCode::BAD_REQUEST);

    let still_there = app.request("GET", &uri, None, Some(&owner)).await;
    assert_eq!(still_there.status, StatusCode::OK);
    assert_eq!(still_there.data()["name"], "Private");
}

#[tokio::test]
async fn test_malformed_folder_id_rejected() {
    let Some(app) = TestApp::try_new().await else {
        return;
    };
    let (_, token) = app.register_user().await;

    let response = app
        .request("GET", "/api/v1/folders/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
