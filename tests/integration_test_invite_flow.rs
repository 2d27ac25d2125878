mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{body_text, create_event, issue_invite, post_selection, TestApp};
use serde_json::json;
use sqlx::Row;
use tower::ServiceExt;

async fn get_invite_page(app: &TestApp, token: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/invite/{}", token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_full_invite_lifecycle() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event_id = create_event(&app, &cookie, json!({
        "title": "Friday",
        "theme": "cottagecore-classic"
    })).await;

    let (invite_id, token) = issue_invite(&app, &cookie, &event_id, None).await;

    // Pending view shows the theme's default menu
    let res = get_invite_page(&app, &token).await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = body_text(res).await;
    assert!(page.contains("Pasta night"));
    assert!(page.contains("Board games"));
    assert!(page.contains("Romantic"));

    // Submit a valid triple
    let res = post_selection(&app, &token, "Pasta night", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::OK);
    let page = body_text(res).await;
    assert!(page.contains("Pasta night"));

    // used_at is set and exactly one selection exists
    let row = sqlx::query("SELECT used_at FROM invites WHERE id = ?")
        .bind(&invite_id)
        .fetch_one(&app.pool).await.unwrap();
    assert!(row.get::<Option<String>, _>("used_at").is_some());

    let count: i64 = sqlx::query("SELECT COUNT(*) as c FROM selections WHERE invite_id = ?")
        .bind(&invite_id)
        .fetch_one(&app.pool).await.unwrap()
        .get("c");
    assert_eq!(count, 1);

    // A replay of the same POST bounces back
    let res = post_selection(&app, &token, "Pasta night", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("status=already-used"));

    // And the page now shows the responded state
    let res = get_invite_page(&app, &token).await;
    let page = body_text(res).await;
    assert!(page.contains("already been answered"));
}

#[tokio::test]
async fn test_get_unknown_token_is_404() {
    let app = TestApp::new().await;

    let res = get_invite_page(&app, "definitely-not-a-token").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_unknown_token_redirects_invite_not_found() {
    let app = TestApp::new().await;

    let res = post_selection(&app, "definitely-not-a-token", "a", "b", "c").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("status=invite-not-found"));
}

#[tokio::test]
async fn test_invalid_selection_leaves_invite_pending() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event_id = create_event(&app, &cookie, json!({
        "title": "Friday",
        "theme": "cottagecore-classic"
    })).await;
    let (invite_id, token) = issue_invite(&app, &cookie, &event_id, None).await;

    let res = post_selection(&app, &token, "Sushi omakase", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("status=invalid-selection"));

    // No partial state: invite still pending, no selection row
    let row = sqlx::query("SELECT used_at FROM invites WHERE id = ?")
        .bind(&invite_id)
        .fetch_one(&app.pool).await.unwrap();
    assert!(row.get::<Option<String>, _>("used_at").is_none());

    let count: i64 = sqlx::query("SELECT COUNT(*) as c FROM selections WHERE invite_id = ?")
        .bind(&invite_id)
        .fetch_one(&app.pool).await.unwrap()
        .get("c");
    assert_eq!(count, 0);

    // The invite is still usable with a valid triple
    let res = post_selection(&app, &token, "Pasta night", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invite_whose_event_vanished_is_treated_as_not_found() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event_id = create_event(&app, &cookie, json!({
        "title": "Friday",
        "theme": "cottagecore-classic"
    })).await;
    let (invite_id, token) = issue_invite(&app, &cookie, &event_id, None).await;

    // Delete the event row out from under the invite. FK enforcement is
    // per connection, so switch it off on the one running the delete.
    let mut conn = app.pool.acquire().await.unwrap();
    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&mut *conn).await.unwrap();
    sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(&event_id)
        .execute(&mut *conn).await.unwrap();
    drop(conn);

    // The page degrades to not-found rather than rendering a broken form
    let res = get_invite_page(&app, &token).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let page = body_text(res).await;
    assert!(page.contains("no longer exists"));

    // A submission bounces back and records nothing
    let res = post_selection(&app, &token, "Pasta night", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("status=invite-not-found"));

    let row = sqlx::query("SELECT used_at FROM invites WHERE id = ?")
        .bind(&invite_id)
        .fetch_one(&app.pool).await.unwrap();
    assert!(row.get::<Option<String>, _>("used_at").is_none());
}

#[tokio::test]
async fn test_empty_choice_is_rejected_as_plain_non_membership() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event_id = create_event(&app, &cookie, json!({
        "title": "Friday",
        "theme": "cottagecore-classic"
    })).await;
    let (_, token) = issue_invite(&app, &cookie, &event_id, None).await;

    let res = post_selection(&app, &token, "", "Board games", "Romantic").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.contains("status=invalid-selection"));
}

#[tokio::test]
async fn test_transient_status_message_is_rendered() {
    let app = TestApp::new().await;
    let cookie = app.login().await;

    let event_id = create_event(&app, &cookie, json!({
        "title": "Friday",
        "theme": "cottagecore-classic"
    })).await;
    let (_, token) = issue_invite(&app, &cookie, &event_id, None).await;

    let res = app.router.clone().oneshot(
        Request::builder()
            .method("GET")
            .uri(format!("/invite/{}?status=invalid-selection", token))
            .body(Body::empty())
            .unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let page = body_text(res).await;
    assert!(page.contains("no longer on the menu"));
}
