//! Integration tests for comment threads, likes and moderation.

mod common;

use axum::http::StatusCode;
use common::{
    admin_with_token, body_json, create_test_movie, delete_auth, get, get_auth, post_json_auth,
    put_auth, put_json_auth, user_with_token,
};
use sqlx::PgPool;

/// Post a comment and return its id.
async fn post_comment(
    pool: &PgPool,
    movie_id: i64,
    token: &str,
    content: &str,
    parent_id: Option<i64>,
) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/movies/{movie_id}/comments"),
        token,
        serde_json::json!({ "content": content, "parent_id": parent_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn posted_comment_appears_in_listing(pool: PgPool) {
    let movie = create_test_movie(&pool, "Heat").await;
    let (_, token) = user_with_token(&pool, "talker").await;
    post_comment(&pool, movie.id, &token, "  Great diner scene.  ", None).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["content"], "Great diner scene.");
    assert_eq!(json["data"][0]["username"], "talker");
    assert_eq!(json["data"][0]["liked_by_me"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_comment_is_rejected(pool: PgPool) {
    let movie = create_test_movie(&pool, "Thief").await;
    let (_, token) = user_with_token(&pool, "mute").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/movies/{}/comments", movie.id),
        &token,
        serde_json::json!({ "content": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn replies_to_replies_attach_to_the_root(pool: PgPool) {
    let movie = create_test_movie(&pool, "Collateral").await;
    let (_, token) = user_with_token(&pool, "threader").await;

    let root = post_comment(&pool, movie.id, &token, "root", None).await;
    let reply = post_comment(&pool, movie.id, &token, "reply", Some(root)).await;
    post_comment(&pool, movie.id, &token, "nested", Some(reply)).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/comments/{root}/replies")).await).await;
    let contents: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["reply", "nested"]);

    // Top-level listing holds only the root, carrying its reply count.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["reply_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reply_must_target_the_same_movie(pool: PgPool) {
    let first = create_test_movie(&pool, "First").await;
    let second = create_test_movie(&pool, "Second").await;
    let (_, token) = user_with_token(&pool, "wanderer").await;
    let root = post_comment(&pool, first.id, &token, "on first", None).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/movies/{}/comments", second.id),
        &token,
        serde_json::json!({ "content": "misplaced", "parent_id": root }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_author_may_edit(pool: PgPool) {
    let movie = create_test_movie(&pool, "Manhunter").await;
    let (_, author) = user_with_token(&pool, "author").await;
    let (_, other) = user_with_token(&pool, "other").await;
    let id = post_comment(&pool, movie.id, &author, "first draft", None).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/comments/{id}"),
        &other,
        serde_json::json!({ "content": "hijacked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/comments/{id}"),
        &author,
        serde_json::json!({ "content": "second draft" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["content"], "second draft");
    assert!(json["data"]["edited_at"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleted_comment_disappears_from_listing(pool: PgPool) {
    let movie = create_test_movie(&pool, "Ali").await;
    let (_, token) = user_with_token(&pool, "regretful").await;
    let id = post_comment(&pool, movie.id, &token, "hot take", None).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/comments/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await).await;
    assert_eq!(json["total"], 0);
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn likes_are_idempotent_per_user(pool: PgPool) {
    let movie = create_test_movie(&pool, "Miami Vice").await;
    let (_, author) = user_with_token(&pool, "poster").await;
    let (_, fan) = user_with_token(&pool, "fan").await;
    let id = post_comment(&pool, movie.id, &author, "likeable", None).await;
    let uri = format!("/api/v1/comments/{id}/like");

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let json = body_json(put_auth(app, &uri, &fan).await).await;
        assert_eq!(json["data"]["liked"], true);
        assert_eq!(json["data"]["like_count"], 1);
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(app, &format!("/api/v1/movies/{}/comments", movie.id), &fan).await,
    )
    .await;
    assert_eq!(json["data"][0]["liked_by_me"], true);

    let app = common::build_test_app(pool);
    let json = body_json(delete_auth(app, &uri, &fan).await).await;
    assert_eq!(json["data"]["liked"], false);
    assert_eq!(json["data"]["like_count"], 0);
}

// ---------------------------------------------------------------------------
// Moderation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn censored_content_is_hidden_from_the_public(pool: PgPool) {
    let movie = create_test_movie(&pool, "Blackhat").await;
    let (_, token) = user_with_token(&pool, "spoiler").await;
    let (_, moderator) = admin_with_token(&pool, "moddy", "content_moderator").await;
    let id = post_comment(&pool, movie.id, &token, "the hacker dies", None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/comments/{id}/censor"),
        &moderator,
        serde_json::json!({ "reason": "spoiler" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_censored"], true);
    assert_eq!(json["data"]["censor_reason"], "SPOILER");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await).await;
    assert_eq!(json["data"][0]["is_censored"], true);
    assert!(json["data"][0]["content"].is_null());

    // The moderation queue still sees the original text.
    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(app, "/api/v1/admin/comments?censored=true", &moderator).await,
    )
    .await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["content"], "the hacker dies");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn censor_requires_a_known_reason(pool: PgPool) {
    let movie = create_test_movie(&pool, "Public Enemies").await;
    let (_, token) = user_with_token(&pool, "commenter").await;
    let (_, moderator) = admin_with_token(&pool, "strict", "content_moderator").await;
    let id = post_comment(&pool, movie.id, &token, "fine", None).await;
    let uri = format!("/api/v1/admin/comments/{id}/censor");

    for body in [serde_json::json!({}), serde_json::json!({ "reason": "BORING" })] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, &uri, &moderator, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn censoring_again_replaces_the_reason(pool: PgPool) {
    let movie = create_test_movie(&pool, "Collateral").await;
    let (_, token) = user_with_token(&pool, "ranter").await;
    let (_, moderator) = admin_with_token(&pool, "second-look", "content_moderator").await;
    let id = post_comment(&pool, movie.id, &token, "cab driver spoiler", None).await;
    let uri = format!("/api/v1/admin/comments/{id}/censor");

    for reason in ["spoiler", "HARASSMENT"] {
        let app = common::build_test_app(pool.clone());
        let response =
            post_json_auth(app, &uri, &moderator, serde_json::json!({ "reason": reason })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await).await;
    assert_eq!(json["data"][0]["is_censored"], true);
    assert_eq!(json["data"][0]["censor_reason"], "HARASSMENT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uncensoring_restores_public_content(pool: PgPool) {
    let movie = create_test_movie(&pool, "Miami Vice").await;
    let (_, token) = user_with_token(&pool, "pardoned").await;
    let (_, moderator) = admin_with_token(&pool, "merciful", "content_moderator").await;
    let id = post_comment(&pool, movie.id, &token, "mostly harmless", None).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/comments/{id}/censor"),
        &moderator,
        serde_json::json!({ "reason": "OFF_TOPIC" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/comments/{id}/uncensor"),
        &moderator,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/movies/{}/comments", movie.id)).await).await;
    assert_eq!(json["data"][0]["is_censored"], false);
    assert_eq!(json["data"][0]["content"], "mostly harmless");
    assert!(json["data"][0]["censor_reason"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn uncensoring_a_visible_comment_is_bad_input(pool: PgPool) {
    let movie = create_test_movie(&pool, "The Insider").await;
    let (_, token) = user_with_token(&pool, "clean").await;
    let (_, moderator) = admin_with_token(&pool, "lenient", "admin").await;
    let id = post_comment(&pool, movie.id, &token, "nothing to see", None).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        &format!("/api/v1/admin/comments/{id}/uncensor"),
        &moderator,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn censored_comment_cannot_be_edited_by_author(pool: PgPool) {
    let movie = create_test_movie(&pool, "Thief").await;
    let (_, token) = user_with_token(&pool, "sneaky").await;
    let (_, moderator) = admin_with_token(&pool, "watcher", "content_moderator").await;
    let id = post_comment(&pool, movie.id, &token, "spam spam", None).await;

    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/admin/comments/{id}/censor"),
        &moderator,
        serde_json::json!({ "reason": "SPAM" }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/v1/comments/{id}"),
        &token,
        serde_json::json!({ "content": "innocent now" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn hard_delete_removes_the_thread(pool: PgPool) {
    let movie = create_test_movie(&pool, "Heat").await;
    let (_, token) = user_with_token(&pool, "troll").await;
    let (_, moderator) = admin_with_token(&pool, "janitor", "content_moderator").await;
    let root = post_comment(&pool, movie.id, &token, "bait", None).await;
    post_comment(&pool, movie.id, &token, "more bait", Some(root)).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/admin/comments/{root}"), &moderator).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            "/api/v1/admin/comments?include_deleted=true",
            &moderator,
        )
        .await,
    )
    .await;
    assert_eq!(json["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn users_cannot_reach_moderation(pool: PgPool) {
    let (_, token) = user_with_token(&pool, "curious").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/comments", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
