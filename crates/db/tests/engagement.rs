//! Repository tests for ratings, personal lists, comments and likes.

use assert_matches::assert_matches;
use marquee_core::user_list::ListType;
use marquee_db::models::comment::CreateComment;
use marquee_db::models::movie::CreateMovie;
use marquee_db::models::user::CreateUser;
use marquee_db::repositories::{
    CommentRepo, ModerationFilter, MovieRepo, RatingRepo, UserListRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "not-a-real-hash".to_string(),
        display_name: None,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn seed_movie(pool: &PgPool, title: &str) -> i64 {
    let input = CreateMovie {
        title: title.to_string(),
        original_title: None,
        overview: None,
        release_date: None,
        runtime_minutes: None,
        language: None,
        poster_url: None,
        backdrop_url: None,
        trailer_url: None,
    };
    MovieRepo::create(pool, &input).await.unwrap().id
}

async fn seed_comment(
    pool: &PgPool,
    movie_id: i64,
    user_id: i64,
    parent_id: Option<i64>,
    content: &str,
) -> i64 {
    let input = CreateComment {
        movie_id,
        user_id,
        parent_id,
        content: content.to_string(),
    };
    CommentRepo::create(pool, &input).await.unwrap().id
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn upsert_keeps_one_rating_per_user(pool: PgPool) {
    let user = seed_user(&pool, "rater").await;
    let movie = seed_movie(&pool, "Tokyo Story").await;

    let first = RatingRepo::upsert(&pool, user, movie, 4).await.unwrap();
    let second = RatingRepo::upsert(&pool, user, movie, 9).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.score, 9);

    let stats = MovieRepo::stats(&pool, movie).await.unwrap();
    assert_eq!(stats.rating_count, 1);
    assert_eq!(stats.average_rating, Some(9.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn score_outside_range_violates_check(pool: PgPool) {
    let user = seed_user(&pool, "wild").await;
    let movie = seed_movie(&pool, "Late Spring").await;

    let err = RatingRepo::upsert(&pool, user, movie, 11).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_reports_missing_rating(pool: PgPool) {
    let user = seed_user(&pool, "nobody").await;
    let movie = seed_movie(&pool, "Floating Weeds").await;

    assert!(!RatingRepo::delete(&pool, user, movie).await.unwrap());
    RatingRepo::upsert(&pool, user, movie, 5).await.unwrap();
    assert!(RatingRepo::delete(&pool, user, movie).await.unwrap());
}

// ---------------------------------------------------------------------------
// Personal lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn watched_displaces_watchlist(pool: PgPool) {
    let user = seed_user(&pool, "lister").await;
    let movie = seed_movie(&pool, "Good Morning").await;

    assert!(UserListRepo::add(&pool, user, movie, ListType::Watchlist).await.unwrap());
    assert!(UserListRepo::add(&pool, user, movie, ListType::Favorites).await.unwrap());
    assert!(UserListRepo::add(&pool, user, movie, ListType::Watched).await.unwrap());

    let lists = UserListRepo::lists_containing(&pool, user, movie).await.unwrap();
    assert_eq!(lists, vec![ListType::Favorites, ListType::Watched]);
}

#[sqlx::test(migrations = "./migrations")]
async fn adding_twice_is_a_no_op(pool: PgPool) {
    let user = seed_user(&pool, "repeat").await;
    let movie = seed_movie(&pool, "Equinox Flower").await;

    assert!(UserListRepo::add(&pool, user, movie, ListType::Favorites).await.unwrap());
    assert!(!UserListRepo::add(&pool, user, movie, ListType::Favorites).await.unwrap());

    let listed = UserListRepo::list_for_user(&pool, user, None).await.unwrap();
    assert_eq!(listed.len(), 1);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn censored_content_is_masked_in_views(pool: PgPool) {
    let user = seed_user(&pool, "spoiler").await;
    let movie = seed_movie(&pool, "Rashomon").await;
    let id = seed_comment(&pool, movie, user, None, "the woodcutter lied").await;

    sqlx::query(
        "INSERT INTO admins (username, email, password_hash, role)
         VALUES ('mod', 'mod@example.com', 'x', 'content_moderator')",
    )
    .execute(&pool)
    .await
    .unwrap();
    let admin_id: i64 = sqlx::query_scalar("SELECT id FROM admins WHERE username = 'mod'")
        .fetch_one(&pool)
        .await
        .unwrap();

    let censored = CommentRepo::censor(&pool, id, "SPOILER", admin_id)
        .await
        .unwrap()
        .unwrap();
    assert!(censored.is_censored);
    assert_eq!(censored.censored_by, Some(admin_id));

    let view = CommentRepo::find_view(&pool, id, None).await.unwrap().unwrap();
    assert!(view.is_censored);
    assert_eq!(view.content, None);
    assert_eq!(view.censor_reason.as_deref(), Some("SPOILER"));

    let restored = CommentRepo::uncensor(&pool, id).await.unwrap().unwrap();
    assert!(!restored.is_censored);
    assert_eq!(restored.censor_reason, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn soft_deleted_comments_leave_listings(pool: PgPool) {
    let user = seed_user(&pool, "writer").await;
    let movie = seed_movie(&pool, "Ikiru").await;
    let keep = seed_comment(&pool, movie, user, None, "keep").await;
    let gone = seed_comment(&pool, movie, user, None, "gone").await;

    assert!(CommentRepo::soft_delete(&pool, gone).await.unwrap());

    let listed = CommentRepo::list_for_movie(&pool, movie, None, "newest", 20, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep);
    assert_eq!(CommentRepo::count_for_movie(&pool, movie).await.unwrap(), 1);

    // Moderators can still find it.
    let filter = ModerationFilter {
        include_deleted: true,
        ..Default::default()
    };
    assert_eq!(CommentRepo::moderation_count(&pool, &filter).await.unwrap(), 2);
    assert_eq!(
        CommentRepo::moderation_count(&pool, &ModerationFilter::default())
            .await
            .unwrap(),
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn top_sort_orders_by_likes(pool: PgPool) {
    let author = seed_user(&pool, "author").await;
    let fan_a = seed_user(&pool, "fan_a").await;
    let fan_b = seed_user(&pool, "fan_b").await;
    let movie = seed_movie(&pool, "Red Beard").await;

    let quiet = seed_comment(&pool, movie, author, None, "quiet").await;
    let loved = seed_comment(&pool, movie, author, None, "loved").await;
    let liked = seed_comment(&pool, movie, author, None, "liked").await;

    CommentRepo::like(&pool, loved, fan_a).await.unwrap();
    CommentRepo::like(&pool, loved, fan_b).await.unwrap();
    CommentRepo::like(&pool, liked, fan_a).await.unwrap();

    let listed = CommentRepo::list_for_movie(&pool, movie, Some(fan_b), "top", 20, 0)
        .await
        .unwrap();
    let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![loved, liked, quiet]);
    assert!(listed[0].liked_by_me);
    assert!(!listed[1].liked_by_me);
}

#[sqlx::test(migrations = "./migrations")]
async fn likes_are_counted_once_per_user(pool: PgPool) {
    let user = seed_user(&pool, "liker").await;
    let movie = seed_movie(&pool, "High and Low").await;
    let id = seed_comment(&pool, movie, user, None, "nice").await;

    CommentRepo::like(&pool, id, user).await.unwrap();
    let state = CommentRepo::like(&pool, id, user).await.unwrap();
    assert!(state.liked);
    assert_eq!(state.like_count, 1);

    let state = CommentRepo::unlike(&pool, id, user).await.unwrap();
    assert!(!state.liked);
    assert_eq!(state.like_count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_user_cascades(pool: PgPool) {
    let user = seed_user(&pool, "departing").await;
    let movie = seed_movie(&pool, "Dersu Uzala").await;
    RatingRepo::upsert(&pool, user, movie, 7).await.unwrap();
    UserListRepo::add(&pool, user, movie, ListType::Favorites).await.unwrap();
    seed_comment(&pool, movie, user, None, "farewell").await;

    assert!(UserRepo::delete(&pool, user).await.unwrap());

    let stats = MovieRepo::stats(&pool, movie).await.unwrap();
    assert_eq!(stats.rating_count, 0);
    assert_eq!(stats.comment_count, 0);
    assert_eq!(stats.favorite_count, 0);
}
