//! Public movie browsing and rating handlers.

use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use marquee_core::catalog::{new_release_cutoff, MovieSort};
use marquee_core::error::CoreError;
use marquee_core::ratings::{round_average, validate_score, DEFAULT_TOP_RATED_MIN_VOTES};
use marquee_core::search::like_pattern;
use marquee_core::types::DbId;
use marquee_core::user_list::ListType;
use marquee_db::models::movie::{MovieDetails, MovieListParams, MovieStats, MovieSummary};
use marquee_db::repositories::{
    CreditRepo, GenreRepo, MovieFilter, MovieRepo, RatingRepo, UserListRepo,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::handlers::me::ensure_movie_exists;
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::RequireUser;
use crate::query::{resolve_page, PaginationParams};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Query parameters for `GET /movies/top-rated`.
#[derive(Debug, Deserialize)]
pub struct TopRatedParams {
    pub min_votes: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Movie page payload. The `my_*` fields appear only for signed-in users.
#[derive(Debug, Serialize)]
pub struct MovieDetailsResponse {
    #[serde(flatten)]
    pub details: MovieDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_rating: Option<i16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_lists: Option<Vec<ListType>>,
}

/// Request body for `PUT /movies/{id}/rating`.
#[derive(Debug, Deserialize)]
pub struct RateMovieRequest {
    pub score: i64,
}

/// The caller's rating plus the movie's refreshed aggregate.
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub movie_id: DbId,
    pub score: Option<i16>,
    pub average_rating: Option<f64>,
    pub rating_count: i64,
}

fn rounded(mut movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    for movie in &mut movies {
        movie.average_rating = movie.average_rating.map(round_average);
    }
    movies
}

fn rounded_stats(mut stats: MovieStats) -> MovieStats {
    stats.average_rating = stats.average_rating.map(round_average);
    stats
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/v1/movies?q=&genre_id=&year=&sort=&limit=&offset=
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<MovieListParams>,
) -> AppResult<Json<PageResponse<MovieSummary>>> {
    let sort = MovieSort::parse(params.sort.as_deref()).map_err(CoreError::Validation)?;
    let (limit, offset) = resolve_page(params.limit, params.offset);

    let filter = MovieFilter {
        pattern: params.q.as_deref().and_then(like_pattern),
        genre_id: params.genre_id,
        year: params.year,
        sort,
        limit,
        offset,
    };

    let movies = MovieRepo::list(&state.pool, &filter).await?;
    let total = MovieRepo::count(&state.pool, &filter).await?;

    Ok(Json(PageResponse {
        data: rounded(movies),
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/movies/new-releases
///
/// Movies released in the last 90 days, newest first. Future release dates
/// are excluded.
pub async fn new_releases(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<MovieSummary>>>> {
    let (limit, _) = params.resolve();
    let today = Utc::now().date_naive();
    let movies =
        MovieRepo::new_releases(&state.pool, new_release_cutoff(today), today, limit).await?;
    Ok(Json(DataResponse {
        data: rounded(movies),
    }))
}

/// GET /api/v1/movies/top-rated?min_votes=
pub async fn top_rated(
    State(state): State<AppState>,
    Query(params): Query<TopRatedParams>,
) -> AppResult<Json<DataResponse<Vec<MovieSummary>>>> {
    let min_votes = params
        .min_votes
        .unwrap_or(DEFAULT_TOP_RATED_MIN_VOTES)
        .max(1);
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let movies = MovieRepo::top_rated(&state.pool, min_votes, limit, offset).await?;
    Ok(Json(DataResponse {
        data: rounded(movies),
    }))
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovieDetailsResponse>>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Movie", id })?;

    let genres = GenreRepo::list_for_movie(&state.pool, id).await?;
    let credits = CreditRepo::list_for_movie(&state.pool, id).await?;
    let stats = MovieRepo::stats(&state.pool, id).await?;

    let (my_rating, my_lists) = match viewer.user_id() {
        Some(user_id) => {
            let rating = RatingRepo::find(&state.pool, user_id, id).await?;
            let lists = UserListRepo::lists_containing(&state.pool, user_id, id).await?;
            (rating.map(|r| r.score), Some(lists))
        }
        None => (None, None),
    };

    Ok(Json(DataResponse {
        data: MovieDetailsResponse {
            details: MovieDetails {
                movie,
                genres,
                credits,
                stats: rounded_stats(stats),
            },
            my_rating,
            my_lists,
        },
    }))
}

// ---------------------------------------------------------------------------
// Ratings
// ---------------------------------------------------------------------------

/// PUT /api/v1/movies/{id}/rating
///
/// Rate a movie 1-10. Rating again replaces the previous score.
pub async fn rate_movie(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(movie_id): Path<DbId>,
    Json(input): Json<RateMovieRequest>,
) -> AppResult<Json<DataResponse<RatingResponse>>> {
    let score = i16::try_from(input.score).map_err(|_| {
        CoreError::validation(format!(
            "Rating must be between 1 and 10 (got {})",
            input.score
        ))
    })?;
    validate_score(score).map_err(CoreError::Validation)?;
    ensure_movie_exists(&state, movie_id).await?;

    let rating = RatingRepo::upsert(&state.pool, user.user_id, movie_id, score).await?;
    tracing::info!(user_id = user.user_id, movie_id, score, "Movie rated");

    let stats = rounded_stats(MovieRepo::stats(&state.pool, movie_id).await?);
    Ok(Json(DataResponse {
        data: RatingResponse {
            movie_id,
            score: Some(rating.score),
            average_rating: stats.average_rating,
            rating_count: stats.rating_count,
        },
    }))
}

/// DELETE /api/v1/movies/{id}/rating
pub async fn unrate_movie(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(movie_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = RatingRepo::delete(&state.pool, user.user_id, movie_id).await?;
    if !removed {
        return Err(CoreError::NotFoundByKey {
            entity: "Rating",
            key: format!("movie {movie_id}"),
        }
        .into());
    }
    tracing::info!(user_id = user.user_id, movie_id, "Movie rating removed");
    Ok(StatusCode::NO_CONTENT)
}
