//! Public recommendation section handlers (active sections only).

use axum::extract::State;
use marquee_core::error::CoreError;
use marquee_core::ratings::round_average;
use marquee_db::models::recommendation::{RecommendationSection, SectionWithMovies};
use marquee_db::repositories::RecommendationRepo;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::response::DataResponse;
use crate::state::AppState;

/// Attach a section's movies in display order.
pub(crate) async fn with_movies(
    state: &AppState,
    section: RecommendationSection,
) -> AppResult<SectionWithMovies> {
    let mut movies = RecommendationRepo::movies_for_section(&state.pool, section.id).await?;
    for movie in &mut movies {
        movie.average_rating = movie.average_rating.map(round_average);
    }
    Ok(SectionWithMovies { section, movies })
}

/// GET /api/v1/recommendations
///
/// Active sections in page order, each with its movies.
pub async fn list_sections(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SectionWithMovies>>>> {
    let sections = RecommendationRepo::list(&state.pool, true).await?;
    let mut data = Vec::with_capacity(sections.len());
    for section in sections {
        data.push(with_movies(&state, section).await?);
    }
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/recommendations/{slug}
pub async fn get_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<SectionWithMovies>>> {
    let section = RecommendationRepo::find_active_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "Recommendation section",
            key: slug,
        })?;
    Ok(Json(DataResponse {
        data: with_movies(&state, section).await?,
    }))
}
