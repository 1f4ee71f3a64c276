//! Public genre and person handlers.

use axum::extract::State;
use marquee_core::error::CoreError;
use marquee_core::search::like_pattern;
use marquee_core::types::DbId;
use marquee_db::models::genre::GenreSummary;
use marquee_db::models::person::{Person, PersonDetails, PersonListParams};
use marquee_db::repositories::{GenreRepo, PersonRepo};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::query::resolve_page;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/genres
///
/// Every genre with the number of movies tagged with it, by name.
pub async fn list_genres(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<GenreSummary>>>> {
    let genres = GenreRepo::list_with_counts(&state.pool).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/persons?q=&limit=&offset=
pub async fn list_persons(
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
) -> AppResult<Json<PageResponse<Person>>> {
    let (limit, offset) = resolve_page(params.limit, params.offset);
    let pattern = params.q.as_deref().and_then(like_pattern);

    let persons = PersonRepo::list(&state.pool, pattern.as_deref(), limit, offset).await?;
    let total = PersonRepo::count(&state.pool, pattern.as_deref()).await?;

    Ok(Json(PageResponse {
        data: persons,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/persons/{id}
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PersonDetails>>> {
    let person = PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Person",
            id,
        })?;
    let filmography = PersonRepo::filmography(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: PersonDetails {
            person,
            filmography,
        },
    }))
}
