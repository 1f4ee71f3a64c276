//! Recommendation curation: sections and the ordered movies inside them.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::catalog::validate_name;
use marquee_core::error::CoreError;
use marquee_core::recommendation::{
    validate_reorder, MAX_SECTION_MOVIES, MAX_SECTION_NAME_LENGTH,
};
use marquee_core::slug::{resolve_slug, validate_slug};
use marquee_core::types::DbId;
use marquee_db::models::recommendation::{
    AddSectionMovie, CreateSection, RecommendationSection, ReorderSectionMovies,
    SectionWithMovies, UpdateSection,
};
use marquee_db::repositories::RecommendationRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::handlers::me::ensure_movie_exists;
use crate::handlers::recommendations::with_movies;
use crate::middleware::rbac::RequireCatalogManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/recommendations`.
#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub position: i32,
}

fn default_active() -> bool {
    true
}

/// Request body for `PUT /admin/recommendations/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub position: Option<i32>,
}

async fn find_section(state: &AppState, id: DbId) -> AppResult<RecommendationSection> {
    RecommendationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Recommendation section",
                id,
            }
            .into()
        })
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/recommendations
///
/// Every section, inactive ones included.
pub async fn list_sections(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
) -> AppResult<Json<DataResponse<Vec<RecommendationSection>>>> {
    let sections = RecommendationRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse { data: sections }))
}

/// POST /api/v1/admin/recommendations
pub async fn create_section(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(input): Json<CreateSectionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<RecommendationSection>>)> {
    let name = validate_name("Section name", &input.name, MAX_SECTION_NAME_LENGTH)
        .map_err(CoreError::Validation)?;
    let slug = resolve_slug(input.slug.as_deref(), &name).map_err(CoreError::Validation)?;

    let section = RecommendationRepo::create(
        &state.pool,
        &CreateSection {
            name,
            slug,
            description: input.description,
            is_active: input.is_active,
            position: input.position,
        },
    )
    .await?;

    tracing::info!(
        section_id = section.id,
        slug = %section.slug,
        admin_id = admin.admin_id,
        "Recommendation section created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: section })))
}

/// GET /api/v1/admin/recommendations/{id}
pub async fn get_section(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SectionWithMovies>>> {
    let section = find_section(&state, id).await?;
    Ok(Json(DataResponse {
        data: with_movies(&state, section).await?,
    }))
}

/// PUT /api/v1/admin/recommendations/{id}
pub async fn update_section(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSectionRequest>,
) -> AppResult<Json<DataResponse<RecommendationSection>>> {
    let name = input
        .name
        .as_deref()
        .map(|n| validate_name("Section name", n, MAX_SECTION_NAME_LENGTH))
        .transpose()
        .map_err(CoreError::Validation)?;
    let slug = input.slug.map(|s| s.trim().to_string());
    if let Some(slug) = slug.as_deref() {
        validate_slug(slug).map_err(CoreError::Validation)?;
    }

    let update = UpdateSection {
        name,
        slug,
        description: input.description,
        is_active: input.is_active,
        position: input.position,
    };
    let section = RecommendationRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Recommendation section",
            id,
        })?;

    tracing::info!(section_id = id, admin_id = admin.admin_id, "Recommendation section updated");
    Ok(Json(DataResponse { data: section }))
}

/// DELETE /api/v1/admin/recommendations/{id}
pub async fn delete_section(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RecommendationRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "Recommendation section",
            id,
        }
        .into());
    }
    tracing::info!(section_id = id, admin_id = admin.admin_id, "Recommendation section deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Section movies
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/recommendations/{id}/movies
///
/// Appends the movie at the end of the section. Adding a movie that is
/// already present is a 409.
pub async fn add_movie(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<AddSectionMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<SectionWithMovies>>)> {
    let section = find_section(&state, id).await?;
    ensure_movie_exists(&state, input.movie_id).await?;

    let display_order = RecommendationRepo::add_movie(&state.pool, id, input.movie_id)
        .await?
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "A recommendation section holds at most {MAX_SECTION_MOVIES} movies"
            ))
        })?;
    tracing::info!(
        section_id = id,
        movie_id = input.movie_id,
        display_order,
        admin_id = admin.admin_id,
        "Movie added to section",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: with_movies(&state, section).await?,
        }),
    ))
}

/// DELETE /api/v1/admin/recommendations/{id}/movies/{movie_id}
///
/// Remaining movies close up so orders stay `1..=n`.
pub async fn remove_movie(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path((id, movie_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<SectionWithMovies>>> {
    let section = find_section(&state, id).await?;

    if !RecommendationRepo::remove_movie(&state.pool, id, movie_id).await? {
        return Err(CoreError::NotFoundByKey {
            entity: "Section movie",
            key: format!("section {id}, movie {movie_id}"),
        }
        .into());
    }
    tracing::info!(
        section_id = id,
        movie_id,
        admin_id = admin.admin_id,
        "Movie removed from section",
    );

    Ok(Json(DataResponse {
        data: with_movies(&state, section).await?,
    }))
}

/// PUT /api/v1/admin/recommendations/{id}/movies/order
///
/// `movie_ids` must list every movie in the section exactly once.
pub async fn reorder_movies(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<ReorderSectionMovies>,
) -> AppResult<Json<DataResponse<SectionWithMovies>>> {
    let section = find_section(&state, id).await?;

    let current = RecommendationRepo::movie_ids(&state.pool, id).await?;
    validate_reorder(&current, &input.movie_ids).map_err(CoreError::Validation)?;

    RecommendationRepo::reorder(&state.pool, id, &input.movie_ids).await?;
    tracing::info!(
        section_id = id,
        movies = input.movie_ids.len(),
        admin_id = admin.admin_id,
        "Section movies reordered",
    );

    Ok(Json(DataResponse {
        data: with_movies(&state, section).await?,
    }))
}
