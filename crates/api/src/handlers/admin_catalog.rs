//! Catalog management: movies, persons, genres, movie genres and credits.
//!
//! Every handler requires [`RequireCatalogManager`]; content moderators get
//! 403.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::catalog::{
    validate_credit_type, validate_name, validate_optional_url, validate_overview,
    validate_runtime, MAX_GENRE_NAME_LENGTH, MAX_PERSON_NAME_LENGTH, MAX_TITLE_LENGTH,
};
use marquee_core::error::CoreError;
use marquee_core::slug::{resolve_slug, validate_slug};
use marquee_core::types::DbId;
use marquee_db::models::credit::{CreditInfo, CreditInput};
use marquee_db::models::genre::{CreateGenre, Genre, GenreRef, UpdateGenre};
use marquee_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use marquee_db::models::person::{CreatePerson, Person, UpdatePerson};
use marquee_db::repositories::{CreditRepo, GenreRepo, MovieRepo, PersonRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::handlers::me::ensure_movie_exists;
use crate::middleware::rbac::RequireCatalogManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /admin/genres`. The slug defaults to one derived
/// from the name.
#[derive(Debug, Deserialize)]
pub struct CreateGenreRequest {
    pub name: String,
    pub slug: Option<String>,
}

/// Request body for `PUT /admin/movies/{id}/genres`.
#[derive(Debug, Deserialize)]
pub struct SetGenresRequest {
    pub genre_ids: Vec<DbId>,
}

/// Request body for `PUT /admin/movies/{id}/credits`.
#[derive(Debug, Deserialize)]
pub struct SetCreditsRequest {
    pub credits: Vec<CreditInput>,
}

fn invalid(msg: String) -> CoreError {
    CoreError::Validation(msg)
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

fn validate_movie_fields(
    overview: Option<&str>,
    runtime_minutes: Option<i32>,
    urls: [(&str, Option<&str>); 3],
) -> Result<(), CoreError> {
    validate_overview(overview).map_err(invalid)?;
    validate_runtime(runtime_minutes).map_err(invalid)?;
    for (field, url) in urls {
        validate_optional_url(field, url).map_err(invalid)?;
    }
    Ok(())
}

/// POST /api/v1/admin/movies
pub async fn create_movie(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(mut input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<DataResponse<Movie>>)> {
    input.title = validate_name("Title", &input.title, MAX_TITLE_LENGTH).map_err(invalid)?;
    validate_movie_fields(
        input.overview.as_deref(),
        input.runtime_minutes,
        [
            ("Poster URL", input.poster_url.as_deref()),
            ("Backdrop URL", input.backdrop_url.as_deref()),
            ("Trailer URL", input.trailer_url.as_deref()),
        ],
    )?;

    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, admin_id = admin.admin_id, "Movie created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/admin/movies/{id}
pub async fn update_movie(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateMovie>,
) -> AppResult<Json<DataResponse<Movie>>> {
    if let Some(title) = input.title.as_deref() {
        input.title = Some(validate_name("Title", title, MAX_TITLE_LENGTH).map_err(invalid)?);
    }
    validate_movie_fields(
        input.overview.as_deref(),
        input.runtime_minutes,
        [
            ("Poster URL", input.poster_url.as_deref()),
            ("Backdrop URL", input.backdrop_url.as_deref()),
            ("Trailer URL", input.trailer_url.as_deref()),
        ],
    )?;

    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Movie", id })?;
    tracing::info!(movie_id = id, admin_id = admin.admin_id, "Movie updated");
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/admin/movies/{id}
///
/// Credits, genre tags, ratings, list entries, comments and section slots go
/// with it.
pub async fn delete_movie(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Movie", id }.into());
    }
    tracing::info!(movie_id = id, admin_id = admin.admin_id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/movies/{id}/genres
///
/// Replace the movie's genres. Duplicate ids are ignored; unknown ids are a
/// 400.
pub async fn set_movie_genres(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<SetGenresRequest>,
) -> AppResult<Json<DataResponse<Vec<GenreRef>>>> {
    ensure_movie_exists(&state, id).await?;

    let genre_ids: Vec<DbId> = input
        .genre_ids
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    GenreRepo::set_for_movie(&state.pool, id, &genre_ids).await?;

    tracing::info!(
        movie_id = id,
        admin_id = admin.admin_id,
        genres = genre_ids.len(),
        "Movie genres set"
    );
    let genres = GenreRepo::list_for_movie(&state.pool, id).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// PUT /api/v1/admin/movies/{id}/credits
///
/// Replace the movie's full credit list. `billing_order` defaults to each
/// credit's position in the payload.
pub async fn set_movie_credits(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<SetCreditsRequest>,
) -> AppResult<Json<DataResponse<Vec<CreditInfo>>>> {
    for credit in &input.credits {
        validate_credit_type(&credit.credit_type).map_err(invalid)?;
    }
    ensure_movie_exists(&state, id).await?;

    CreditRepo::replace_for_movie(&state.pool, id, &input.credits).await?;

    tracing::info!(
        movie_id = id,
        admin_id = admin.admin_id,
        credits = input.credits.len(),
        "Movie credits set",
    );
    let credits = CreditRepo::list_for_movie(&state.pool, id).await?;
    Ok(Json(DataResponse { data: credits }))
}

// ---------------------------------------------------------------------------
// Persons
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/persons
pub async fn create_person(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(mut input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<DataResponse<Person>>)> {
    input.name = validate_name("Name", &input.name, MAX_PERSON_NAME_LENGTH).map_err(invalid)?;
    validate_optional_url("Profile URL", input.profile_url.as_deref()).map_err(invalid)?;

    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(person_id = person.id, admin_id = admin.admin_id, "Person created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: person })))
}

/// PUT /api/v1/admin/persons/{id}
pub async fn update_person(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Person>>> {
    if let Some(name) = input.name.as_deref() {
        input.name = Some(validate_name("Name", name, MAX_PERSON_NAME_LENGTH).map_err(invalid)?);
    }
    validate_optional_url("Profile URL", input.profile_url.as_deref()).map_err(invalid)?;

    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Person", id })?;
    tracing::info!(person_id = id, admin_id = admin.admin_id, "Person updated");
    Ok(Json(DataResponse { data: person }))
}

/// DELETE /api/v1/admin/persons/{id}
pub async fn delete_person(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PersonRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Person", id }.into());
    }
    tracing::info!(person_id = id, admin_id = admin.admin_id, "Person deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/genres
pub async fn create_genre(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(input): Json<CreateGenreRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Genre>>)> {
    let name = validate_name("Genre name", &input.name, MAX_GENRE_NAME_LENGTH).map_err(invalid)?;
    let slug = resolve_slug(input.slug.as_deref(), &name).map_err(invalid)?;

    let genre = GenreRepo::create(&state.pool, &CreateGenre { name, slug }).await?;
    tracing::info!(
        genre_id = genre.id,
        slug = %genre.slug,
        admin_id = admin.admin_id,
        "Genre created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: genre })))
}

/// PUT /api/v1/admin/genres/{id}
pub async fn update_genre(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGenre>,
) -> AppResult<Json<DataResponse<Genre>>> {
    let name = input
        .name
        .as_deref()
        .map(|n| validate_name("Genre name", n, MAX_GENRE_NAME_LENGTH))
        .transpose()
        .map_err(invalid)?;
    let slug = input.slug.as_deref().map(str::trim).map(str::to_string);
    if let Some(slug) = slug.as_deref() {
        validate_slug(slug).map_err(invalid)?;
    }

    let genre = GenreRepo::update(&state.pool, id, &UpdateGenre { name, slug })
        .await?
        .ok_or(CoreError::NotFound { entity: "Genre", id })?;
    tracing::info!(genre_id = id, admin_id = admin.admin_id, "Genre updated");
    Ok(Json(DataResponse { data: genre }))
}

/// DELETE /api/v1/admin/genres/{id}
///
/// Untags every movie carrying the genre.
pub async fn delete_genre(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GenreRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Genre", id }.into());
    }
    tracing::info!(genre_id = id, admin_id = admin.admin_id, "Genre deleted");
    Ok(StatusCode::NO_CONTENT)
}
