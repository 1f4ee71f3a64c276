//! News editorial handlers. Drafts are visible here; the public side only
//! sees published articles.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::catalog::{validate_name, validate_optional_url, MAX_TITLE_LENGTH};
use marquee_core::error::CoreError;
use marquee_core::slug::{resolve_slug, validate_slug};
use marquee_core::types::DbId;
use marquee_db::models::news::{CreateNews, NewsArticle, NewsSummary, UpdateNews};
use marquee_db::repositories::NewsRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireCatalogManager;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /admin/news`.
#[derive(Debug, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub cover_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

/// Request body for `PUT /admin/news/{id}`. Publication state has its own
/// endpoints.
#[derive(Debug, Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub cover_url: Option<String>,
}

fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::validation("Article body cannot be blank"));
    }
    Ok(())
}

/// GET /api/v1/admin/news
pub async fn list_news(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<NewsSummary>>> {
    let (limit, offset) = params.resolve();
    let articles = NewsRepo::list(&state.pool, false, limit, offset).await?;
    let total = NewsRepo::count(&state.pool, false).await?;

    Ok(Json(PageResponse {
        data: articles,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/admin/news/{id}
pub async fn get_news(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    let article = NewsRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "News article",
            id,
        })?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/news
pub async fn create_news(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(input): Json<CreateNewsRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<NewsArticle>>)> {
    let title =
        validate_name("Title", &input.title, MAX_TITLE_LENGTH).map_err(CoreError::Validation)?;
    let slug = resolve_slug(input.slug.as_deref(), &title).map_err(CoreError::Validation)?;
    validate_body(&input.body)?;
    validate_optional_url("Cover URL", input.cover_url.as_deref()).map_err(CoreError::Validation)?;

    let article = NewsRepo::create(
        &state.pool,
        &CreateNews {
            title,
            slug,
            summary: input.summary,
            body: input.body,
            cover_url: input.cover_url,
            author_id: Some(admin.admin_id),
            is_published: input.is_published,
        },
    )
    .await?;

    tracing::info!(
        news_id = article.id,
        slug = %article.slug,
        published = article.is_published,
        admin_id = admin.admin_id,
        "News article created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /api/v1/admin/news/{id}
pub async fn update_news(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNewsRequest>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    let title = input
        .title
        .as_deref()
        .map(|t| validate_name("Title", t, MAX_TITLE_LENGTH))
        .transpose()
        .map_err(CoreError::Validation)?;
    let slug = input.slug.map(|s| s.trim().to_string());
    if let Some(slug) = slug.as_deref() {
        validate_slug(slug).map_err(CoreError::Validation)?;
    }
    if let Some(body) = input.body.as_deref() {
        validate_body(body)?;
    }
    validate_optional_url("Cover URL", input.cover_url.as_deref()).map_err(CoreError::Validation)?;

    let update = UpdateNews {
        title,
        slug,
        summary: input.summary,
        body: input.body,
        cover_url: input.cover_url,
    };
    let article = NewsRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "News article",
            id,
        })?;

    tracing::info!(news_id = id, admin_id = admin.admin_id, "News article updated");
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /api/v1/admin/news/{id}
pub async fn delete_news(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !NewsRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound {
            entity: "News article",
            id,
        }
        .into());
    }
    tracing::info!(news_id = id, admin_id = admin.admin_id, "News article deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn set_published(
    state: &AppState,
    admin_id: DbId,
    id: DbId,
    published: bool,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    let article = NewsRepo::set_published(&state.pool, id, published)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "News article",
            id,
        })?;
    tracing::info!(news_id = id, admin_id, published, "News publication changed");
    Ok(Json(DataResponse { data: article }))
}

/// POST /api/v1/admin/news/{id}/publish
pub async fn publish_news(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    set_published(&state, admin.admin_id, id, true).await
}

/// POST /api/v1/admin/news/{id}/unpublish
pub async fn unpublish_news(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    set_published(&state, admin.admin_id, id, false).await
}
