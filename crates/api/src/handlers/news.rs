//! Public news handlers. Drafts are invisible here.

use axum::extract::State;
use marquee_core::error::CoreError;
use marquee_db::models::news::{NewsArticle, NewsSummary};
use marquee_db::repositories::NewsRepo;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// GET /api/v1/news
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<NewsSummary>>> {
    let (limit, offset) = params.resolve();
    let articles = NewsRepo::list(&state.pool, true, limit, offset).await?;
    let total = NewsRepo::count(&state.pool, true).await?;

    Ok(Json(PageResponse {
        data: articles,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/news/{slug}
pub async fn get_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<NewsArticle>>> {
    let article = NewsRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFoundByKey {
            entity: "News article",
            key: slug,
        })?;
    Ok(Json(DataResponse { data: article }))
}
