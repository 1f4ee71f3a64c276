//! Public quiz handlers: browsing published quizzes and submitting answers.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::error::CoreError;
use marquee_core::quiz::{score_answers, AnswerKey, QuizScore, SubmittedAnswer};
use marquee_core::types::DbId;
use marquee_db::models::quiz::{PublicQuestion, Quiz, QuizSummary, QuizWithQuestions};
use marquee_db::repositories::QuizRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireUser;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Request body for `POST /quizzes/{id}/attempts`.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<SubmittedAnswer>,
}

/// A scored attempt, with the correct answer revealed per question.
#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub attempt_id: DbId,
    pub quiz_id: DbId,
    #[serde(flatten)]
    pub result: QuizScore,
}

async fn find_published(state: &AppState, id: DbId) -> AppResult<Quiz> {
    QuizRepo::find_published(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Quiz", id }.into())
}

/// GET /api/v1/quizzes
pub async fn list_quizzes(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<QuizSummary>>> {
    let (limit, offset) = params.resolve();
    let quizzes = QuizRepo::list(&state.pool, true, limit, offset).await?;
    let total = QuizRepo::count(&state.pool, true).await?;

    Ok(Json(PageResponse {
        data: quizzes,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/quizzes/{id}
///
/// Questions are served without their answers.
pub async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuizWithQuestions<PublicQuestion>>>> {
    let quiz = find_published(&state, id).await?;
    let questions = QuizRepo::questions(&state.pool, id)
        .await?
        .into_iter()
        .map(PublicQuestion::from)
        .collect();

    Ok(Json(DataResponse {
        data: QuizWithQuestions { quiz, questions },
    }))
}

/// POST /api/v1/quizzes/{id}/attempts
pub async fn submit_attempt(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitQuizRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AttemptResponse>>)> {
    find_published(&state, id).await?;

    let key: Vec<AnswerKey> = QuizRepo::questions(&state.pool, id)
        .await?
        .iter()
        .map(|q| AnswerKey {
            question_id: q.id,
            correct_index: q.correct_index,
        })
        .collect();

    let result = score_answers(&key, &input.answers).map_err(CoreError::Validation)?;
    let attempt =
        QuizRepo::record_attempt(&state.pool, id, user.user_id, result.score, result.total).await?;

    tracing::info!(
        quiz_id = id,
        user_id = user.user_id,
        score = result.score,
        total = result.total,
        "Quiz attempt recorded",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AttemptResponse {
                attempt_id: attempt.id,
                quiz_id: id,
                result,
            },
        }),
    ))
}
