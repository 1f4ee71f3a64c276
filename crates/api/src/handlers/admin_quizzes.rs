//! Quiz authoring handlers. Admin reads include the answer key.

use axum::extract::State;
use axum::http::StatusCode;
use marquee_core::catalog::{validate_name, MAX_TITLE_LENGTH};
use marquee_core::error::CoreError;
use marquee_core::quiz::{validate_question, validate_question_count};
use marquee_core::types::DbId;
use marquee_db::models::quiz::{
    CreateQuiz, QuestionInput, QuizQuestion, QuizSummary, QuizWithQuestions, UpdateQuiz,
};
use marquee_db::repositories::QuizRepo;

use crate::error::AppResult;
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireCatalogManager;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Check the question set and report the first bad question by position.
fn validate_questions(questions: &[QuestionInput]) -> Result<(), CoreError> {
    validate_question_count(questions.len()).map_err(CoreError::Validation)?;
    for (idx, q) in questions.iter().enumerate() {
        validate_question(&q.prompt, &q.options, q.correct_index)
            .map_err(|msg| CoreError::Validation(format!("Question {}: {msg}", idx + 1)))?;
    }
    Ok(())
}

async fn load(state: &AppState, id: DbId) -> AppResult<QuizWithQuestions<QuizQuestion>> {
    let quiz = QuizRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Quiz", id })?;
    let questions = QuizRepo::questions(&state.pool, id).await?;
    Ok(QuizWithQuestions { quiz, questions })
}

/// GET /api/v1/admin/quizzes
pub async fn list_quizzes(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<QuizSummary>>> {
    let (limit, offset) = params.resolve();
    let quizzes = QuizRepo::list(&state.pool, false, limit, offset).await?;
    let total = QuizRepo::count(&state.pool, false).await?;

    Ok(Json(PageResponse {
        data: quizzes,
        total,
        limit,
        offset,
    }))
}

/// POST /api/v1/admin/quizzes
pub async fn create_quiz(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Json(mut input): Json<CreateQuiz>,
) -> AppResult<(StatusCode, Json<DataResponse<QuizWithQuestions<QuizQuestion>>>)> {
    input.title =
        validate_name("Title", &input.title, MAX_TITLE_LENGTH).map_err(CoreError::Validation)?;
    validate_questions(&input.questions)?;

    let quiz = QuizRepo::create_with_questions(&state.pool, &input).await?;
    tracing::info!(
        quiz_id = quiz.id,
        questions = input.questions.len(),
        admin_id = admin.admin_id,
        "Quiz created",
    );

    let created = load(&state, quiz.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/admin/quizzes/{id}
pub async fn get_quiz(
    State(state): State<AppState>,
    RequireCatalogManager(_admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuizWithQuestions<QuizQuestion>>>> {
    Ok(Json(DataResponse {
        data: load(&state, id).await?,
    }))
}

/// PUT /api/v1/admin/quizzes/{id}
///
/// Supplying `questions` replaces the whole question set.
pub async fn update_quiz(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateQuiz>,
) -> AppResult<Json<DataResponse<QuizWithQuestions<QuizQuestion>>>> {
    if let Some(title) = input.title.as_deref() {
        input.title =
            Some(validate_name("Title", title, MAX_TITLE_LENGTH).map_err(CoreError::Validation)?);
    }
    if let Some(questions) = input.questions.as_deref() {
        validate_questions(questions)?;
    }

    QuizRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Quiz", id })?;
    tracing::info!(
        quiz_id = id,
        questions_replaced = input.questions.is_some(),
        admin_id = admin.admin_id,
        "Quiz updated",
    );

    Ok(Json(DataResponse {
        data: load(&state, id).await?,
    }))
}

/// DELETE /api/v1/admin/quizzes/{id}
pub async fn delete_quiz(
    State(state): State<AppState>,
    RequireCatalogManager(admin): RequireCatalogManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !QuizRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: "Quiz", id }.into());
    }
    tracing::info!(quiz_id = id, admin_id = admin.admin_id, "Quiz deleted");
    Ok(StatusCode::NO_CONTENT)
}
