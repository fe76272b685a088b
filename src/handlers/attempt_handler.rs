use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_student, require_teacher, AuthenticatedUser},
    errors::AppError,
    models::domain::Submission,
};

#[post("/quizzes/{id}/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    submission: web::Json<Submission>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let outcome = state
        .quiz_attempt_service
        .submit(&auth.0.sub, &id, submission.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(outcome))
}

#[post("/quizzes/{id}/preview")]
async fn preview_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    submission: web::Json<Submission>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let outcome = state
        .quiz_attempt_service
        .preview(&auth.0.sub, &id, submission.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[get("/attempts/me")]
async fn my_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let results = state
        .quiz_attempt_service
        .results_for_student(&auth.0.sub)
        .await?;
    Ok(HttpResponse::Ok().json(results))
}
