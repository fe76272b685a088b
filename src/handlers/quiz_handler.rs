use actix_web::{get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_teacher, AuthenticatedUser, UserRole},
    errors::AppError,
    models::dto::request::{GenerateQuizRequest, UpdateQuestionsRequest},
};

#[post("/quizzes/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let quiz = state
        .quiz_generation_service
        .generate_quiz(request.into_inner(), &auth.0.sub)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

/// Teachers get the full quiz they own; students get it without the key.
#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    match auth.0.role {
        UserRole::Teacher => {
            let quiz = state.quiz_service.get_quiz_for_owner(&id, &auth.0.sub).await?;
            Ok(HttpResponse::Ok().json(quiz))
        }
        UserRole::Student => {
            let quiz = state.quiz_service.get_quiz_for_taking(&id).await?;
            Ok(HttpResponse::Ok().json(quiz))
        }
    }
}

#[put("/quizzes/{id}/questions")]
async fn replace_questions(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuestionsRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_teacher(&auth.0)?;

    let quiz = state
        .quiz_service
        .replace_questions(&id, &auth.0.sub, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}
