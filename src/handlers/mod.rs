pub mod attempt_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use attempt_handler::{my_results, preview_attempt, submit_attempt};
pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{generate_quiz, get_quiz, replace_questions};

/// Registers every route. Expects `AppState`, `JwtService` and the GraphQL
/// `Schema` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_ready)
        .service(
            web::resource("/graphql")
                .route(web::post().to(graphql_handler::graphql))
                .route(web::get().to(graphql_handler::graphiql)),
        )
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(generate_quiz)
                .service(get_quiz)
                .service(replace_questions)
                .service(submit_attempt)
                .service(preview_attempt)
                .service(my_results),
        );
}

/// Malformed JSON bodies answer with the same error shape as everything else.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1 << 20)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
