use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_student, require_teacher},
    errors::AppResult,
    graphql::helpers::parse_id,
    models::dto::request::SubmittedAnswerInput,
    services::GradingOutcome,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_attempt(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        answers: Vec<SubmittedAnswerInput>,
    ) -> AppResult<GradingOutcome> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_student(&claims)?;

        let quiz_id = parse_id(&quiz_id)?;
        state
            .quiz_attempt_service
            .submit(&claims.sub, &quiz_id, answers.into())
            .await
    }

    async fn preview_attempt(
        &self,
        ctx: &Context<'_>,
        quiz_id: ID,
        answers: Vec<SubmittedAnswerInput>,
    ) -> AppResult<GradingOutcome> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_teacher(&claims)?;

        let quiz_id = parse_id(&quiz_id)?;
        state
            .quiz_attempt_service
            .preview(&claims.sub, &quiz_id, answers.into())
            .await
    }
}
