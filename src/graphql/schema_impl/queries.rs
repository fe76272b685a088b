use async_graphql::{Context, Object, ID};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_student},
    errors::AppResult,
    graphql::helpers::parse_id,
    models::dto::response::{AttemptResult, QuizForTaking},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quiz_for_taking(&self, ctx: &Context<'_>, id: ID) -> AppResult<QuizForTaking> {
        let state = ctx.data::<AppState>()?;
        extract_claims_from_context(ctx)?;

        let quiz_id = parse_id(&id)?;
        state.quiz_service.get_quiz_for_taking(&quiz_id).await
    }

    async fn my_results(&self, ctx: &Context<'_>) -> AppResult<Vec<AttemptResult>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx)?;

        require_student(&claims)?;

        state
            .quiz_attempt_service
            .results_for_student(&claims.sub)
            .await
    }
}
