use crate::api::models::{SearchRequest, SearchResponse};
use crate::cli::ReadArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::output;

pub async fn run(ctx: &AppContext, args: ReadArgs) -> AppResult<()> {
    let request = SearchRequest {
        query: args.query,
        max_results: args.max_results,
        format: args.format,
    };

    // Bounds failures must be reported before any network traffic, the
    // token refresh included.
    request.validate()?;

    let access_token = ctx.access_token().await?;
    log::debug!("searching with query `{}`", request.query);
    let messages = ctx.client.search(&request, &access_token).await?;

    let response = SearchResponse {
        result_count: messages.len(),
        query: request.query,
        messages,
    };
    output::print_success(&response)
}
