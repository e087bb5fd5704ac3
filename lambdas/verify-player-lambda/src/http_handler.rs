use football_hero_shared::{players, responses, AppState};
use lambda_http::{Body, Error, Request, Response};
use std::sync::Arc;

/// Lambda handler for /verify-player-email.
///
/// This is the only error boundary: anything that escapes the verification
/// flow is logged and answered with the fixed 500 body, so the runtime never
/// sees an `Err`.
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!(
        "Verify player Lambda invoked - Method: {} Path: {}",
        event.method(),
        event.uri().path()
    );

    match players::verify_player(state.store.as_ref(), event.body()).await {
        Ok(resp) => Ok(resp),
        Err(e) => {
            tracing::error!("Unhandled error verifying player: {}", e);
            Ok(responses::internal_error_response())
        }
    }
}
