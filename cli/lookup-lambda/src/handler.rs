//! Invocation handler.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::{Error, LambdaEvent};
use lm_cli_common::to_gateway_response;
use lm_error::LmError;
use lm_lookup::{LatestObjectLookup, OutputFormat};
use lm_types::{LookupEvent, PrefixStrategy};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Time kept back from the invocation deadline to return a response.
const DEADLINE_MARGIN: Duration = Duration::from_millis(500);

/// Handle one invocation.
///
/// The lookup is cancelled shortly before the invocation deadline so the
/// caller gets a 504 instead of a runtime timeout. Lookup failures become
/// responses; this never returns `Err`.
pub async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
    lookup: &LatestObjectLookup,
) -> Result<ApiGatewayProxyResponse, Error> {
    let budget = remaining_budget(event.context.deadline, SystemTime::now());
    debug!(
        request_id = %event.context.request_id,
        budget_ms = budget.as_millis() as u64,
        "Invocation received"
    );

    let cancel = CancellationToken::new();
    let _cancel_on_exit = cancel.clone().drop_guard();

    let timer = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = timer.cancelled() => {}
            _ = tokio::time::sleep(budget) => {
                warn!("Invocation deadline near, cancelling lookup");
                timer.cancel();
            }
        }
    });

    Ok(handle_payload(lookup, event.payload, &cancel).await)
}

/// Run a lookup for a raw invocation payload.
pub async fn handle_payload(
    lookup: &LatestObjectLookup,
    payload: serde_json::Value,
    cancel: &CancellationToken,
) -> ApiGatewayProxyResponse {
    let result = match parse_event(&lookup.config().strategy, payload) {
        Ok(event) => lookup.run(event.as_ref(), cancel).await,
        Err(e) => Err(e),
    };

    to_gateway_response(result, OutputFormat::Json)
}

/// Static-prefix lookups ignore the payload.
fn parse_event(
    strategy: &PrefixStrategy,
    payload: serde_json::Value,
) -> lm_error::Result<Option<LookupEvent>> {
    match strategy {
        PrefixStrategy::Static { .. } => Ok(None),
        PrefixStrategy::Partitioned { .. } => serde_json::from_value(payload)
            .map(Some)
            .map_err(|e| LmError::Configuration(format!("invalid event: {e}"))),
    }
}

/// Time left before `deadline_ms` (milliseconds since the epoch), minus the margin.
fn remaining_budget(deadline_ms: u64, now: SystemTime) -> Duration {
    let now_ms = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    Duration::from_millis(deadline_ms.saturating_sub(now_ms)).saturating_sub(DEADLINE_MARGIN)
}
