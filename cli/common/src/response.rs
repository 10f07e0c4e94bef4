//! Mapping lookup results onto API Gateway proxy responses.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::HeaderValue;
use http::header::CONTENT_TYPE;
use lm_error::{ErrorDisposition, LmError, classify_error};
use lm_lookup::{OutputFormat, encode};
use lm_types::ResultEnvelope;
use tracing::{error, info, warn};

/// Turn a lookup result into the response a caller sees.
///
/// A missing object is not a failure: it answers 200 with a plain-text note.
pub fn to_gateway_response(
    result: lm_error::Result<ResultEnvelope>,
    format: OutputFormat,
) -> ApiGatewayProxyResponse {
    match result.and_then(|envelope| encode(&envelope, format)) {
        Ok(body) => response(200, "application/json", body),
        Err(e) => from_error(&e),
    }
}

/// HTTP status for a failed lookup.
pub fn status_for(e: &LmError) -> i64 {
    match classify_error(e) {
        ErrorDisposition::EmptyResult => 200,
        ErrorDisposition::BadInput if matches!(e, LmError::Configuration(_)) => 400,
        ErrorDisposition::BadInput => 422,
        ErrorDisposition::Upstream => 502,
        ErrorDisposition::Internal => 500,
        ErrorDisposition::Cancelled => 504,
    }
}

/// Whether the response carries a 2xx status.
pub fn is_success(response: &ApiGatewayProxyResponse) -> bool {
    (200..300).contains(&response.status_code)
}

/// The response body as text (empty for binary or missing bodies).
pub fn body_text(response: &ApiGatewayProxyResponse) -> &str {
    match &response.body {
        Some(Body::Text(text)) => text,
        _ => "",
    }
}

fn from_error(e: &LmError) -> ApiGatewayProxyResponse {
    if let LmError::NotFound { bucket, prefix } = e {
        info!(bucket = %bucket, prefix = %prefix, "No object found");
        return response(
            200,
            "text/plain",
            format!("no object found. bucket: {bucket}, prefix: {prefix}"),
        );
    }

    let status = status_for(e);
    if status >= 500 {
        error!(status = status, error = %e, "Lookup failed");
    } else {
        warn!(status = status, error = %e, "Lookup rejected");
    }

    response(status, "text/plain", e.to_string())
}

fn response(status_code: i64, content_type: &'static str, body: String) -> ApiGatewayProxyResponse {
    let mut response = ApiGatewayProxyResponse::default();
    response.status_code = status_code;
    response
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response.body = Some(Body::Text(body));
    response
}
