//! Contact form submission
//!
//! Collect body -> decode JSON -> validate -> compose -> relay.
//! Every failure is turned into exactly one JSON error response here.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde_json::Value;

use crate::config::AppState;
use crate::contact::Submission;
use crate::error::HandlerError;
use crate::http;
use crate::logger;
use crate::mailer;

/// Handle `POST /`
pub async fn handle_submission<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match process_submission(req, state).await {
        Ok(()) => http::build_delivered_response(),
        Err(err) => error_response(&err),
    }
}

async fn process_submission<B>(req: Request<B>, state: &AppState) -> Result<(), HandlerError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = state.config.http.max_body_size;
    http::check_content_length(req.headers(), limit)?;
    let bytes = http::collect_limited(req.into_body(), limit).await?;

    let value: Value = serde_json::from_slice(&bytes)?;
    let submission = Submission::from_value(&value).ok_or(HandlerError::InvalidBody)?;

    let payload = mailer::compose(&submission, &state.config.mail);
    state.mailer.send(payload).await?;

    logger::log_delivered(submission.email());
    Ok(())
}

fn error_response(err: &HandlerError) -> Response<Full<Bytes>> {
    let status = err.status();
    if status.is_server_error() {
        logger::log_request_failed(err);
    } else {
        tracing::debug!("Rejected submission: {err}");
    }

    match status {
        StatusCode::BAD_REQUEST => http::build_400_response(),
        StatusCode::PAYLOAD_TOO_LARGE => http::build_413_response(),
        _ => http::build_500_response(),
    }
}
