//! Request body collection with a size cap

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::HeaderMap;

use crate::error::HandlerError;
use crate::logger;

/// Reject a request early when its declared `Content-Length` exceeds the cap.
///
/// A missing or unparsable header is not an error here; the streaming limit
/// in [`collect_limited`] still applies.
pub fn check_content_length(headers: &HeaderMap, max_body_size: u64) -> Result<(), HandlerError> {
    let Some(content_length) = headers.get(hyper::header::CONTENT_LENGTH) else {
        return Ok(());
    };
    let Ok(size_str) = content_length.to_str() else {
        logger::log_warning("Content-Length header contains non-ASCII characters");
        return Ok(());
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Err(HandlerError::PayloadTooLarge {
                limit: max_body_size,
            })
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Accumulate the whole body, failing once more than `limit` bytes arrive
pub async fn collect_limited<B>(body: B, limit: u64) -> Result<Bytes, HandlerError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let cap = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, cap).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(HandlerError::PayloadTooLarge { limit })
        }
        Err(err) => Err(HandlerError::BodyRead(err.to_string())),
    }
}
