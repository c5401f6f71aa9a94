//! Inbound analysis request extraction and validation.
//!
//! The request body is taken as raw JSON rather than a derived struct so
//! that every malformed shape (missing field, wrong type, non-string
//! element, empty list) produces the same caller-facing validation error
//! instead of a framework-shaped rejection.

use serde_json::Value;

use crate::error::CoreError;

/// Error message returned for any invalid frame payload.
pub const FRAMES_REQUIRED: &str = "Video frames are required";

/// A validated analysis request: a non-empty, ordered list of
/// data-URI-encoded still frames sampled from the source video.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Encoded frames in temporal order.
    pub frames: Vec<String>,
}

impl AnalysisRequest {
    /// Extract and validate the frame list from a raw request body.
    ///
    /// The `frames` field must be present, must be an array, every element
    /// must be a string, and the array must be non-empty. Frame order is
    /// preserved.
    pub fn from_value(body: &Value) -> Result<Self, CoreError> {
        let frames = body
            .get("frames")
            .and_then(Value::as_array)
            .ok_or_else(|| CoreError::Validation(FRAMES_REQUIRED.to_string()))?;

        let frames: Vec<String> = frames
            .iter()
            .map(|f| {
                f.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| CoreError::Validation(FRAMES_REQUIRED.to_string()))
            })
            .collect::<Result<_, _>>()?;

        if frames.is_empty() {
            return Err(CoreError::Validation(FRAMES_REQUIRED.to_string()));
        }

        Ok(Self { frames })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
