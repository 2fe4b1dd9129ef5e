//! Shared-secret gate for admin endpoints.
//!
//! The secret travels in the request body (`password`), which is how the
//! existing admin frontend sends it. Admin handlers take the raw body and go
//! through [`authorize`], so the secret is judged before the payload shape:
//! a missing, non-string or wrong `password` is always a 401, whatever the
//! content type or the rest of the body.

use std::fmt;

use logpose_core::LogPoseError;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn verify(&self, candidate: &str) -> Result<(), LogPoseError> {
        if candidate == self.0 {
            Ok(())
        } else {
            Err(LogPoseError::Unauthorized("wrong admin secret".into()))
        }
    }
}

/// Check the secret in `body`, then parse the body as `T`.
///
/// Only syntactically broken JSON fails before the secret check; there is no
/// `password` to read from it. An empty body counts as `{}`.
pub fn authorize<T: DeserializeOwned>(
    secret: &AdminSecret,
    body: &[u8],
    action: &str,
) -> Result<T, LogPoseError> {
    let raw: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)
            .map_err(|e| LogPoseError::InvalidInput(format!("malformed JSON body: {e}")))?
    };

    let candidate = raw.get("password").and_then(Value::as_str).unwrap_or_default();
    if let Err(e) = secret.verify(candidate) {
        tracing::warn!("rejected {action}: wrong admin secret");
        return Err(e);
    }

    serde_json::from_value(raw).map_err(|e| LogPoseError::InvalidInput(e.to_string()))
}

// Never print the secret itself.
impl fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminSecret(***)")
    }
}
