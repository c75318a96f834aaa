//! Acting identity extractor.
//!
//! There is no authentication: the caller names itself in the `X-Actor`
//! header, and a request without one acts as `system`.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;
use sitebook_shared::Actor;

/// Header carrying the acting identity.
pub const ACTOR_HEADER: &str = "x-actor";

/// Extractor for the acting identity.
#[derive(Debug, Clone)]
pub struct ActorHeader(pub Actor);

impl ActorHeader {
    /// Returns the actor.
    #[must_use]
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ActorHeader
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(Self(Actor::system()));
        };

        value.to_str().map(|name| Self(Actor::new(name))).map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "INVALID_ACTOR",
                    "message": "X-Actor header must be visible ASCII"
                })),
            )
        })
    }
}
