use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::ServiceError;

/// Name of the opaque session cookie set by the auth layer.
pub const SESSION_COOKIE: &str = "session";

/// Caller identity resolved from the session credential.
///
/// Resolution belongs to the auth subsystem; this extractor only reads its
/// output and short-circuits with 401 when no identity is present. Handlers
/// trust the extracted id completely and never re-validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(Uuid);

impl Identity {
    pub fn owner_id(&self) -> Uuid {
        self.0
    }
}

impl FromRequest for Identity {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = req
            .cookie(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
            .map(Identity)
            .ok_or(ServiceError::Unauthorized);
        ready(resolved)
    }
}
