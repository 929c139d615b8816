//! Requester extraction from the session cookie.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};
use std::sync::Arc;

use quill_core::ports::{SessionError, SessionTokenService};

use crate::error::PageError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Authenticated requester identity extractor.
///
/// Use this in handlers that create or mutate posts:
/// ```ignore
/// async fn add(requester: Requester, ...) -> PageResult<HttpResponse> {
///     let post = Post::new(requester.user_id, title, content);
///     ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Requester {
    pub user_id: i32,
    pub username: String,
}

impl FromRequest for Requester {
    type Error = PageError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sessions = match req.app_data::<web::Data<Arc<dyn SessionTokenService>>>() {
            Some(service) => service,
            None => {
                tracing::error!("SessionTokenService not found in app data");
                return ready(Err(PageError::Internal(
                    "Server configuration error".to_string(),
                )));
            }
        };

        let Some(cookie) = req.cookie(SESSION_COOKIE) else {
            return ready(Err(SessionError::MissingCookie.into()));
        };

        match sessions.validate_token(cookie.value()) {
            Ok(claims) => ready(Ok(Requester {
                user_id: claims.user_id,
                username: claims.username,
            })),
            Err(e) => ready(Err(e.into())),
        }
    }
}
