use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::domain::user::model::SessionUser;
use crate::utils::errors::ApiError;

pub const SESSION_USER_KEY: &str = "user";

/// Thin wrapper over the Actix session so handlers deal with the principal
/// type instead of raw key/value access.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    pub fn persist_user(&self, user: &SessionUser) -> Result<(), ApiError> {
        self.0
            .insert(SESSION_USER_KEY, user)
            .map_err(|e| ApiError::InternalServerError(format!("failed to persist session: {}", e)))
    }

    /// The logged-in principal, if any. A cookie that fails to decode is
    /// treated as no session.
    pub fn current_user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(SESSION_USER_KEY) {
            Ok(user) => user,
            Err(e) => {
                log::warn!("invalid principal in session cookie: {}", e);
                None
            }
        }
    }

    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(SessionContext::new(req.get_session())))
    }
}

/// Extractor for handlers that require a logged-in user. Responds 401 with
/// the standard error body when the session has no principal.
pub struct Principal(pub SessionUser);

impl FromRequest for Principal {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = SessionContext::new(req.get_session());
        ready(match context.current_user() {
            Some(user) => Ok(Principal(user)),
            None => Err(ApiError::Unauthorized("Login required".to_string())),
        })
    }
}
