use std::rc::Rc;
use std::task::{Context, Poll};

use actix_service::{Service, Transform};
use actix_session::SessionExt;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{Error, HttpResponse, ResponseError};
use futures::future::{ok, LocalBoxFuture, Ready};
use futures::FutureExt;
use thiserror::Error;

use crate::utils::errors::ApiError;
use crate::utils::session::SessionContext;

/// Capability guard applied uniformly to route scopes instead of ad hoc
/// per-handler role checks. API scopes answer 401 JSON; page scopes can opt
/// into a redirect to the landing page instead.
#[derive(Clone, Copy)]
pub struct SessionGuard {
    admin_only: bool,
    redirect_to: Option<&'static str>,
}

impl SessionGuard {
    pub fn user() -> Self {
        SessionGuard {
            admin_only: false,
            redirect_to: None,
        }
    }

    pub fn admin() -> Self {
        SessionGuard {
            admin_only: true,
            redirect_to: None,
        }
    }

    pub fn or_redirect(mut self, path: &'static str) -> Self {
        self.redirect_to = Some(path);
        self
    }
}

#[derive(Debug, Error)]
#[error("redirecting to {0}")]
struct GuardRedirect(&'static str);

impl ResponseError for GuardRedirect {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((header::LOCATION, self.0))
            .finish()
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SessionGuardService {
            service: Rc::new(service),
            guard: *self,
        })
    }
}

pub struct SessionGuardService<S> {
    service: Rc<S>,
    guard: SessionGuard,
}

impl<S, B> Service<ServiceRequest> for SessionGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let user = SessionContext::new(req.get_session()).current_user();

        let denial = match user {
            None => Some("Login required"),
            Some(ref user) if self.guard.admin_only && !user.is_admin => {
                Some("Admin access required")
            }
            Some(_) => None,
        };

        match denial {
            None => service.call(req).boxed_local(),
            Some(message) => match self.guard.redirect_to {
                Some(path) => Box::pin(async move { Err(GuardRedirect(path).into()) }),
                None => Box::pin(async move {
                    Err(ApiError::Unauthorized(message.to_string()).into())
                }),
            },
        }
    }
}
