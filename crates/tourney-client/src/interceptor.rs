//! Request and response interceptors.
//!
//! Every request passes through the client's interceptors, in
//! registration order, just before it is handed to the transport; every
//! response passes through them right after it comes back. The default
//! chain is:
//!
//! 1. [`BearerAuth`]: attach `Authorization: Bearer <token>`
//! 2. [`MultipartContentType`]: let the transport set the boundary
//! 3. [`UnauthorizedTeardown`]: end the session on any 401
//!
//! Interceptors only shape requests and observe responses. They never
//! turn a response into an error or swallow one.

use tourney_session::{EndReason, SessionContext};
use tourney_transport::{HttpRequest, HttpResponse};

/// A hook around every dispatched request.
///
/// Both methods default to doing nothing, so an interceptor only
/// implements the side it cares about.
pub trait Interceptor: Send + Sync + 'static {
    /// Shapes an outgoing request.
    fn on_request(&self, _request: &mut HttpRequest) {}

    /// Observes an incoming response, whatever its status.
    fn on_response(&self, _response: &HttpResponse) {}
}

// ---------------------------------------------------------------------------
// BearerAuth
// ---------------------------------------------------------------------------

/// Attaches the session token as a bearer credential.
///
/// The token is read per request, so a login or logout takes effect on
/// the very next call. With no token the header is removed, never sent
/// empty.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    session: SessionContext,
}

impl BearerAuth {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl Interceptor for BearerAuth {
    fn on_request(&self, request: &mut HttpRequest) {
        match self.session.token() {
            Some(token) => request
                .headers
                .insert("Authorization", format!("Bearer {token}")),
            None => {
                request.headers.remove("Authorization");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MultipartContentType
// ---------------------------------------------------------------------------

/// Drops the default JSON `Content-Type` from multipart requests.
///
/// The multipart boundary is chosen by the transport, which can only
/// write a correct `multipart/form-data; boundary=…` header if none is
/// set already.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipartContentType;

impl Interceptor for MultipartContentType {
    fn on_request(&self, request: &mut HttpRequest) {
        if request.body.is_multipart() {
            request.headers.remove("Content-Type");
        }
    }
}

// ---------------------------------------------------------------------------
// UnauthorizedTeardown
// ---------------------------------------------------------------------------

/// Ends the session when the server answers 401, whatever the endpoint.
///
/// Ending the session emits [`SessionEvent::Ended`](tourney_session::SessionEvent)
/// with [`EndReason::Unauthorized`]; whoever owns navigation subscribes
/// to that. This interceptor knows nothing about routes.
#[derive(Debug, Clone)]
pub struct UnauthorizedTeardown {
    session: SessionContext,
}

impl UnauthorizedTeardown {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl Interceptor for UnauthorizedTeardown {
    fn on_response(&self, response: &HttpResponse) {
        if response.status != 401 {
            return;
        }
        tracing::warn!("401 from server, ending session");
        if let Err(e) = self.session.end(EndReason::Unauthorized) {
            tracing::error!(error = %e, "failed to clear session storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourney_protocol::UserId;
    use tourney_transport::{FormPart, Method, RequestBody};

    fn json_request() -> HttpRequest {
        let mut request = HttpRequest::new(Method::Get, "/tournaments");
        request.headers.insert("Content-Type", "application/json");
        request
    }

    #[test]
    fn test_bearer_auth_with_token() {
        let session = SessionContext::in_memory();
        session.start("abc", None).unwrap();
        let mut request = json_request();
        BearerAuth::new(session).on_request(&mut request);
        assert_eq!(request.headers.get("authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_bearer_auth_without_token() {
        let mut request = json_request();
        request.headers.insert("Authorization", "Bearer stale");
        BearerAuth::new(SessionContext::in_memory()).on_request(&mut request);
        assert!(!request.headers.contains("authorization"));
    }

    #[test]
    fn test_multipart_drops_json_content_type() {
        let mut request = json_request()
            .with_body(RequestBody::Multipart(vec![FormPart::text("name", "Cup")]));
        request.headers.insert("Content-Type", "application/json");
        MultipartContentType.on_request(&mut request);
        assert!(!request.headers.contains("content-type"));

        let mut plain = json_request().with_body(RequestBody::Json(b"{}".to_vec()));
        MultipartContentType.on_request(&mut plain);
        assert_eq!(plain.headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn test_teardown_only_on_401() {
        let session = SessionContext::in_memory();
        session.start("abc", Some(UserId(3))).unwrap();
        let teardown = UnauthorizedTeardown::new(session.clone());

        teardown.on_response(&HttpResponse::new(403, ""));
        assert!(session.is_authenticated());

        teardown.on_response(&HttpResponse::new(401, ""));
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
    }
}
