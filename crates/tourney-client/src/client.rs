//! `ApiClient` builder and request dispatch.
//!
//! The client ties the layers together: session → interceptors →
//! transport → codec. Façades ([`auth`](ApiClient::auth),
//! [`tournaments`](ApiClient::tournaments), [`matches`](ApiClient::matches))
//! borrow it and issue one call each.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tourney_protocol::{encode_form, Codec, ErrorBody, FormPayload, JsonCodec};
use tourney_session::SessionContext;
use tourney_transport::{Headers, HttpRequest, HttpResponse, Method, RequestBody, Transport};

use crate::interceptor::{BearerAuth, Interceptor, MultipartContentType, UnauthorizedTeardown};
use crate::services::{AuthService, MatchService, TournamentService};
use crate::{ApiError, ClientConfig};

#[cfg(feature = "http")]
use tourney_transport::HttpTransport;

/// State shared by every clone of a client.
struct ClientInner<T: Transport> {
    transport: T,
    session: SessionContext,
    codec: JsonCodec,
    default_headers: Headers,
    interceptors: Vec<Box<dyn Interceptor>>,
}

/// Builder for an [`ApiClient`].
///
/// # Example
///
/// ```rust,ignore
/// use tourney_client::{ApiClientBuilder, ClientConfig};
/// use tourney_session::SessionContext;
///
/// let client = ApiClientBuilder::new()
///     .config(ClientConfig::default())
///     .session(SessionContext::in_memory())
///     .build_http()?;
/// let tournaments = client.tournaments().list().await?;
/// ```
pub struct ApiClientBuilder {
    config: ClientConfig,
    session: Option<SessionContext>,
    extra: Vec<Box<dyn Interceptor>>,
}

impl ApiClientBuilder {
    /// Creates a builder with [`ClientConfig::default`] and no session.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            session: None,
            extra: Vec::new(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the base address requests are joined onto.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Sets the session the client reads its token from and ends on 401.
    ///
    /// Without one, the client gets a fresh in-memory session.
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// Appends an interceptor after the default chain.
    pub fn interceptor(mut self, interceptor: impl Interceptor) -> Self {
        self.extra.push(Box::new(interceptor));
        self
    }

    /// Builds a client over any transport.
    pub fn build<T: Transport>(self, transport: T) -> ApiClient<T> {
        let session = self.session.unwrap_or_else(SessionContext::in_memory);

        let mut interceptors: Vec<Box<dyn Interceptor>> = vec![
            Box::new(BearerAuth::new(session.clone())),
            Box::new(MultipartContentType),
            Box::new(UnauthorizedTeardown::new(session.clone())),
        ];
        interceptors.extend(self.extra);

        ApiClient {
            inner: Arc::new(ClientInner {
                transport,
                session,
                codec: JsonCodec,
                default_headers: self.config.default_headers,
                interceptors,
            }),
        }
    }

    /// Builds a client over [`HttpTransport`] using the configured base
    /// address and timeout.
    #[cfg(feature = "http")]
    pub fn build_http(self) -> Result<ApiClient<HttpTransport>, ApiError> {
        let transport = HttpTransport::new(&self.config.base_url, self.config.timeout)?;
        Ok(self.build(transport))
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The HTTP access layer. Cloning is cheap; clones share the transport,
/// session and interceptors.
pub struct ApiClient<T: Transport> {
    inner: Arc<ClientInner<T>>,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("session", &self.inner.session)
            .field("interceptors", &self.inner.interceptors.len())
            .finish()
    }
}

impl<T: Transport> ApiClient<T> {
    /// The session this client authenticates with.
    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    pub fn auth(&self) -> AuthService<'_, T> {
        AuthService::new(self)
    }

    pub fn tournaments(&self) -> TournamentService<'_, T> {
        TournamentService::new(self)
    }

    pub fn matches(&self) -> MatchService<'_, T> {
        MatchService::new(self)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Sends one request through the interceptor chain.
    ///
    /// Returns the response only when its status is 2xx. Anything else
    /// becomes [`ApiError::Status`] after the response interceptors have
    /// seen it.
    pub async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        let mut request = HttpRequest::new(method, path).with_body(body);
        for (name, value) in self.inner.default_headers.iter() {
            request.headers.insert(name, value);
        }
        for interceptor in &self.inner.interceptors {
            interceptor.on_request(&mut request);
        }

        let path = request.path.clone();
        let response = match self.inner.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%method, %path, error = %e, "request failed without response");
                return Err(e.into());
            }
        };
        tracing::debug!(%method, %path, status = response.status, "response received");

        for interceptor in &self.inner.interceptors {
            interceptor.on_response(&response);
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: response.status,
                body: ErrorBody::from_bytes(&response.body),
            })
        }
    }

    /// Dispatches and decodes the JSON response body.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<R, ApiError> {
        let response = self.dispatch(method, path, body).await?;
        Ok(self.inner.codec.decode(&response.body)?)
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.fetch(Method::Get, path, RequestBody::Empty).await
    }

    /// Encodes `payload` (JSON or multipart, by its declared fields) and
    /// decodes the reply.
    pub(crate) async fn send_form<P, R>(
        &self,
        method: Method,
        path: &str,
        payload: &P,
    ) -> Result<R, ApiError>
    where
        P: FormPayload + Sync,
        R: DeserializeOwned,
    {
        let body = encode_form(payload)?;
        self.fetch(method, path, body).await
    }

    /// Dispatches and discards whatever the server sent back.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<(), ApiError> {
        self.dispatch(method, path, body).await.map(drop)
    }
}
