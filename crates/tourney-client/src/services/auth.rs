//! Login, registration and the current user's profile.

use tourney_protocol::{Credentials, LoginResponse, ProfileUpdate, RegisterResponse, Registration, User};
use tourney_transport::{Method, RequestBody, Transport};

use crate::{ApiClient, ApiError};

/// Sign-in, sign-up and the current user's profile.
///
/// These calls do not touch the session themselves. Storing the token
/// after [`login`](Self::login) and ending the session after
/// [`logout`](Self::logout) is up to the caller.
pub struct AuthService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthService<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// `POST /login`
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.client.send_form(Method::Post, "/login", credentials).await
    }

    /// `POST /register`
    pub async fn register(&self, registration: &Registration) -> Result<RegisterResponse, ApiError> {
        self.client
            .send_form(Method::Post, "/register", registration)
            .await
    }

    /// `POST /logout`. Revokes the token server-side.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client
            .execute(Method::Post, "/logout", RequestBody::Empty)
            .await
    }

    /// `GET /user`
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.client.get("/user").await
    }

    /// `PUT /user`, sent as multipart so an avatar can ride along.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.client.send_form(Method::Put, "/user", update).await
    }
}
