//! Participant API client (frontend → Giftex server).
//!
//! Stateless calls (`list_participants`) work immediately; session-scoped
//! calls (`draw`, `logout`) require a prior [`ParticipantClient::login`],
//! after which the session token is attached to every request in the
//! `Giftex-Session` header.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::headers::SESSION_HEADER;
use crate::objects::{
    Ack, DrawResponse, LoginRequest, LoginResponse, ParticipantSummary, SessionInfo,
};

/// Typed HTTP client for the Giftex **Participant API**.
#[derive(Debug, Clone)]
pub struct ParticipantClient {
    http: Client,
    base_url: Url,
    token: Option<Uuid>,
}

impl ParticipantClient {
    /// Create a new `ParticipantClient`.
    ///
    /// * `base_url` – root URL of the Giftex server.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// The current session token, if logged in.
    pub fn token(&self) -> Option<Uuid> {
        self.token
    }

    /// `GET /api/participants` – public roster listing.
    pub async fn list_participants(&self) -> Result<Vec<ParticipantSummary>, ClientError> {
        let url = self.base_url.join("/api/participants")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/session` – log in as the given participant and remember
    /// the issued token.
    pub async fn login(&mut self, participant_id: i64) -> Result<LoginResponse, ClientError> {
        let url = self.base_url.join("/api/session")?;
        let resp = self
            .http
            .post(url)
            .json(&LoginRequest::Participant { id: participant_id })
            .send()
            .await?;

        let login: LoginResponse = parse_response(resp).await?;
        self.token = Some(login.token);
        Ok(login)
    }

    /// `GET /api/session` – the identity behind the current token, or `None`.
    pub async fn current_identity(&self) -> Result<Option<SessionInfo>, ClientError> {
        let url = self.base_url.join("/api/session")?;
        let mut req = self.http.get(url);
        if let Some(token) = self.token {
            req = req.header(SESSION_HEADER, token.to_string());
        }
        let resp = req.send().await?;
        parse_response(resp).await
    }

    /// `DELETE /api/session` – end the session and forget the token.
    pub async fn logout(&mut self) -> Result<Ack, ClientError> {
        let url = self.base_url.join("/api/session")?;
        let mut req = self.http.delete(url);
        if let Some(token) = self.token.take() {
            req = req.header(SESSION_HEADER, token.to_string());
        }
        let resp = req.send().await?;
        parse_response(resp).await
    }

    /// `POST /api/draw` – draw a recipient (idempotent once assigned).
    pub async fn draw(&self) -> Result<DrawResponse, ClientError> {
        let token = self.token.ok_or(ClientError::NotLoggedIn)?;
        let url = self.base_url.join("/api/draw")?;
        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, token.to_string())
            .send()
            .await?;
        parse_response(resp).await
    }
}
