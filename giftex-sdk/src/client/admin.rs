//! Admin API client (admin dashboard → Giftex server).
//!
//! All admin calls require a session whose identity is the admin; call
//! [`AdminClient::login`] with the shared admin password first.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::headers::SESSION_HEADER;
use crate::objects::{
    Ack, AddParticipantRequest, AddParticipantResponse, LoginRequest, LoginResponse,
    ResetDrawsResponse, RosterEntry, SetPartnersRequest,
};

/// Typed HTTP client for the Giftex **Admin API**.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    token: Option<Uuid>,
}

impl AdminClient {
    /// Create a new `AdminClient`.
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

    /// `POST /api/session` – authenticate with the shared admin password.
    pub async fn login(&mut self, password: impl Into<String>) -> Result<LoginResponse, ClientError> {
        let url = self.base_url.join("/api/session")?;
        let resp = self
            .http
            .post(url)
            .json(&LoginRequest::Admin {
                password: password.into(),
            })
            .send()
            .await?;

        let login: LoginResponse = parse_response(resp).await?;
        self.token = Some(login.token);
        Ok(login)
    }

    /// `POST /api/admin/participants` – add a participant by name.
    pub async fn add_participant(
        &self,
        name: impl Into<String>,
    ) -> Result<AddParticipantResponse, ClientError> {
        let url = self.base_url.join("/api/admin/participants")?;
        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, self.token_header()?)
            .json(&AddParticipantRequest { name: name.into() })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /api/admin/participants/{id}` – remove a participant.
    pub async fn delete_participant(&self, id: i64) -> Result<Ack, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/admin/participants/{id}"))?;
        let resp = self
            .http
            .delete(url)
            .header(SESSION_HEADER, self.token_header()?)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `PUT /api/admin/partners` – declare two participants as partners.
    pub async fn set_partners(&self, a: i64, b: i64) -> Result<Ack, ClientError> {
        let url = self.base_url.join("/api/admin/partners")?;
        let resp = self
            .http
            .put(url)
            .header(SESSION_HEADER, self.token_header()?)
            .json(&SetPartnersRequest { a, b })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/admin/reset-draws` – clear every assignment for a new
    /// cycle.
    pub async fn reset_draws(&self) -> Result<ResetDrawsResponse, ClientError> {
        let url = self.base_url.join("/api/admin/reset-draws")?;
        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, self.token_header()?)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/admin/roster` – full roster including partner and drawn
    /// references.
    pub async fn roster(&self) -> Result<Vec<RosterEntry>, ClientError> {
        let url = self.base_url.join("/api/admin/roster")?;
        let resp = self
            .http
            .get(url)
            .header(SESSION_HEADER, self.token_header()?)
            .send()
            .await?;
        parse_response(resp).await
    }

    fn token_header(&self) -> Result<String, ClientError> {
        self.token
            .map(|t| t.to_string())
            .ok_or(ClientError::NotLoggedIn)
    }
}
