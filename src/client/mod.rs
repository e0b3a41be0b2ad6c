use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::entities::booking::{BookingRecord, BookingRequest};
use crate::entities::flight::SearchPage;
use crate::entities::user::{AuthResponse, LoginRequest, RegisterRequest};
use crate::error::{AppError, AppResult};
use crate::utils::query::SearchQuery;

/// Typed client for the booking backend. Every call is a single attempt;
/// failures are returned to the caller and never retried here.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config: config.clone(),
            token: config.api_token.clone(),
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn request(&self, method: Method, path: &str) -> (RequestBuilder, Uuid) {
        let request_id = Uuid::new_v4();
        let mut builder = self
            .http
            .request(method, self.config.endpoint(path))
            .header("x-request-id", request_id.to_string());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        (builder, request_id)
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        request_id: Uuid,
        path: &str,
    ) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%request_id, path, error = %e, "Request failed to complete");
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%request_id, path, status = %status, "Request completed");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(%request_id, path, status = %status, "Request rejected by backend");
        Err(AppError::from_response(status, &body))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        request_id: Uuid,
        path: &str,
    ) -> AppResult<T> {
        let response = self.send(builder, request_id, path).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn search_flights(&self, query: &SearchQuery) -> AppResult<SearchPage> {
        let path = "/flights/search";
        let (builder, request_id) = self.request(Method::GET, path);
        tracing::debug!(
            %request_id,
            from = %query.origin_city,
            to = %query.destination_city,
            page = query.page,
            sort = %query.sort,
            "Searching flights"
        );
        self.fetch_json(builder.query(&query.to_query_pairs()), request_id, path)
            .await
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> AppResult<BookingRecord> {
        let path = "/booking";
        let (builder, request_id) = self.request(Method::POST, path);
        tracing::info!(%request_id, flight_id = request.flight_id, "Submitting booking");
        self.fetch_json(builder.json(request), request_id, path).await
    }

    pub async fn get_booking(&self, booking_id: i64) -> AppResult<BookingRecord> {
        let path = format!("/booking/{}", booking_id);
        let (builder, request_id) = self.request(Method::GET, &path);
        self.fetch_json(builder, request_id, &path).await
    }

    pub async fn list_bookings(&self) -> AppResult<Vec<BookingRecord>> {
        let path = "/booking";
        let (builder, request_id) = self.request(Method::GET, path);
        self.fetch_json(builder, request_id, path).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> AppResult<()> {
        let path = "/auth/register";
        let (builder, request_id) = self.request(Method::POST, path);
        self.send(builder.json(request), request_id, path).await?;
        Ok(())
    }

    pub async fn login(&self, request: &LoginRequest) -> AppResult<AuthResponse> {
        let path = "/auth/login";
        let (builder, request_id) = self.request(Method::POST, path);
        self.fetch_json(builder.json(request), request_id, path).await
    }
}
