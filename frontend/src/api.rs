//! Typed client for the Focus-Up backend.
//!
//! Thin layer over [`HttpClient`]: URL building, JSON bodies, the bearer
//! header, and mapping non-2xx responses into [`ApiError`]. No retries —
//! every call is a single round trip.

use crate::error::{ApiError, ApiResult};
use crate::web::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use focusup_shared::{
    AuthResponse, ChangePasswordRequest, CreateUserRequest, LoginRequest, NotificationPrefs,
    ProfileUpdate, StudyReport, UserProfile, HEADER_AUTHORIZATION,
};
use serde::{Deserialize, Serialize};

/// Default mount point of the backend API, same-origin.
pub const DEFAULT_API_BASE: &str = "/api";

/// Error body the backend attaches to non-2xx responses. Both fields are
/// optional; anything unparseable falls back to a generic message.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

fn decode_error(res: &HttpResponse) -> ApiError {
    let body: ErrorBody = serde_json::from_str(&res.body).unwrap_or_default();
    let message = body
        .message
        .unwrap_or_else(|| format!("la solicitud falló con estado {}", res.status));
    ApiError::http(res.status, message, body.code)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusApi<C> {
    base_url: String,
    pub(crate) client: C,
}

impl<C: HttpClient> FocusApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> ApiResult<HttpRequest> {
        let body = serde_json::to_string(body)
            .map_err(|e| ApiError::encoding(format!("no se pudo codificar la solicitud: {}", e)))?;
        Ok(HttpRequest::new(self.url(path), method)
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Sends and rejects non-2xx responses as [`ApiError`].
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let res = self.client.send(req).await?;
        if res.ok() {
            Ok(res)
        } else {
            Err(decode_error(&res))
        }
    }

    // =========================================================
    // Authentication
    // =========================================================

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        let request = self.json_request(HttpMethod::Post, "/auth/login", req)?;
        let res = self.send(request).await?;
        Ok(res.json()?)
    }

    pub async fn register(&self, req: &CreateUserRequest) -> ApiResult<AuthResponse> {
        let request = self.json_request(HttpMethod::Post, "/usuarios", req)?;
        let res = self.send(request).await?;
        Ok(res.json()?)
    }

    pub async fn fetch_profile(&self, token: &str) -> ApiResult<UserProfile> {
        let request = HttpRequest::new(self.url("/auth/perfil"), HttpMethod::Get)
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        let res = self.send(request).await?;
        Ok(res.json()?)
    }

    // =========================================================
    // User resource (consumed by page views directly)
    // =========================================================

    pub async fn update_profile(
        &self,
        token: &str,
        user_id: u32,
        update: &ProfileUpdate,
    ) -> ApiResult<()> {
        let path = format!("/usuarios/{}", user_id);
        let request = self
            .json_request(HttpMethod::Put, &path, update)?
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        self.send(request).await?;
        Ok(())
    }

    pub async fn change_password(
        &self,
        token: &str,
        user_id: u32,
        req: &ChangePasswordRequest,
    ) -> ApiResult<()> {
        let path = format!("/usuarios/{}/contrasena", user_id);
        let request = self
            .json_request(HttpMethod::Patch, &path, req)?
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        self.send(request).await?;
        Ok(())
    }

    pub async fn delete_account(&self, token: &str, user_id: u32) -> ApiResult<()> {
        let path = format!("/usuarios/{}", user_id);
        let request = HttpRequest::new(self.url(&path), HttpMethod::Delete)
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        self.send(request).await?;
        Ok(())
    }

    // =========================================================
    // Notifications & reports
    // =========================================================

    pub async fn notification_prefs(
        &self,
        token: &str,
        user_id: u32,
    ) -> ApiResult<NotificationPrefs> {
        let path = format!("/usuarios/{}/notificaciones", user_id);
        let request = HttpRequest::new(self.url(&path), HttpMethod::Get)
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        let res = self.send(request).await?;
        Ok(res.json()?)
    }

    pub async fn save_notification_prefs(
        &self,
        token: &str,
        user_id: u32,
        prefs: &NotificationPrefs,
    ) -> ApiResult<()> {
        let path = format!("/usuarios/{}/notificaciones", user_id);
        let request = self
            .json_request(HttpMethod::Put, &path, prefs)?
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        self.send(request).await?;
        Ok(())
    }

    pub async fn study_report(&self, token: &str, user_id: u32) -> ApiResult<StudyReport> {
        let path = format!("/usuarios/{}/reportes", user_id);
        let request = HttpRequest::new(self.url(&path), HttpMethod::Get)
            .with_header(HEADER_AUTHORIZATION, &focusup_shared::bearer(token));
        let res = self.send(request).await?;
        Ok(res.json()?)
    }
}
