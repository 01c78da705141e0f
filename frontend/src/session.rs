//! Session lifecycle: who is logged in, and how we found out.
//!
//! The core is [`SessionService`], generic over token storage and HTTP
//! transport so every flow runs natively under tests. The Leptos layer
//! ([`SessionContext`]) wraps one service instance and a single shared
//! [`SessionState`] signal for the whole view tree, and re-runs the
//! bootstrap check whenever the tracked token changes.

use crate::api::{DEFAULT_API_BASE, FocusApi};
use crate::error::{ApiError, ApiResult};
use crate::web::http::{GlooHttpClient, HttpClient};
use crate::web::storage::{TokenStore, WebTokenStore};
use chrono::NaiveDate;
use focusup_shared::{AuthResponse, CreateUserRequest, LoginRequest, ProfileUpdate, UserProfile};
use lazy_static::lazy_static;
use leptos::prelude::*;
use leptos::task::spawn_local;
use regex::Regex;

#[cfg(test)]
mod tests;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Email-shaped identifiers log in by `correo`, everything else by
/// `nombre_usuario`.
pub(crate) fn identifier_is_email(identifier: &str) -> bool {
    EMAIL_RE.is_match(identifier)
}

// =========================================================
// Placeholder profile
// =========================================================

pub(crate) const PLACEHOLDER_USER_ID: u32 = 0;
pub(crate) const PLACEHOLDER_USERNAME: &str = "Usuario";

/// Synthetic profile used when a token was accepted but the profile lookup
/// failed. With credentials at hand (login) the identifier becomes the
/// display name; without them (bootstrap) a fixed generic name is used.
pub(crate) fn placeholder_profile(identifier: Option<&str>) -> UserProfile {
    let (nombre_usuario, correo) = match identifier {
        Some(id) if identifier_is_email(id) => (id.to_string(), id.to_string()),
        Some(id) => (id.to_string(), String::new()),
        None => (PLACEHOLDER_USERNAME.to_string(), String::new()),
    };
    UserProfile {
        id_usuario: PLACEHOLDER_USER_ID,
        nombre_usuario,
        correo,
        pais: None,
        genero: None,
        fecha_nacimiento: None,
        horario_favorito: None,
        intereses: None,
        distracciones: None,
    }
}

// =========================================================
// Session state
// =========================================================

/// The session's observable state, one variant per phase of the lifecycle.
///
/// `Initializing` covers the bootstrap window, carrying the persisted but
/// not-yet-verified token. `Degraded` is an authenticated session whose
/// profile could not be fetched; its user is a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Initializing { token: Option<String> },
    Unauthenticated,
    Authenticated { token: String, user: UserProfile },
    Degraded { token: String, user: UserProfile },
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Initializing { token: None }
    }
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. } | Self::Degraded { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Initializing { token } => token.as_deref(),
            Self::Unauthenticated => None,
            Self::Authenticated { token, .. } | Self::Degraded { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated { user, .. } | Self::Degraded { user, .. } => Some(user),
            _ => None,
        }
    }
}

// =========================================================
// Registration form
// =========================================================

/// Registration data as the form collects it; mapped to the backend's
/// field names (and `YYYY-MM-DD` date text) when the request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub nombre_usuario: String,
    pub correo: String,
    pub contrasena: String,
    pub fecha_nacimiento: NaiveDate,
    pub pais: Option<String>,
    pub genero: Option<String>,
}

impl RegisterForm {
    pub(crate) fn into_request(self) -> CreateUserRequest {
        CreateUserRequest {
            nombre_usuario: self.nombre_usuario,
            correo: self.correo,
            contrasena: self.contrasena,
            fecha_nacimiento: self.fecha_nacimiento.format("%Y-%m-%d").to_string(),
            pais: self.pais,
            genero: self.genero,
            horario_favorito: None,
            intereses: None,
            distracciones: None,
        }
    }
}

// =========================================================
// Session service (DOM-free core)
// =========================================================

/// Login, registration, logout and the bootstrap check, against injected
/// storage and transport. Every operation returns the next [`SessionState`]
/// instead of mutating shared state, so the reactive layer stays a thin
/// apply step.
#[derive(Clone)]
pub struct SessionService<S, C> {
    pub(crate) storage: S,
    pub(crate) api: FocusApi<C>,
}

impl<S: TokenStore, C: HttpClient> SessionService<S, C> {
    pub fn new(api: FocusApi<C>, storage: S) -> Self {
        Self { storage, api }
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.storage.load()
    }

    /// Authenticate with an email or username plus password.
    ///
    /// On backend rejection or transport failure nothing is persisted and
    /// the error propagates. Once a token is issued it is persisted
    /// immediately; a failing profile lookup afterwards degrades the
    /// session to a placeholder instead of failing the login.
    pub async fn login(&self, identifier: &str, password: &str) -> ApiResult<SessionState> {
        let request = if identifier_is_email(identifier) {
            LoginRequest::with_email(identifier, password)
        } else {
            LoginRequest::with_username(identifier, password)
        };

        let AuthResponse {
            success,
            token,
            message,
        } = self.api.login(&request).await?;
        let token = match token {
            Some(token) if success => token,
            _ => {
                let message = message.unwrap_or_else(|| "credenciales incorrectas".to_string());
                return Err(ApiError::rejected(message));
            }
        };

        self.storage.save(&token);

        match self.api.fetch_profile(&token).await {
            Ok(user) => Ok(SessionState::Authenticated { token, user }),
            Err(_) => Ok(SessionState::Degraded {
                token,
                user: placeholder_profile(Some(identifier)),
            }),
        }
    }

    /// Create an account and log the new user in.
    ///
    /// Unlike `login`, a failing profile lookup after the token was issued
    /// leaves the session unauthenticated (token persisted); the next load
    /// recovers it through the bootstrap check.
    pub async fn register(&self, form: RegisterForm) -> ApiResult<SessionState> {
        let request = form.into_request();

        let AuthResponse {
            success,
            token,
            message,
        } = self.api.register(&request).await?;
        let token = match token {
            Some(token) if success => token,
            _ => {
                let message = message.unwrap_or_else(|| "no se pudo crear la cuenta".to_string());
                return Err(ApiError::rejected(message));
            }
        };

        self.storage.save(&token);

        match self.api.fetch_profile(&token).await {
            Ok(user) => Ok(SessionState::Authenticated { token, user }),
            Err(_) => Ok(SessionState::Unauthenticated),
        }
    }

    /// Clear the persisted and in-memory session. Never touches the
    /// network and cannot fail.
    pub fn logout(&self) -> SessionState {
        self.storage.clear();
        SessionState::Unauthenticated
    }

    /// Reconcile a persisted token with the server, once per token value.
    ///
    /// A token that parses is treated as proof of identity: if the profile
    /// endpoint fails for any reason the session stays authenticated with
    /// a placeholder user and the token is kept.
    pub async fn bootstrap(&self, token: Option<String>) -> SessionState {
        let Some(token) = token else {
            return SessionState::Unauthenticated;
        };

        match self.api.fetch_profile(&token).await {
            Ok(user) => SessionState::Authenticated { token, user },
            Err(_) => SessionState::Degraded {
                token,
                user: placeholder_profile(None),
            },
        }
    }
}

// =========================================================
// Leptos context
// =========================================================

pub type AppSessionService = SessionService<WebTokenStore, GlooHttpClient>;

/// One shared session for the whole view tree: a state signal plus the
/// service that mutates it. Provided at the application root.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
    service: StoredValue<AppSessionService>,
}

impl SessionContext {
    fn new() -> Self {
        let service = SessionService::new(
            FocusApi::new(DEFAULT_API_BASE, GlooHttpClient),
            WebTokenStore,
        );
        // Seed the state with the persisted token so the first bootstrap
        // run observes it synchronously.
        let initial = SessionState::Initializing {
            token: service.persisted_token(),
        };
        let (state, set_state) = signal(initial);
        Self {
            state,
            set_state,
            service: StoredValue::new(service),
        }
    }

    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }

    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading()))
    }

    pub fn user_signal(&self) -> Signal<Option<UserProfile>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user().cloned()))
    }

    /// Non-reactive reads for event handlers.
    pub fn current_token(&self) -> Option<String> {
        self.state
            .with_untracked(|s| s.token().map(ToOwned::to_owned))
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.with_untracked(|s| s.user().cloned())
    }

    /// API client clone for page views doing their own domain calls.
    pub fn api(&self) -> FocusApi<GlooHttpClient> {
        self.service.with_value(|s| s.api.clone())
    }

    pub async fn login(self, identifier: String, password: String) -> ApiResult<()> {
        let service = self.service.with_value(|s| s.clone());
        let next = service.login(&identifier, &password).await?;
        self.set_state.set(next);
        Ok(())
    }

    pub async fn register(self, form: RegisterForm) -> ApiResult<()> {
        let service = self.service.with_value(|s| s.clone());
        let next = service.register(form).await?;
        self.set_state.set(next);
        Ok(())
    }

    pub fn logout(self) {
        let next = self.service.with_value(|s| s.logout());
        self.set_state.set(next);
    }

    /// Merge an already-persisted profile change into the in-memory user.
    /// No network call; callers that saved via the API use this to keep
    /// the store in sync.
    pub fn update_user(self, update: ProfileUpdate) {
        self.set_state.update(|state| {
            if let SessionState::Authenticated { user, .. }
            | SessionState::Degraded { user, .. } = state
            {
                update.apply_to(user);
            }
        });
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// Create the session context, provide it, and wire the bootstrap check.
pub fn provide_session() -> SessionContext {
    let ctx = SessionContext::new();
    provide_context(ctx);
    init_bootstrap(&ctx);
    ctx
}

/// Bootstrap effect: tracks only the token, so the check re-runs exactly
/// when the token value changes (first load, login, logout) and not on
/// every profile update.
fn init_bootstrap(ctx: &SessionContext) {
    let state = ctx.state;
    let set_state = ctx.set_state;
    let service = ctx.service;

    let token_memo = Memo::new(move |_| state.with(|s| s.token().map(ToOwned::to_owned)));

    Effect::new(move |_| {
        // Read the token synchronously, before any await point.
        let token = token_memo.get();
        spawn_local(async move {
            let svc = service.with_value(|s| s.clone());
            let next = svc.bootstrap(token).await;
            if let SessionState::Degraded { .. } = &next {
                web_sys::console::warn_1(
                    &"[Session] perfil no disponible; sesión degradada con usuario genérico"
                        .into(),
                );
            }
            set_state.set(next);
        });
    });
}
