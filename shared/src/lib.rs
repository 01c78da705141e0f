//! Wire types shared between the Focus-Up frontend and its backend API.
//!
//! Field names follow the backend contract verbatim (Spanish snake_case),
//! so every struct here serializes to exactly what the server expects.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =========================================================
// Constants
// =========================================================

/// Header carrying the bearer credential on authenticated calls.
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Prefix for the `Authorization` header value.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Formats a token as an `Authorization` header value.
pub fn bearer(token: &str) -> String {
    format!("{}{}", BEARER_PREFIX, token)
}

// =========================================================
// Authentication
// =========================================================

/// Body of `POST /auth/login`.
///
/// The backend accepts either `correo` or `nombre_usuario`; exactly one of
/// the two is serialized, the other is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_usuario: Option<String>,
    pub contrasena: String,
}

impl LoginRequest {
    pub fn with_email(correo: impl Into<String>, contrasena: impl Into<String>) -> Self {
        Self {
            correo: Some(correo.into()),
            nombre_usuario: None,
            contrasena: contrasena.into(),
        }
    }

    pub fn with_username(nombre_usuario: impl Into<String>, contrasena: impl Into<String>) -> Self {
        Self {
            correo: None,
            nombre_usuario: Some(nombre_usuario.into()),
            contrasena: contrasena.into(),
        }
    }
}

/// Response of the login and user-creation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /usuarios`.
///
/// `fecha_nacimiento` travels as `YYYY-MM-DD` text; callers format it from
/// a `NaiveDate` before building this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub nombre_usuario: String,
    pub correo: String,
    pub contrasena: String,
    pub fecha_nacimiento: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horario_favorito: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intereses: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distracciones: Option<Vec<u32>>,
}

/// Body of `PATCH /usuarios/{id}/contrasena`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub contrasena_actual: String,
    pub contrasena_nueva: String,
}

// =========================================================
// User profile
// =========================================================

/// The server's view of a user, replaced wholesale on every fetch/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id_usuario: u32,
    pub nombre_usuario: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horario_favorito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intereses: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distracciones: Option<Vec<u32>>,
}

/// Partial profile, used both as the `PUT /usuarios/{id}` body and for
/// merging an already-persisted change into the in-memory user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre_usuario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pais: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horario_favorito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intereses: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distracciones: Option<Vec<u32>>,
}

impl ProfileUpdate {
    /// Merge every set field into `user`, leaving the rest untouched.
    pub fn apply_to(&self, user: &mut UserProfile) {
        if let Some(v) = &self.nombre_usuario {
            user.nombre_usuario = v.clone();
        }
        if let Some(v) = &self.correo {
            user.correo = v.clone();
        }
        if let Some(v) = &self.pais {
            user.pais = Some(v.clone());
        }
        if let Some(v) = &self.genero {
            user.genero = Some(v.clone());
        }
        if let Some(v) = self.fecha_nacimiento {
            user.fecha_nacimiento = Some(v);
        }
        if let Some(v) = &self.horario_favorito {
            user.horario_favorito = Some(v.clone());
        }
        if let Some(v) = &self.intereses {
            user.intereses = Some(v.clone());
        }
        if let Some(v) = &self.distracciones {
            user.distracciones = Some(v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// =========================================================
// Notification preferences
// =========================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub recordatorios_estudio: bool,
    pub resumen_semanal: bool,
    pub alertas_descanso: bool,
}

// =========================================================
// Study reports
// =========================================================

/// One recorded study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id_sesion: u32,
    pub fecha: NaiveDate,
    pub minutos: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materia: Option<String>,
    #[serde(default)]
    pub completada: bool,
}

/// Aggregated progress report returned by `GET /usuarios/{id}/reportes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyReport {
    #[serde(default)]
    pub sesiones: Vec<StudySession>,
    #[serde(default)]
    pub total_minutos: u32,
    #[serde(default)]
    pub racha_dias: u32,
}

impl StudyReport {
    pub fn completed_sessions(&self) -> usize {
        self.sesiones.iter().filter(|s| s.completada).count()
    }

    /// Minutes studied on or after `since`, inclusive.
    pub fn minutes_since(&self, since: NaiveDate) -> u32 {
        self.sesiones
            .iter()
            .filter(|s| s.fecha >= since)
            .map(|s| s.minutos)
            .sum()
    }
}

// =========================================================
// Tests
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_email_serializes_correo_only() {
        let req = LoginRequest::with_email("ana@example.com", "secreta");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["correo"], "ana@example.com");
        assert_eq!(json["contrasena"], "secreta");
        assert!(json.get("nombre_usuario").is_none());
    }

    #[test]
    fn login_request_username_serializes_nombre_usuario_only() {
        let req = LoginRequest::with_username("ana23", "secreta");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["nombre_usuario"], "ana23");
        assert!(json.get("correo").is_none());
    }

    #[test]
    fn profile_update_merges_only_set_fields() {
        let mut user = UserProfile {
            id_usuario: 7,
            nombre_usuario: "ana23".to_string(),
            correo: "ana@example.com".to_string(),
            pais: Some("MX".to_string()),
            genero: None,
            fecha_nacimiento: None,
            horario_favorito: Some("noche".to_string()),
            intereses: None,
            distracciones: None,
        };

        let update = ProfileUpdate {
            nombre_usuario: Some("ana_g".to_string()),
            pais: Some("AR".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut user);

        assert_eq!(user.nombre_usuario, "ana_g");
        assert_eq!(user.pais.as_deref(), Some("AR"));
        // untouched fields survive the merge
        assert_eq!(user.correo, "ana@example.com");
        assert_eq!(user.horario_favorito.as_deref(), Some("noche"));
        assert_eq!(user.id_usuario, 7);
    }

    #[test]
    fn profile_update_default_is_empty() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            correo: Some("x@y.z".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn user_profile_roundtrips_naive_date() {
        let json = r#"{
            "id_usuario": 3,
            "nombre_usuario": "leo",
            "correo": "leo@example.com",
            "fecha_nacimiento": "2001-04-09"
        }"#;
        let user: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            user.fecha_nacimiento,
            Some(NaiveDate::from_ymd_opt(2001, 4, 9).unwrap())
        );
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["fecha_nacimiento"], "2001-04-09");
    }

    #[test]
    fn report_helpers() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        let report = StudyReport {
            sesiones: vec![
                StudySession {
                    id_sesion: 1,
                    fecha: d(1),
                    minutos: 30,
                    materia: Some("algebra".to_string()),
                    completada: true,
                },
                StudySession {
                    id_sesion: 2,
                    fecha: d(10),
                    minutos: 45,
                    materia: None,
                    completada: false,
                },
                StudySession {
                    id_sesion: 3,
                    fecha: d(12),
                    minutos: 25,
                    materia: None,
                    completada: true,
                },
            ],
            total_minutos: 100,
            racha_dias: 2,
        };

        assert_eq!(report.completed_sessions(), 2);
        assert_eq!(report.minutes_since(d(10)), 70);
        assert_eq!(report.minutes_since(d(13)), 0);
    }
}
