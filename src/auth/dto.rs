use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration. Absent fields deserialize as empty so
/// validation can report every failing field together.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response returned after registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: PublicUser,
    pub token: String,
}

/// Response returned after login, alongside the `token` cookie.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub success: bool,
    pub token: String,
}

/// Sanitized user view returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_has_no_password_material() {
        let view = PublicUser {
            id: Uuid::new_v4(),
            firstname: "A".into(),
            lastname: "B".into(),
            email: "a@b.com".into(),
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("a@b.com"));
        assert!(!json.to_lowercase().contains("password"));
    }

    #[test]
    fn register_request_defaults_absent_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(req.email, "a@b.com");
        assert!(req.firstname.is_empty());
        assert!(req.lastname.is_empty());
        assert!(req.password.is_empty());
    }

    #[test]
    fn login_request_tolerates_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}
