use serde::{Deserialize, Serialize};
use std::fmt;

/// User profile as returned by the backend.
///
/// Passed through untouched; the client never interprets it beyond display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(serde_json::Value);

impl UserProfile {
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(|v| v.as_str())
    }

    /// Backend row id, if the profile carries one
    pub fn id(&self) -> Option<u64> {
        self.0.get("ID").and_then(|v| v.as_u64())
    }

}

/// `POST /auth/login` and `POST /auth/register` body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never print the password
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// `POST /auth/login` response
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_passthrough() {
        let raw = json!({ "ID": 1, "username": "bob", "balance": 3.5, "is_admin": false });
        let profile: UserProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(profile.username(), Some("bob"));
        assert_eq!(serde_json::to_value(&profile).unwrap(), raw);
    }

    #[test]
    fn test_profile_id() {
        let profile: UserProfile = serde_json::from_value(json!({ "ID": 4, "username": "dave" })).unwrap();
        assert_eq!(profile.id(), Some(4));
        let bare: UserProfile = serde_json::from_value(json!({ "username": "x" })).unwrap();
        assert_eq!(bare.id(), None);
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials::new("bob", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("bob"));
        assert!(!printed.contains("hunter2"));
    }
}
