use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup. Fields are optional so that absence is reported
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_uses_mongo_style_id_key() {
        let response = SignupResponse {
            message: "Signup successful",
            id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_some());
        assert_eq!(json["message"], "Signup successful");
    }
}
