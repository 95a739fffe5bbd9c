use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{LoginRequest, LoginResponse, RefreshResponse, SignupRequest, SignupResponse};
use super::jwt::{JwtKeys, RefreshUser};
use super::password::{hash_password, verify_password};
use super::repo::User;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

/// Pull a non-empty trimmed value out of an optional field.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> ApiResult<Json<SignupResponse>> {
    let (Some(email), Some(password)) = (present(&payload.email), present(&payload.password))
    else {
        return Err(ApiError::Validation(
            "Missing required fields (email, password)".into(),
        ));
    };
    let email = email.to_lowercase();

    let hash = hash_password(password)?;
    // A duplicate email comes back as a unique violation and maps to the
    // conflict error; signup is a single insert.
    let user = User::create(&state.db, &email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(Json(SignupResponse {
        message: "Signup successful",
        id: user.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Absent fields, unknown email and wrong password all produce the same
    // response; nothing leaks which one it was.
    let (Some(email), Some(password)) = (present(&payload.email), present(&payload.password))
    else {
        return Err(ApiError::Auth("Invalid credentials".into()));
    };
    let email = email.to_lowercase();

    let Some(user) = User::find_by_email(&state.db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(ApiError::Auth("Invalid credentials".into()));
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Auth("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user.id)?;
    let refresh_token = keys.sign_refresh(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        message: "Login successful",
    }))
}

/// Mint a new access token from a bearer refresh token. The refresh token
/// itself is not rotated; it stays valid until its own expiry.
#[instrument(skip(state))]
pub async fn refresh(
    State(state): State<AppState>,
    RefreshUser(user_id): RefreshUser,
) -> ApiResult<Json<RefreshResponse>> {
    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign_access(user_id)?;
    info!(user_id = %user_id, "access token refreshed");
    Ok(Json(RefreshResponse { access_token }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::app::build_app;

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn signup_without_password_is_a_validation_error() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(json_post("/signup", r#"{"email":"a@x.com"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Missing required fields (email, password)");
    }

    #[tokio::test]
    async fn login_without_fields_is_unauthorized() {
        let app = build_app(AppState::fake());
        let res = app.oneshot(json_post("/login", "{}")).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn refresh_rejects_access_token() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let access = keys.sign_access(Uuid::new_v4()).unwrap();

        let app = build_app(state);
        let req = Request::builder()
            .method("POST")
            .uri("/refresh")
            .header(header::AUTHORIZATION, format!("Bearer {access}"))
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_mints_access_token_without_touching_the_store() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let user_id = Uuid::new_v4();
        let refresh = keys.sign_refresh(user_id).unwrap();

        let app = build_app(state);
        let req = Request::builder()
            .method("POST")
            .uri("/refresh")
            .header(header::AUTHORIZATION, format!("Bearer {refresh}"))
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let minted = json["access_token"].as_str().unwrap();
        let claims = keys.verify(minted).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.kind, crate::auth::jwt::TokenKind::Access);
    }

    #[tokio::test]
    async fn refresh_without_token_is_unauthorized() {
        let app = build_app(AppState::fake());
        let req = Request::builder()
            .method("POST")
            .uri("/refresh")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
