use serde::Deserialize;

/// Fixed 30-day refresh token lifetime, in seconds. Not configurable.
pub const REFRESH_TTL_SECS: u64 = 60 * 60 * 24 * 30;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Access token lifetime in seconds.
    pub access_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "notevault".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "notevault-users".into()),
            access_ttl_secs: std::env::var("JWT_ACCESS_TOKEN_EXPIRES")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(3600),
        };
        Ok(Self { database_url, jwt })
    }
}
