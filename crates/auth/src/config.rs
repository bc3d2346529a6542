use std::time::Duration;

const DEVELOPMENT_SECRET: &str = "calshare-development-secret";

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub issuer: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl AuthConfig {
    /// Creates a configuration with the given signing secret and default
    /// TTL (30 minutes) and issuer (`calshare`).
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Duration::from_secs(30 * 60),
            issuer: "calshare".to_string(),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC secret used to sign bearer tokens (default: a development secret)
    /// - `TOKEN_TTL_MINUTES`: Bearer token lifetime in minutes (default: 30)
    /// - `JWT_ISSUER`: Issuer claim written to and required from tokens (default: `calshare`)
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEVELOPMENT_SECRET.to_string()
        });

        let token_ttl = std::env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|minutes| Duration::from_secs(minutes * 60))
            .unwrap_or(Duration::from_secs(30 * 60));

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "calshare".to_string());

        Self {
            jwt_secret,
            token_ttl,
            issuer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("calshare"));
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("secret");
        assert_eq!(config.token_ttl, Duration::from_secs(1800));
        assert_eq!(config.issuer, "calshare");
    }
}
