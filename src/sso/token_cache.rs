use crate::error::{ProfError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::fs;
use std::path::PathBuf;

/// Cached SSO-OIDC token as written by `aws sso login` (AWS CLI v2
/// format). This tool only reads the cache; acquiring or refreshing a
/// token is delegated to the AWS CLI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub start_url: Option<String>,
}

impl CachedToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Cache file path for a session: `~/.aws/sso/cache/<sha1(name)>.json`,
/// matching the AWS CLI v2 convention of hashing the session name.
pub fn cache_file_path(session_name: &str) -> Result<PathBuf> {
    let mut hasher = Sha1::new();
    hasher.update(session_name.as_bytes());
    let key = format!("{:x}", hasher.finalize());

    dirs::home_dir()
        .map(|home| {
            home.join(".aws")
                .join("sso")
                .join("cache")
                .join(format!("{}.json", key))
        })
        .ok_or_else(|| ProfError::Cache("could not determine home directory".to_string()))
}

/// Read the cached token for an SSO session. A missing cache file or an
/// expired token both report as `TokenExpired` so callers can fall back
/// to `aws sso login`.
pub fn cached_token(session_name: &str) -> Result<CachedToken> {
    let path = cache_file_path(session_name)?;

    if !path.exists() {
        return Err(ProfError::TokenExpired(session_name.to_string()));
    }

    let contents = fs::read_to_string(&path)
        .map_err(|e| ProfError::Cache(format!("failed to read {}: {}", path.display(), e)))?;
    let token: CachedToken = serde_json::from_str(&contents)?;

    if token.is_expired() {
        return Err(ProfError::TokenExpired(session_name.to_string()));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cache_file_path_is_sha1_of_session_name() {
        let path = cache_file_path("work").unwrap();
        let file = path.file_name().unwrap().to_string_lossy().to_string();
        // sha1("work")
        assert_eq!(file, "e274eeff768c6396088ec6eb091f4bf4d47ab1e0.json");
    }

    #[test]
    fn test_token_expiry() {
        let token = CachedToken {
            access_token: "tok".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            region: None,
            start_url: None,
        };
        assert!(!token.is_expired());

        let expired = CachedToken {
            expires_at: Utc::now() - Duration::minutes(1),
            ..token
        };
        assert!(expired.is_expired());
    }

    #[test]
    fn test_token_deserializes_cli_cache_format() {
        let json = r#"{
            "accessToken": "abc123",
            "expiresAt": "2099-01-01T00:00:00Z",
            "region": "us-east-1",
            "startUrl": "https://corp.awsapps.com/start"
        }"#;
        let token: CachedToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.region.as_deref(), Some("us-east-1"));
        assert_eq!(
            token.start_url.as_deref(),
            Some("https://corp.awsapps.com/start")
        );
        assert!(!token.is_expired());
    }
}
