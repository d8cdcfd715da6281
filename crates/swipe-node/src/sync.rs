use crate::error::{SyncError, SyncResult};
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use swipe_protocol::config::SyncParams;
use swipe_protocol::leaderboard::{
    HighScorePatch, Leaderboard, NewUserRequest, UserRecord, UsernameRow,
};
use tracing::{debug, info};

const USER_TABLE: &str = "rest/v1/User";

/// REST client for the leaderboard backend's `User` table.
///
/// Every call is independent and stateless. Callers decide whether a
/// failure matters; the game itself only ever logs them.
#[derive(Clone, Debug)]
pub struct SyncClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SyncClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> SyncResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|_| SyncError::InvalidUrl(base_url.clone()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_params(params: &SyncParams) -> SyncResult<Self> {
        match (&params.sync_url, &params.sync_key) {
            (Some(url), Some(key)) => Self::new(url.as_str(), key.as_str()),
            _ => Err(SyncError::Configuration(
                "both sync_url and sync_key must be set".into(),
            )),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Endpoints ---

    /// Creates the user row, merging into an existing one.
    pub async fn save_username(&self, username: &str) -> SyncResult<()> {
        let body = NewUserRequest {
            username: username.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        let req = self
            .request(Method::POST)
            .header("Prefer", "return=minimal,resolution=merge")
            .json(&body);
        Self::send(req).await?;
        info!("👤 Saved username '{}'", username);
        Ok(())
    }

    pub async fn update_high_score(&self, username: &str, score: u32) -> SyncResult<()> {
        let req = self
            .request(Method::PATCH)
            .query(&[("username", format!("eq.{}", username))])
            .header("Prefer", "return=minimal")
            .json(&HighScorePatch {
                highest_score: score,
            });
        Self::send(req).await?;
        debug!("Patched highest_score={} for '{}'", score, username);
        Ok(())
    }

    pub async fn get_current_user(&self, username: &str) -> SyncResult<Option<UserRecord>> {
        let req = self.request(Method::GET).query(&[
            ("username", format!("eq.{}", username)),
            ("select", "*".to_string()),
        ]);
        let rows: Vec<UserRecord> = Self::fetch(req).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn check_username_exists(&self, username: &str) -> SyncResult<bool> {
        let req = self.request(Method::GET).query(&[
            ("username", format!("eq.{}", username)),
            ("select", "username".to_string()),
        ]);
        let rows: Vec<UsernameRow> = Self::fetch(req).await?;
        Ok(!rows.is_empty())
    }

    pub async fn get_all_users(&self) -> SyncResult<Vec<UserRecord>> {
        let req = self.request(Method::GET).query(&[("select", "*")]);
        Self::fetch(req).await
    }

    pub async fn leaderboard(&self) -> SyncResult<Leaderboard> {
        let users = self.get_all_users().await?;
        info!("🏅 Fetched {} leaderboard entries", users.len());
        Ok(Leaderboard::from_users(users))
    }

    /// Claims a username. Fails with `UsernameTaken` if a row already exists.
    pub async fn register(&self, username: &str) -> SyncResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SyncError::Configuration("username must not be empty".into()));
        }
        if self.check_username_exists(username).await? {
            return Err(SyncError::UsernameTaken(username.to_string()));
        }
        self.save_username(username).await
    }

    // --- Plumbing ---

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, USER_TABLE))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn send(req: RequestBuilder) -> SyncResult<String> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SyncError::InvalidResponse {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(req: RequestBuilder) -> SyncResult<T> {
        let body = Self::send(req).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_url() {
        assert!(matches!(
            SyncClient::new("not a url", "key"),
            Err(SyncError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let c = SyncClient::new("http://localhost:54321/", "key").unwrap();
        assert_eq!(c.base_url(), "http://localhost:54321");
    }

    #[test]
    fn test_from_params_requires_key() {
        let params = SyncParams {
            sync_url: Some("http://localhost".into()),
            ..Default::default()
        };
        assert!(matches!(
            SyncClient::from_params(&params),
            Err(SyncError::Configuration(_))
        ));
    }
}
