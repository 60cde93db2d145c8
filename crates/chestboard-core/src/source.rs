//! HTTP roster source.
//!
//! The backend is a hosted database exposing PostgREST-style endpoints; the
//! client reads week-scoped player rows and the newest upload timestamp. The
//! backend schema is not ours -- rows use `treats` for the chest count and we
//! rename on the way in.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::config::SourceSettings;
use crate::error::SourceError;
use crate::roster::Player;

/// PostgREST row shape for the player views.
#[derive(Debug, Deserialize)]
struct PlayerRow {
    name: String,
    #[serde(default)]
    score: u64,
    #[serde(default, rename = "treats")]
    chests: u64,
}

/// Row shape for the upload-timestamp probe.
#[derive(Debug, Deserialize)]
struct UploadRow {
    created_at: DateTime<Utc>,
}

/// Client for the hosted roster backend.
#[derive(Debug, Clone)]
pub struct HttpRosterSource {
    base_url: Url,
    api_key: String,
    current_table: String,
    last_table: String,
    uploads_table: String,
    client: Client,
}

impl HttpRosterSource {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            current_table: "players_current".into(),
            last_table: "players_last".into(),
            uploads_table: "raw_chests".into(),
            client: Client::new(),
        }
    }

    /// Build a source from deployment configuration.
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, SourceError> {
        let base_url = Url::parse(&settings.base_url)?;
        Ok(Self {
            base_url,
            api_key: settings.api_key.clone(),
            current_table: settings.current_table.clone(),
            last_table: settings.last_table.clone(),
            uploads_table: settings.uploads_table.clone(),
            client: Client::new(),
        })
    }

    /// Player rows for the active scoring week.
    pub async fn fetch_current(&self) -> Result<Vec<Player>, SourceError> {
        self.fetch_players(&self.current_table).await
    }

    /// Player rows for the finished week before it.
    pub async fn fetch_last(&self) -> Result<Vec<Player>, SourceError> {
        self.fetch_players(&self.last_table).await
    }

    /// Timestamp of the newest raw upload, or `None` when the table is empty.
    ///
    /// Record timestamps are what cycle boundaries are compared against; the
    /// newest one doubles as the "last updated" display.
    pub async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, SourceError> {
        let endpoint = format!("rest/v1/{}", self.uploads_table);
        let mut url = self.base_url.join(&endpoint)?;
        url.query_pairs_mut()
            .append_pair("select", "created_at")
            .append_pair("order", "created_at.desc")
            .append_pair("limit", "1");

        let rows: Vec<UploadRow> = self.get_json(url, &endpoint).await?;
        Ok(rows.into_iter().next().map(|r| r.created_at))
    }

    async fn fetch_players(&self, table: &str) -> Result<Vec<Player>, SourceError> {
        let endpoint = format!("rest/v1/{table}");
        let mut url = self.base_url.join(&endpoint)?;
        url.query_pairs_mut()
            .append_pair("select", "name,score,treats")
            .append_pair("order", "score.desc");

        let rows: Vec<PlayerRow> = self.get_json(url, &endpoint).await?;
        let mut players = Vec::with_capacity(rows.len());
        for row in rows {
            match Player::new(row.name, row.score, row.chests) {
                Ok(player) => players.push(player),
                Err(e) => warn!(error = %e, table, "skipping malformed player row"),
            }
        }
        Ok(players)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: Url,
        endpoint: &str,
    ) -> Result<T, SourceError> {
        let resp = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(resp.json().await?)
    }
}
