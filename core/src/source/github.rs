//! GitHub REST client for the `stats/commit_activity` endpoint.
//!
//! The endpoint returns the last 52 weeks of commit counts, one record per
//! Sunday-aligned week. GitHub computes the statistics lazily and answers
//! `202 Accepted` with an empty body until they are ready.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::input::RepoTarget;
use crate::model::activity::WeeklyActivity;
use crate::source::error::SourceError;
use crate::source::traits::ActivitySource;

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("commitmap/", env!("CARGO_PKG_VERSION"));

pub struct GitHubActivitySource {
    client: Client,
    api_base_url: String,
    token: Option<String>,
}

impl GitHubActivitySource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Cannot create HTTP client")?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn endpoint(&self, target: &RepoTarget) -> String {
        format!(
            "{}/repos/{}/{}/stats/commit_activity",
            self.api_base_url, target.owner, target.repo
        )
    }
}

impl ActivitySource for GitHubActivitySource {
    fn fetch(&self, target: &RepoTarget) -> Result<Vec<WeeklyActivity>, SourceError> {
        let url = self.endpoint(target);
        info!("Fetching commit activity for {}", target);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "GitHub responded");

        parse_response(status, &body, target)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Maps a raw endpoint response onto records or a `SourceError`.
pub fn parse_response(
    status: u16,
    body: &str,
    target: &RepoTarget,
) -> Result<Vec<WeeklyActivity>, SourceError> {
    match status {
        200 => Ok(serde_json::from_str(body)?),
        202 => Err(SourceError::Pending {
            target: target.to_string(),
        }),
        // Empty repositories have no statistics at all
        204 => Ok(Vec::new()),
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| body.trim().to_string());
            Err(SourceError::Api { status, message })
        }
    }
}
