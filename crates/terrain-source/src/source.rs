use std::future::Future;

use chrono::{DateTime, Utc};
use terrain_core::{DateWindow, GitHubUser};

use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::github::GitHubSource;
use crate::mock::MockSource;

/// Identity and optional window to fetch contributions for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub login: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl FetchRequest {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            from: None,
            to: None,
        }
    }

    pub fn with_window(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Window with defaults filled in against `now`.
    pub fn window(&self, now: DateTime<Utc>) -> DateWindow {
        DateWindow::resolve(self.from, self.to, now)
    }

    /// Reject requests that should never reach the network.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateWindow> {
        if self.login.trim().is_empty() {
            return Err(FetchError::InvalidRequest("login must not be empty".into()));
        }
        let window = self.window(now);
        if !window.is_ordered() {
            return Err(FetchError::InvalidRequest(format!(
                "window starts after it ends ({} > {})",
                terrain_core::to_iso8601(window.from),
                terrain_core::to_iso8601(window.to)
            )));
        }
        Ok(window)
    }
}

/// Anything that can produce a user's contribution calendar.
///
/// Every call fetches afresh; implementations keep no cache.
pub trait ContributionSource {
    fn fetch(&self, request: &FetchRequest) -> impl Future<Output = Result<GitHubUser>> + Send;
}

/// Source chosen at runtime from configuration.
#[derive(Clone, Debug)]
pub enum AnySource {
    GitHub(GitHubSource),
    Mock(MockSource),
}

impl AnySource {
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        if config.mock {
            tracing::info!(seed = config.seed, "using mock contribution source");
            Ok(AnySource::Mock(MockSource::new(config.seed)))
        } else {
            tracing::info!(endpoint = %config.endpoint, "using GitHub contribution source");
            Ok(AnySource::GitHub(GitHubSource::new(config)?))
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, AnySource::Mock(_))
    }
}

impl ContributionSource for AnySource {
    async fn fetch(&self, request: &FetchRequest) -> Result<GitHubUser> {
        match self {
            AnySource::GitHub(s) => s.fetch(request).await,
            AnySource::Mock(s) => s.fetch(request).await,
        }
    }
}
