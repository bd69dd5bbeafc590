//! GitHub GraphQL contribution source.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use terrain_core::{GitHubUser, to_iso8601};

use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::source::{ContributionSource, FetchRequest};

pub const USER_CONTRIBUTIONS_QUERY: &str = r#"
query GetUserContributions($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    login
    name
    avatarUrl
    bio
    url
    repositories(first: 100, ownerAffiliations: [OWNER], orderBy: {direction: DESC, field: STARGAZERS}) {
      nodes {
        name
        description
        url
        stargazerCount
        forkCount
        primaryLanguage {
          name
          color
        }
        updatedAt
      }
    }
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
            color
          }
        }
      }
      totalCommitContributions
      totalIssueContributions
      totalPullRequestContributions
      totalPullRequestReviewContributions
    }
  }
}
"#;

/// Longest error body kept in a status error.
const MAX_ERROR_BODY: usize = 200;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    username: &'a str,
    from: String,
    to: String,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct ResponseData {
    user: Option<GitHubUser>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Clone, Debug)]
pub struct GitHubSource {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl GitHubSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl ContributionSource for GitHubSource {
    async fn fetch(&self, request: &FetchRequest) -> Result<GitHubUser> {
        let window = request.validate(Utc::now())?;
        let login = request.login.trim();

        let body = GraphQlRequest {
            query: USER_CONTRIBUTIONS_QUERY,
            variables: Variables {
                username: login,
                from: to_iso8601(window.from),
                to: to_iso8601(window.to),
            },
        };

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(%login, from = %body.variables.from, to = %body.variables.to, "querying GitHub contributions");
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate(text.trim(), MAX_ERROR_BODY),
            });
        }

        let user = decode_user(&text, login)?;
        tracing::info!(
            %login,
            weeks = user.calendar().weeks.len(),
            total = user.calendar().total_contributions,
            repositories = user.repositories.nodes.len(),
            "fetched GitHub contributions"
        );
        Ok(user)
    }
}

/// Decode a GraphQL response body into a user, validating the calendar
/// shape on the way.
pub fn decode_user(body: &str, login: &str) -> Result<GitHubUser> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() && response.data.as_ref().and_then(|d| d.user.as_ref()).is_none() {
        return Err(FetchError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    let data = response
        .data
        .ok_or_else(|| FetchError::Malformed("response has neither data nor errors".into()))?;
    let user = data.user.ok_or_else(|| FetchError::NotFound(login.to_string()))?;
    user.calendar().validate()?;
    Ok(user)
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER_JSON: &str = r##"{
      "data": {
        "user": {
          "login": "octocat",
          "name": "The Octocat",
          "avatarUrl": "https://avatars.example/octocat",
          "bio": null,
          "url": "https://github.com/octocat",
          "repositories": { "nodes": [
            { "name": "hello-world", "description": null, "url": "https://github.com/octocat/hello-world",
              "stargazerCount": 12, "forkCount": 3, "primaryLanguage": null,
              "updatedAt": "2024-01-15T10:00:00Z" }
          ] },
          "contributionsCollection": {
            "contributionCalendar": {
              "totalContributions": 6,
              "weeks": [
                { "contributionDays": [
                  { "date": "2024-01-04", "contributionCount": 1, "color": "#9be9a8" },
                  { "date": "2024-01-05", "contributionCount": 0, "color": "#ebedf0" },
                  { "date": "2024-01-06", "contributionCount": 5, "color": "#40c463" }
                ] }
              ]
            },
            "totalCommitContributions": 4,
            "totalIssueContributions": 1,
            "totalPullRequestContributions": 1,
            "totalPullRequestReviewContributions": 0
          }
        }
      }
    }"##;

    #[test]
    fn test_decode_user() {
        let user = decode_user(USER_JSON, "octocat").unwrap();
        assert_eq!(user.display_name(), "The Octocat");
        assert_eq!(user.repositories.nodes[0].stargazer_count, 12);
        assert_eq!(user.calendar().day_count(), 3);
        assert!(user.calendar().is_consistent());
    }

    #[test]
    fn test_decode_null_user_is_not_found() {
        let err = decode_user(r#"{"data":{"user":null}}"#, "ghost").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref l) if l == "ghost"));
    }

    #[test]
    fn test_decode_graphql_errors() {
        let body = r#"{"data":null,"errors":[{"message":"Bad credentials"},{"message":"try again"}]}"#;
        let err = decode_user(body, "octocat").unwrap_err();
        assert_eq!(err.to_string(), "GitHub query failed: Bad credentials; try again");
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        assert!(matches!(
            decode_user("<html>rate limited</html>", "octocat"),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(decode_user("{}", "octocat"), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_decode_rejects_overfull_week() {
        let mut value: serde_json::Value = serde_json::from_str(USER_JSON).unwrap();
        let days: Vec<serde_json::Value> = (1..=8)
            .map(|d| {
                serde_json::json!({
                    "date": format!("2024-01-0{d}"),
                    "contributionCount": 1,
                    "color": ""
                })
            })
            .collect();
        value["data"]["user"]["contributionsCollection"]["contributionCalendar"]["weeks"][0]
            ["contributionDays"] = serde_json::Value::Array(days);
        let err = decode_user(&value.to_string(), "octocat").unwrap_err();
        assert!(err.to_string().contains("expected at most 7"), "{err}");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }

    #[test]
    fn test_token_blank_is_ignored() {
        let config = SourceConfig {
            token: Some("   ".into()),
            ..SourceConfig::default()
        };
        assert!(!GitHubSource::new(&config).unwrap().has_token());
    }
}
