//! Deterministic stand-in data for offline rendering and tests.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rand::Rng;

use crate::calendar::{
    ContributionCalendar, ContributionDay, ContributionWeek, ContributionsCollection, GitHubUser,
    Language, Repository, RepositoryConnection,
};
use crate::constants::{DAYS_PER_WEEK, MOCK_MAX_DAILY, WEEKS_PER_YEAR};
use crate::time::week_start;

/// A year of weeks starting on the Sunday on or before `start`, each day
/// with a count drawn from `0..MOCK_MAX_DAILY`. The calendar total is the
/// sum of the days.
pub fn generate_calendar(start: NaiveDate, rng: &mut impl Rng) -> ContributionCalendar {
    let first = week_start(start);
    let weeks = (0..WEEKS_PER_YEAR)
        .map(|w| ContributionWeek {
            contribution_days: (0..DAYS_PER_WEEK)
                .map(|d| {
                    let date = first + Duration::days((w * DAYS_PER_WEEK + d) as i64);
                    ContributionDay::new(date, rng.random_range(0..MOCK_MAX_DAILY))
                })
                .collect(),
        })
        .collect();
    ContributionCalendar::from_weeks(weeks)
}

fn timestamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

fn repo(
    login: &str,
    name: &str,
    description: &str,
    stars: u32,
    forks: u32,
    language: (&str, &str),
    updated_day: u32,
) -> Repository {
    Repository {
        name: name.to_string(),
        description: Some(description.to_string()),
        url: format!("https://github.com/{login}/{name}"),
        stargazer_count: stars,
        fork_count: forks,
        primary_language: Some(Language {
            name: language.0.to_string(),
            color: Some(language.1.to_string()),
        }),
        updated_at: timestamp(2024, 1, updated_day),
    }
}

pub fn mock_repositories(login: &str) -> Vec<Repository> {
    const TS: (&str, &str) = ("TypeScript", "#3178c6");
    const JS: (&str, &str) = ("JavaScript", "#f1e05a");
    const GO: (&str, &str) = ("Go", "#00ADD8");
    vec![
        repo(
            login,
            "neural-digital-garden",
            "A high-performance, immersive personal portfolio website",
            156,
            23,
            TS,
            15,
        ),
        repo(
            login,
            "react-three-portfolio",
            "3D portfolio built with a declarative scene graph",
            89,
            12,
            JS,
            10,
        ),
        repo(
            login,
            "vite-starter-template",
            "Production-ready Vite starter template",
            234,
            45,
            TS,
            8,
        ),
        repo(
            login,
            "threejs-experiments",
            "Experimental WebGL projects and demos",
            67,
            8,
            JS,
            5,
        ),
        repo(
            login,
            "api-gateway",
            "Microservices API gateway with rate limiting",
            45,
            6,
            GO,
            12,
        ),
        repo(
            login,
            "design-system",
            "Comprehensive design system with reusable components",
            178,
            34,
            TS,
            14,
        ),
    ]
}

/// Mock user with a generated calendar starting 2024-01-01.
pub fn mock_user(login: &str, rng: &mut impl Rng) -> GitHubUser {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    mock_user_from(login, start, rng)
}

pub fn mock_user_from(login: &str, start: NaiveDate, rng: &mut impl Rng) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        name: Some("Mock Developer".to_string()),
        avatar_url: "/images/branding/avatar-frame.svg".to_string(),
        bio: Some("Full stack developer building modern web applications".to_string()),
        url: format!("https://github.com/{login}"),
        repositories: RepositoryConnection {
            nodes: mock_repositories(login),
        },
        contributions_collection: ContributionsCollection {
            contribution_calendar: generate_calendar(start, rng),
            total_commit_contributions: 856,
            total_issue_contributions: 234,
            total_pull_request_contributions: 112,
            total_pull_request_review_contributions: 45,
        },
    }
}
