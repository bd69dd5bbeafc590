//! Contribution sources for `terrain-core`: the GitHub GraphQL API and a
//! seeded local generator, behind one [`ContributionSource`] trait.

pub mod config;
pub mod error;
pub mod github;
pub mod mock;
pub mod source;

pub use config::{GITHUB_GRAPHQL_URL, SourceConfig, default_config_path};
pub use error::{ConfigError, FetchError, Result};
pub use github::{GitHubSource, decode_user};
pub use mock::MockSource;
pub use source::{AnySource, ContributionSource, FetchRequest};
