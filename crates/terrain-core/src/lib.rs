//! GitHub contribution terrain.
//!
//! Turns a one-year contribution calendar (weeks of Sunday-first days) into
//! a flat list of positioned, banded points and lays them out as a centered
//! voxel terrain with hover/select interaction and two render back ends.
//!
//! Zero I/O: fetching lives in `terrain-source`.

pub mod band;
pub mod calendar;
pub mod constants;
pub mod error;
pub mod feed;
pub mod interaction;
pub mod layout;
pub mod mock;
pub mod normalize;
pub mod render;
pub mod stats;
pub mod time;

pub use band::ColorBand;
pub use calendar::{
    ContributionCalendar, ContributionDay, ContributionWeek, ContributionsCollection, GitHubUser,
    Language, Repository, RepositoryConnection,
};
pub use constants::{DAYS_PER_WEEK, INSTANCED_THRESHOLD, TOP_REPOSITORIES, WEEKS_PER_YEAR};
pub use error::CalendarError;
pub use feed::{ContributionFeed, FeedStatus};
pub use interaction::{Interaction, InteractionState, PointerEvent};
pub use layout::{
    Bounds, LayoutOptions, Terrain, TerrainLayout, Voxel, centering_offset, layout, voxel_height,
};
pub use mock::{generate_calendar, mock_repositories, mock_user, mock_user_from};
pub use normalize::{NormalizedPoint, normalize, normalize_user};
pub use render::{BackendKind, InstancedBatch, MeshDraw, RenderBackend, RenderPlan, choose_backend, plan};
pub use stats::{ContributionStats, top_repositories};
pub use time::{DateWindow, display_date, to_iso8601};
