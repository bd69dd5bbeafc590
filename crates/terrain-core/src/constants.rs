/// Days in a contribution week (Sunday-first).
pub const DAYS_PER_WEEK: usize = 7;

/// Weeks in a generated contribution year.
pub const WEEKS_PER_YEAR: usize = 52;

/// Default trailing window for contribution queries, in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Above this many points the terrain renders as one instanced batch.
pub const INSTANCED_THRESHOLD: usize = 500;

/// Voxel footprint on the ground plane (width and depth, world units).
pub const VOXEL_FOOTPRINT: f32 = 0.8;

/// Minimum voxel height so a single contribution is still visible.
pub const BASE_HEIGHT: f32 = 0.2;

/// Multiplier on ln(1 + count) for voxel height.
pub const HEIGHT_SCALE: f32 = 0.6;

/// Emissive intensity for a hovered voxel.
pub const HOVER_EMISSIVE: f32 = 0.5;

/// Emissive intensity for a voxel at rest.
pub const IDLE_EMISSIVE: f32 = 0.1;

/// Upper bound (exclusive) on mock daily contribution counts.
pub const MOCK_MAX_DAILY: u32 = 15;

/// Default number of repositories shown in the top-repositories panel.
pub const TOP_REPOSITORIES: usize = 6;
