//! # prosperity-types
//!
//! Shared domain types used across the Prosperity workspace.
//!
//! All monetary amounts are integers in the smallest currency unit; revenue
//! weights are integer basis points; timestamps are Unix epoch seconds.

pub mod audit;
pub mod collaborator;
pub mod overrides;
pub mod permissions;
pub mod reports;
pub mod treasury;
pub mod yields;

/// Monetary amount in the smallest currency unit.
pub type Amount = u64;

/// Revenue weight in basis points (1/100th of a percent).
pub type BasisPoints = u32;

/// Unix epoch seconds.
pub type Timestamp = u64;

/// Full scale for revenue weights: 10000 basis points = 100%.
pub const WEIGHT_SCALE_BPS: BasisPoints = 10_000;

/// Retention window for recent contribution and yield records.
pub const RECENT_WINDOW: usize = 100;

/// Retention cap for the in-memory audit log.
pub const AUDIT_LOG_CAP: usize = 1_000;

/// Number of audit entries surfaced in the overview report.
pub const OVERVIEW_ACTIVITY_WINDOW: usize = 5;

/// Number of collaborators listed as top performers in analytics.
pub const TOP_PERFORMER_COUNT: usize = 5;
