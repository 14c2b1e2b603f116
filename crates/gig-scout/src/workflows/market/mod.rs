//! Corpus-level analytics: skill demand, client trust, and application performance.

pub mod applications;
pub mod client;
pub mod insights;
pub mod views;

pub use applications::{track_applications, ApplicationOutcome};
pub use client::{research_client, ClientSignals};
pub use insights::{analyze_skill_demand, market_trends};
pub use views::{
    ApplicationPerformance, BreakdownEntry, ClientProfile, ClientVerdict, MarketInsight, RateTrend,
};
