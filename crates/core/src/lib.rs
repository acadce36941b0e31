//! Core abstractions for the primer lab framework.

pub use {
    agent::Agent,
    cost::{Breakdown, PriceMeter, SessionSummary, billing_provider},
    extract::{ExtractError, extract_json, parse_json},
    pattern::{ArticleSummary, Example, Pattern},
    router::{Complexity, Router},
    tool::{Handler, Tool, handler},
};

pub mod agent;
pub mod cost;
pub mod extract;
pub mod pattern;
pub mod router;
pub mod tool;
