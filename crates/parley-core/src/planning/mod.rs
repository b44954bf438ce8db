//! Interview planning
//!
//! Turns a free-text brief into an [`InterviewPlan`]. Model output is only
//! ever parsed as JSON; anything that doesn't fit yields the fallback plan.

mod agent;
mod plan;

pub use agent::{AgentInitialization, PlanningAgent, DEFAULT_INITIALIZATION_MESSAGE};
pub use plan::InterviewPlan;
