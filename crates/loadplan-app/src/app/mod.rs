//! Use cases: load planning and product temperature

pub mod planning_service;
pub mod temperature_service;

pub use planning_service::{PlanOutcome, PlanRequest, PlanningService};
pub use temperature_service::{TemperatureOutcome, TemperatureRequest, TemperatureService};
