//! Domain services

pub mod active;
pub mod allocation;
pub mod cg_bias;
pub mod density;
pub mod fuel_temp;
pub mod load_ticket;
pub mod planner;
pub mod solar;

pub use active::{active_capacity_gallons, build_active_compartments};
pub use allocation::{allocate_with_caps, shape_factor};
pub use cg_bias::{is_unstable_load, slider_to_bias};
pub use density::lbs_per_gallon_at_temp;
pub use fuel_temp::{predict_fuel_temp_now, FuelTempPrediction, PredictorParams};
pub use load_ticket::{begin_load, complete_load, BeginLoadContext};
pub use planner::plan_max_load;
pub use solar::solar_elevation_rad;
