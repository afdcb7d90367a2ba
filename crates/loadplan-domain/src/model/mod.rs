//! Domain model types

pub mod compartment;
pub mod equipment;
pub mod load_ticket;
pub mod plan;
pub mod product;

pub use compartment::{ActiveCompartment, Compartment, CompartmentSelection};
pub use equipment::{EquipmentCombo, Trailer};
pub use load_ticket::{
    ActualLine, LoadLine, LoadReport, LoadTicket, PlannedTotals, ProductObservation,
};
pub use plan::{LoadPlan, PlanRow};
pub use product::Product;
