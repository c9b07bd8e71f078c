// Application layer: the allocation run pipeline

pub mod catalog;
pub mod context;
pub mod decoder;
pub mod gain_matrix;
pub mod model_builder;
pub mod objective;
pub mod planner;

pub use catalog::{distinct, Catalog};
pub use context::RunContext;
pub use decoder::{decode, AllocationEntry, AllocationReport};
pub use gain_matrix::{gain_in_one_year, is_eligible, GainMatrix, DAYS_IN_YEAR};
pub use model_builder::VariableGrid;
pub use planner::{AllocationPlanner, PlannerSettings};
