// Domain module: entities, the solver-neutral model and the solver contract

pub mod data_source;
pub mod entities;
pub mod errors;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use data_source::*;
pub use entities::*;
pub use errors::*;
pub use models::*;
pub use solver_service::{SolverError, SolverService};
pub use value_objects::*;
