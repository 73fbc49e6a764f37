//! Route policy table and authorization checks.

pub mod evaluator;
pub mod table;

pub use evaluator::{PolicyEvaluator, satisfies_requirement};
pub use table::RoutePolicyTable;
