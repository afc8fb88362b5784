pub mod aggregation;
pub mod pivot;
pub mod selector;
pub mod series;
pub mod session;
