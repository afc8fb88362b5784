pub mod dashboards;
pub mod errors;
pub mod shared;
