pub mod datasource;
pub mod memory_source;
pub mod renderer;
