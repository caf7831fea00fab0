pub mod generate;
pub mod v0;
pub mod workflows;
