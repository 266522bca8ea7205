//! SeaORM entity definitions.

pub mod project;
pub mod task;
pub mod user;
