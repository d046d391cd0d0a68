pub mod agent;
pub mod delivery;
pub mod package;
