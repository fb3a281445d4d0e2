pub mod daily;
pub mod info;
pub mod menu;
pub mod pending;
pub mod plan;
pub mod schedule;
pub mod status;
