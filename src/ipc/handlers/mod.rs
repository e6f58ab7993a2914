pub mod auth;
pub mod calendar;
pub mod chart;
pub mod core;
pub mod students;
pub mod table;
