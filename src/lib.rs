pub mod chart;
pub mod config;
pub mod dynamics;
pub mod geometry;
pub mod path;
pub mod units;
