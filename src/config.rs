pub mod constants;
pub mod setup;
