use crate::{geometry::Vector, units::mph_to_mps};

// Extent of the visible area, in metres.
pub const VIEWPORT_SIZE: Vector = Vector::new(140.0, 140.0);
pub const PATH_START: Vector = Vector::new(0.0, 0.0);

pub const G_TO_MS2: f64 = physical_constants::STANDARD_ACCELERATION_OF_GRAVITY;
pub const G_TO_FTS2: f64 = 32.174;

// m/s.
pub const MAX_SPEED: f64 = mph_to_mps(60.0);

pub const SECONDS: f64 = 60.0;
pub const STEPS_PER_SECOND: usize = 10;

pub const MAJOR_TICK_INTERVAL: u32 = 10;
pub const MINOR_TICK_INTERVAL: u32 = 5;
pub const LABEL_INTERVAL: u32 = 10;
