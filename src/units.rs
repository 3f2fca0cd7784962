use crate::config::constants::G_TO_MS2;

// Exact by definition of the international mile.
const MPS_PER_MPH: f64 = 0.44704;
// Rounded; downstream round-trips rely on this exact factor.
const FEET_PER_METER: f64 = 3.28;
const FEET_PER_MILE: f64 = 5280.0;

pub const fn mph_to_mps(mph: f64) -> f64 {
    mph * MPS_PER_MPH
}

pub const fn mps_to_mph(mps: f64) -> f64 {
    mps / MPS_PER_MPH
}

/// Acceleration in multiples of standard gravity to m/s^2.
pub const fn gs_to_mps2(gs: f64) -> f64 {
    gs * G_TO_MS2
}

pub const fn ft_to_meter(ft: f64) -> f64 {
    ft / FEET_PER_METER
}

pub const fn meters_to_feet(m: f64) -> f64 {
    m * FEET_PER_METER
}

pub const fn feet_to_miles(ft: f64) -> f64 {
    ft / FEET_PER_MILE
}
