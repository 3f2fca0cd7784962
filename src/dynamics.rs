use log::{debug, info};

use crate::config::setup::SetupConfig;
use crate::geometry::{heading_frame, vector_magnitude, Vector};
use crate::path::{Path, PathPoint};
use crate::units::{gs_to_mps2, mps_to_mph};

pub fn cap_speed(v: Vector, max_speed: f64) -> Vector {
    let speed = vector_magnitude(&v);
    if speed > max_speed {
        v * (max_speed / speed)
    } else {
        v
    }
}

pub fn initial_point(setup: &SetupConfig) -> PathPoint {
    PathPoint {
        position: setup.path_start,
        velocity: cap_speed(setup.initial_velocity(), setup.max_speed()),
        time: 0.0,
        step: 0,
    }
}

pub fn update(setup: &SetupConfig, point: &PathPoint) -> PathPoint {
    let dt = setup.dt();

    // Body-frame acceleration, x lateral and y longitudinal.
    let a_body = setup.maneuver.acceleration_g(point.time).map(gs_to_mps2);
    // At rest the vehicle faces "up", as it does when launched with speed.
    let facing = if point.velocity == Vector::zeros() {
        Vector::y()
    } else {
        point.velocity
    };
    let (forward, right) = heading_frame(&facing);
    let a = forward * a_body.y + right * a_body.x;

    // Semi-implicit Euler: the new velocity moves the vehicle.
    let velocity = cap_speed(point.velocity + a * dt, setup.max_speed());
    let position = point.position + velocity * dt;
    let step = point.step + 1;

    debug!(
        "step={}, r=({:.3}, {:.3}) m, v=({:.3}, {:.3}) m/s, a=({:.3}, {:.3}) m/s^2",
        step, position.x, position.y, velocity.x, velocity.y, a.x, a.y
    );

    PathPoint {
        position,
        velocity,
        time: setup.time_at(step),
        step,
    }
}

pub fn run(setup: &SetupConfig) -> Path {
    let n_steps = setup.n_steps();
    info!(
        "Sampling path: {} steps of {} s, max speed {:.2} m/s",
        n_steps,
        setup.dt(),
        setup.max_speed()
    );

    let mut path = Path::new(Vec::with_capacity(n_steps + 1));
    let mut point = initial_point(setup);
    for _ in 0..n_steps {
        let next = update(setup, &point);
        path.push(point);
        point = next;
    }
    path.push(point);

    if let Some(last) = path.last() {
        info!(
            "Sampled {} points: t={} s, distance {:.1} m, final speed {:.1} mph",
            path.len(),
            last.time,
            path.distance(),
            mps_to_mph(last.speed())
        );
    }
    path
}
