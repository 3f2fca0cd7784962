use crate::geometry::{vector_angle, vector_magnitude, Vector};

/// One sample along a trajectory.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct PathPoint {
    // m.
    pub position: Vector,
    // m/s.
    pub velocity: Vector,
    // s.
    pub time: f64,
    pub step: usize,
}

impl PathPoint {
    pub fn speed(&self) -> f64 {
        vector_magnitude(&self.velocity)
    }

    pub fn heading(&self) -> f64 {
        vector_angle(&self.velocity)
    }
}

/// Samples in chronological order.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Path(pub Vec<PathPoint>);

impl Path {
    pub fn new(points: Vec<PathPoint>) -> Self {
        Path(points)
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathPoint> {
        self.0.last()
    }

    pub fn push(&mut self, point: PathPoint) {
        self.0.push(point);
    }

    pub fn duration(&self) -> f64 {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => last.time - first.time,
            _ => 0.0,
        }
    }

    /// Length travelled along the path, in metres.
    pub fn distance(&self) -> f64 {
        self.0
            .windows(2)
            .map(|w| vector_magnitude(&(w[1].position - w[0].position)))
            .sum()
    }

    pub fn max_speed(&self) -> f64 {
        self.0.iter().map(PathPoint::speed).fold(0.0, f64::max)
    }
}
