use std::error::Error;

use crate::{
    config::{
        constants::{LABEL_INTERVAL, MAJOR_TICK_INTERVAL, MINOR_TICK_INTERVAL},
        setup::SetupConfig,
    },
    geometry::Vector,
    path::Path,
};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Major,
    Minor,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub kind: TickKind,
    pub label: Option<String>,
}

/// Axis tick spacing, in whole axis units.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TickConfig {
    pub major_interval: u32,
    pub minor_interval: u32,
    pub label_interval: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        TickConfig {
            major_interval: MAJOR_TICK_INTERVAL,
            minor_interval: MINOR_TICK_INTERVAL,
            label_interval: LABEL_INTERVAL,
        }
    }
}

impl TickConfig {
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.major_interval == 0 || self.minor_interval == 0 || self.label_interval == 0 {
            return Err(format!("tick intervals must be positive, got {:?}", self).into());
        }
        Ok(())
    }

    /// Ticks on the integer values of `[start, end]`, in ascending order.
    pub fn ticks(&self, start: f64, end: f64) -> Vec<Tick> {
        if !(start <= end) || self.validate().is_err() {
            return Vec::new();
        }
        let major = i64::from(self.major_interval);
        let minor = i64::from(self.minor_interval);
        let label = i64::from(self.label_interval);

        (start.ceil() as i64..=end.floor() as i64)
            .filter(|v| v % minor == 0 || v % major == 0)
            .map(|v| Tick {
                value: v as f64,
                kind: if v % major == 0 {
                    TickKind::Major
                } else {
                    TickKind::Minor
                },
                label: (v % label == 0).then(|| v.to_string()),
            })
            .collect()
    }
}

/// Visible region, centred on the path origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: Vector,
    pub origin: Vector,
}

impl Viewport {
    pub fn new(size: Vector, origin: Vector) -> Self {
        Viewport { size, origin }
    }

    pub fn from_setup(setup: &SetupConfig) -> Self {
        Self::new(setup.viewport_size, setup.path_start)
    }

    pub fn half_size(&self) -> Vector {
        self.size * 0.5
    }

    pub fn contains(&self, p: &Vector) -> bool {
        let d = (p - self.origin).abs();
        let h = self.half_size();
        d.x <= h.x && d.y <= h.y
    }

    pub fn points_outside(&self, path: &Path) -> usize {
        path.points()
            .iter()
            .filter(|pt| !self.contains(&pt.position))
            .count()
    }
}
