use std::{error::Error, fs::File, io::Read, path::Path};

use crate::{
    chart::TickConfig,
    geometry::Vector,
    units::{gs_to_mps2, mph_to_mps},
};

use super::constants::{G_TO_FTS2, PATH_START, SECONDS, STEPS_PER_SECOND, VIEWPORT_SIZE};

// Upper bound on steps in one run; every step is kept in memory.
pub const MAX_STEPS: usize = 10_000_000;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ManeuverSegment {
    // Seconds.
    pub duration: f64,
    pub longitudinal_g: f64,
    pub lateral_g: f64,
}

/// Body-frame acceleration program, in g.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Maneuver {
    Constant { longitudinal_g: f64, lateral_g: f64 },
    // Segments run back to back; the vehicle coasts once they are used up.
    Schedule { segments: Vec<ManeuverSegment> },
}

impl Default for Maneuver {
    fn default() -> Self {
        Maneuver::Constant {
            longitudinal_g: 0.0,
            lateral_g: 0.0,
        }
    }
}

impl Maneuver {
    /// Acceleration at time `t`, with x lateral (positive right) and y
    /// longitudinal (positive forward).
    pub fn acceleration_g(&self, t: f64) -> Vector {
        match self {
            Maneuver::Constant {
                longitudinal_g,
                lateral_g,
            } => Vector::new(*lateral_g, *longitudinal_g),
            Maneuver::Schedule { segments } => {
                let mut t_end = 0.0;
                for seg in segments {
                    t_end += seg.duration;
                    if t < t_end {
                        return Vector::new(seg.lateral_g, seg.longitudinal_g);
                    }
                }
                Vector::zeros()
            }
        }
    }

    fn peak_g(&self) -> f64 {
        match self {
            Maneuver::Constant {
                longitudinal_g,
                lateral_g,
            } => Vector::new(*lateral_g, *longitudinal_g).norm(),
            Maneuver::Schedule { segments } => segments
                .iter()
                .map(|s| Vector::new(s.lateral_g, s.longitudinal_g).norm())
                .fold(0.0, f64::max),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SetupConfig {
    pub viewport_size: Vector,
    pub path_start: Vector,
    pub max_speed_mph: f64,
    pub seconds: f64,
    pub steps_per_second: usize,
    pub initial_speed_mph: f64,
    pub maneuver: Maneuver,
    pub ticks: TickConfig,
}

impl Default for SetupConfig {
    fn default() -> Self {
        SetupConfig {
            viewport_size: VIEWPORT_SIZE,
            path_start: PATH_START,
            max_speed_mph: 60.0,
            seconds: SECONDS,
            steps_per_second: STEPS_PER_SECOND,
            initial_speed_mph: 0.0,
            maneuver: Maneuver::default(),
            ticks: TickConfig::default(),
        }
    }
}

impl SetupConfig {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, Box<dyn Error>> {
        let config: SetupConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.steps_per_second == 0 {
            return Err("steps_per_second must be positive".into());
        }
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(format!("seconds must be finite and non-negative, got {}", self.seconds).into());
        }
        let steps = self.seconds * self.steps_per_second as f64;
        if steps > MAX_STEPS as f64 {
            return Err(format!("run of {} steps exceeds the limit of {}", steps, MAX_STEPS).into());
        }
        if !(self.max_speed_mph > 0.0) {
            return Err(format!("max_speed_mph must be positive, got {}", self.max_speed_mph).into());
        }
        if !(self.initial_speed_mph >= 0.0) || !self.initial_speed_mph.is_finite() {
            return Err(format!(
                "initial_speed_mph must be finite and non-negative, got {}",
                self.initial_speed_mph
            )
            .into());
        }
        if let Maneuver::Schedule { segments } = &self.maneuver {
            if let Some(seg) = segments.iter().find(|s| !(s.duration >= 0.0)) {
                return Err(format!("maneuver segment has invalid duration {}", seg.duration).into());
            }
        }
        self.ticks.validate()?;
        Ok(())
    }

    /// Speed cap in m/s.
    pub fn max_speed(&self) -> f64 {
        mph_to_mps(self.max_speed_mph)
    }

    // Points "up". Validated speeds are non-negative, so `min` caps it.
    pub fn initial_velocity(&self) -> Vector {
        Vector::new(0.0, mph_to_mps(self.initial_speed_mph).min(self.max_speed()))
    }

    pub fn dt(&self) -> f64 {
        1.0 / self.steps_per_second as f64
    }

    pub fn to_steps(&self, t: f64) -> usize {
        let n = t * self.steps_per_second as f64;
        // 0.07 * 100 is 7.000000000000001; that is still 7 steps.
        let r = n.round();
        if (n - r).abs() < 1e-9 * n.abs().max(1.0) {
            r as usize
        } else {
            n.ceil() as usize
        }
    }

    pub fn n_steps(&self) -> usize {
        self.to_steps(self.seconds)
    }

    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 / self.steps_per_second as f64
    }

    pub fn print(&self) {
        let peak_g = self.maneuver.peak_g();
        println!(
            "\
Environment:
  Viewport: {vx} m x {vy} m
  Path start: ({sx}, {sy}) m
  Duration: {seconds} s
  Timestep: {dt} s ({n_steps} steps)

Vehicle:
  Initial speed: {v0_mph} mph ({v0_mps:.2} m/s)
  Maximum speed: {vmax_mph} mph ({vmax_mps:.2} m/s)
  Peak acceleration: {peak_g} g ({peak_mps2:.2} m/s^2, {peak_fts2:.2} ft/s^2)",
            vx = self.viewport_size.x,
            vy = self.viewport_size.y,
            sx = self.path_start.x,
            sy = self.path_start.y,
            seconds = self.seconds,
            dt = self.dt(),
            n_steps = self.n_steps(),
            v0_mph = self.initial_speed_mph,
            v0_mps = mph_to_mps(self.initial_speed_mph),
            vmax_mph = self.max_speed_mph,
            vmax_mps = self.max_speed(),
            peak_g = peak_g,
            peak_mps2 = gs_to_mps2(peak_g),
            peak_fts2 = peak_g * G_TO_FTS2,
        );
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::constants::{MAJOR_TICK_INTERVAL, MAX_SPEED};

    #[test]
    fn test_defaults_match_constants() {
        let setup = SetupConfig::default();
        assert_eq!(setup.max_speed(), MAX_SPEED);
        assert_eq!(setup.viewport_size, VIEWPORT_SIZE);
        assert_eq!(setup.n_steps(), 600);
        assert_relative_eq!(setup.dt(), 0.1);
        assert_eq!(setup.time_at(600), 60.0);
        assert_eq!(setup.initial_velocity(), Vector::zeros());
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let setup = SetupConfig::from_yaml_str("{}").unwrap();
        assert_eq!(setup, SetupConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "
seconds: 5
steps_per_second: 20
initial_speed_mph: 30
path_start: [10.0, -5.0]
maneuver:
  type: Schedule
  segments:
    - duration: 2
      longitudinal_g: 0.3
      lateral_g: 0.0
    - duration: 1
      longitudinal_g: 0.0
      lateral_g: -0.5
ticks:
  major_interval: 2
";
        let setup = SetupConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(setup.n_steps(), 100);
        assert_eq!(setup.path_start, Vector::new(10.0, -5.0));
        assert_eq!(setup.viewport_size, VIEWPORT_SIZE);
        assert_relative_eq!(setup.initial_velocity(), Vector::new(0.0, mph_to_mps(30.0)));
        assert_eq!(setup.ticks.major_interval, 2);
        assert_eq!(setup.ticks.minor_interval, TickConfig::default().minor_interval);
        assert_ne!(setup.ticks.major_interval, MAJOR_TICK_INTERVAL);
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        assert!(SetupConfig::from_yaml_str("steps_per_second: 0").is_err());
        assert!(SetupConfig::from_yaml_str("seconds: -1").is_err());
        assert!(SetupConfig::from_yaml_str("max_speed_mph: 0").is_err());
        assert!(SetupConfig::from_yaml_str("ticks: {minor_interval: 0}").is_err());
        assert!(SetupConfig::from_yaml_str(
            "maneuver: {type: Schedule, segments: [{duration: -1, longitudinal_g: 0, lateral_g: 0}]}"
        )
        .is_err());
        assert!(SetupConfig::from_yaml_str("maneuver: {type: Spin}").is_err());
    }

    #[test]
    fn test_to_steps_ignores_rounding_error() {
        let setup = SetupConfig {
            steps_per_second: 100,
            ..Default::default()
        };
        assert_eq!(setup.to_steps(0.07), 7);
        assert_eq!(setup.to_steps(1.1), 110);
        assert_eq!(setup.to_steps(0.075), 8);
        assert_eq!(setup.to_steps(0.0), 0);
        for k in 0..2000 {
            assert_eq!(setup.to_steps(k as f64 / 100.0), k);
        }
    }

    #[test]
    fn test_huge_run_rejected() {
        assert!(SetupConfig::from_yaml_str("seconds: 1e30").is_err());
        assert!(SetupConfig::from_yaml_str("seconds: 1e12").is_err());
        assert!(SetupConfig::from_yaml_str("seconds: 1e6\nsteps_per_second: 100").is_err());
        let at_limit = format!("seconds: {}\nsteps_per_second: 1", MAX_STEPS);
        assert!(SetupConfig::from_yaml_str(&at_limit).is_ok());
    }

    #[test]
    fn test_negative_initial_speed_rejected() {
        assert!(SetupConfig::from_yaml_str("initial_speed_mph: -90").is_err());
        assert!(SetupConfig::from_yaml_str("initial_speed_mph: .nan").is_err());
        assert!(SetupConfig::from_yaml_str("initial_speed_mph: 0").is_ok());
    }

    #[test]
    fn test_parse_bundled_config() {
        let setup =
            SetupConfig::parse(concat!(env!("CARGO_MANIFEST_DIR"), "/configs/s_curve.yaml")).unwrap();
        assert_eq!(setup.seconds, 20.0);
        assert_eq!(setup.n_steps(), 200);
        assert_relative_eq!(setup.initial_velocity(), Vector::new(0.0, mph_to_mps(25.0)));
        assert_eq!(setup.maneuver.acceleration_g(5.0), Vector::new(0.4, 0.0));
        assert!(SetupConfig::parse("no/such/config.yaml").is_err());
    }

    #[test]
    fn test_initial_velocity_capped() {
        let setup = SetupConfig {
            initial_speed_mph: 90.0,
            ..Default::default()
        };
        assert_eq!(setup.initial_velocity(), Vector::new(0.0, MAX_SPEED));
    }

    #[test]
    fn test_schedule_acceleration() {
        let maneuver = Maneuver::Schedule {
            segments: vec![
                ManeuverSegment {
                    duration: 1.0,
                    longitudinal_g: 0.5,
                    lateral_g: 0.0,
                },
                ManeuverSegment {
                    duration: 2.0,
                    longitudinal_g: 0.0,
                    lateral_g: 0.25,
                },
            ],
        };
        assert_eq!(maneuver.acceleration_g(0.0), Vector::new(0.0, 0.5));
        assert_eq!(maneuver.acceleration_g(0.99), Vector::new(0.0, 0.5));
        assert_eq!(maneuver.acceleration_g(1.0), Vector::new(0.25, 0.0));
        assert_eq!(maneuver.acceleration_g(2.9), Vector::new(0.25, 0.0));
        assert_eq!(maneuver.acceleration_g(3.0), Vector::zeros());
        assert_eq!(maneuver.acceleration_g(100.0), Vector::zeros());
    }

    #[test]
    fn test_constant_acceleration() {
        let maneuver = Maneuver::Constant {
            longitudinal_g: 0.2,
            lateral_g: -0.1,
        };
        assert_eq!(maneuver.acceleration_g(0.0), Vector::new(-0.1, 0.2));
        assert_eq!(maneuver.acceleration_g(1e3), Vector::new(-0.1, 0.2));
        assert_relative_eq!(maneuver.peak_g(), (0.05f64).sqrt());
    }
}
