//! Drive a single Co-Simulation FMU from start to stop and capture the final
//! snapshot of its requested outputs.

use std::{collections::BTreeMap, path::PathBuf};

use cads_fmi_schema::traits::DefaultExperiment;

use crate::{import::Import, preload, value::ScalarValue, Error};

#[cfg(feature = "fmi2")]
mod fmi2;
#[cfg(feature = "fmi3")]
mod fmi3;

/// Name given to every FMU instance created by the runner.
pub const INSTANCE_NAME: &str = "cads-runner";

/// Sentinel output key for FMUs that expose no output variables; carries the
/// final communication point of the simulation.
pub const TIME_OUTPUT: &str = "time";

/// Tolerance passed to initialization when the FMU does not advertise one.
const DEFAULT_TOLERANCE: f64 = 1e-4;

/// End-of-horizon guard for the step loop.
const STOP_EPSILON: f64 = 1e-12;

/// Configuration of a single FMU execution.
///
/// Unset timing fields fall back to the FMU's advertised default experiment.
/// Start values are textual; each is parsed against the declared base type of
/// its target variable. An empty `outputs` list means "auto-select" by
/// causality.
#[derive(Debug, Default, Clone)]
pub struct FmuConfig {
    pub fmu_path: PathBuf,
    pub start_time: Option<f64>,
    pub stop_time: Option<f64>,
    pub step_size: Option<f64>,
    pub start_values: BTreeMap<String, String>,
    pub outputs: Vec<String>,
}

/// The final values captured from one FMU execution, keyed by variable name.
pub type FmuOutputs = BTreeMap<String, ScalarValue>;

/// Execute the FMU described by `config` and return the final snapshot of its
/// requested outputs.
///
/// The archive is unpacked into a scratch directory that is removed on every
/// exit path; the FMU instance is likewise freed before this returns.
pub fn run(config: &FmuConfig) -> Result<FmuOutputs, Error> {
    preload::libpython_hint();
    log::debug!("Running FMU {:?}", config.fmu_path);
    match Import::from_path(&config.fmu_path)? {
        #[cfg(feature = "fmi2")]
        Import::Fmi2(import) => fmi2::co_simulation(&import, config),
        #[cfg(feature = "fmi3")]
        Import::Fmi3(import) => fmi3::co_simulation(&import, config),
    }
}

/// The resolved time horizon and communication step of one simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Timing {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
    pub tolerance: f64,
}

impl Timing {
    /// Derive (start, stop, step) from the caller overrides and the FMU's
    /// default experiment. Overrides win; each field falls back
    /// independently.
    pub fn resolve<DE: DefaultExperiment>(config: &FmuConfig, experiment: &DE) -> Result<Self, Error> {
        let start = config
            .start_time
            .or_else(|| experiment.start_time())
            .unwrap_or(0.0);

        let stop = config
            .stop_time
            .or_else(|| experiment.stop_time())
            .unwrap_or(start + 1.0);

        let mut step = config
            .step_size
            .or_else(|| experiment.step_size())
            .unwrap_or_else(|| (stop - start).max(1e-3));

        if step <= 0.0 {
            step = if stop - start > 0.0 { stop - start } else { 1.0 };
        }

        if stop < start {
            return Err(Error::InvalidTiming { start, stop });
        }

        let tolerance = experiment.tolerance().unwrap_or(DEFAULT_TOLERANCE);
        debug_assert!(start <= stop && step > 0.0);

        Ok(Self {
            start,
            stop,
            step,
            tolerance,
        })
    }

    /// The communication step for the interval beginning at `current`,
    /// clamped to the remaining horizon.
    pub fn clamped_step(&self, current: f64) -> f64 {
        self.step.min(self.stop - current)
    }

    /// True while `current` has not reached the end of the horizon.
    pub fn keep_stepping(&self, current: f64) -> bool {
        current < self.stop - STOP_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Experiment {
        start: Option<f64>,
        stop: Option<f64>,
        tolerance: Option<f64>,
        step: Option<f64>,
    }

    impl Experiment {
        fn none() -> Self {
            Self {
                start: None,
                stop: None,
                tolerance: None,
                step: None,
            }
        }
    }

    impl DefaultExperiment for Experiment {
        fn start_time(&self) -> Option<f64> {
            self.start
        }
        fn stop_time(&self) -> Option<f64> {
            self.stop
        }
        fn tolerance(&self) -> Option<f64> {
            self.tolerance
        }
        fn step_size(&self) -> Option<f64> {
            self.step
        }
    }

    #[test]
    fn test_all_defaults_missing() {
        let timing = Timing::resolve(&FmuConfig::default(), &Experiment::none()).unwrap();
        assert_eq!(timing.start, 0.0);
        assert_eq!(timing.stop, 1.0);
        assert_eq!(timing.step, 1.0);
        assert_eq!(timing.tolerance, 1e-4);
    }

    #[test]
    fn test_overrides_win_over_experiment() {
        let config = FmuConfig {
            start_time: Some(2.0),
            stop_time: Some(4.0),
            step_size: Some(0.25),
            ..Default::default()
        };
        let experiment = Experiment {
            start: Some(0.0),
            stop: Some(10.0),
            tolerance: Some(1e-6),
            step: Some(1.0),
        };
        let timing = Timing::resolve(&config, &experiment).unwrap();
        assert_eq!(timing.start, 2.0);
        assert_eq!(timing.stop, 4.0);
        assert_eq!(timing.step, 0.25);
        assert_eq!(timing.tolerance, 1e-6);
    }

    #[test]
    fn test_step_falls_back_to_horizon() {
        // Default experiment advertises only start and stop; the step covers
        // the whole horizon in one communication point.
        let experiment = Experiment {
            start: Some(0.0),
            stop: Some(10.0),
            tolerance: None,
            step: None,
        };
        let timing = Timing::resolve(&FmuConfig::default(), &experiment).unwrap();
        assert_eq!(timing.step, 10.0);
    }

    #[test]
    fn test_tiny_horizon_keeps_minimum_step() {
        let experiment = Experiment {
            start: Some(0.0),
            stop: Some(1e-6),
            tolerance: None,
            step: None,
        };
        let timing = Timing::resolve(&FmuConfig::default(), &experiment).unwrap();
        assert_eq!(timing.step, 1e-3);
    }

    #[test]
    fn test_nonpositive_step_is_replaced() {
        let config = FmuConfig {
            stop_time: Some(5.0),
            step_size: Some(0.0),
            ..Default::default()
        };
        let timing = Timing::resolve(&config, &Experiment::none()).unwrap();
        assert_eq!(timing.step, 5.0);

        // Degenerate horizon as well
        let config = FmuConfig {
            start_time: Some(3.0),
            stop_time: Some(3.0),
            step_size: Some(-1.0),
            ..Default::default()
        };
        let timing = Timing::resolve(&config, &Experiment::none()).unwrap();
        assert_eq!(timing.step, 1.0);
    }

    #[test]
    fn test_stop_before_start_is_rejected() {
        let config = FmuConfig {
            start_time: Some(1.0),
            stop_time: Some(0.5),
            ..Default::default()
        };
        assert!(matches!(
            Timing::resolve(&config, &Experiment::none()),
            Err(Error::InvalidTiming { .. })
        ));
    }

    #[test]
    fn test_equal_start_and_stop_performs_no_steps() {
        let config = FmuConfig {
            start_time: Some(2.0),
            stop_time: Some(2.0),
            ..Default::default()
        };
        let timing = Timing::resolve(&config, &Experiment::none()).unwrap();
        assert!(!timing.keep_stepping(timing.start));
    }

    #[test]
    fn test_step_clamped_to_remaining_horizon() {
        let config = FmuConfig {
            stop_time: Some(1.0),
            step_size: Some(0.7),
            ..Default::default()
        };
        let timing = Timing::resolve(&config, &Experiment::none()).unwrap();
        assert_eq!(timing.clamped_step(0.0), 0.7);
        assert!((timing.clamped_step(0.7) - 0.3).abs() < 1e-15);
    }
}
