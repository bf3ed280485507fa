//! Common traits for FMI schema

/// The `DefaultExperiment` element of a model description. Every field is
/// optional; an FMU may advertise any subset of the experiment defaults.
pub trait DefaultExperiment {
    fn start_time(&self) -> Option<f64>;
    fn stop_time(&self) -> Option<f64>;
    fn tolerance(&self) -> Option<f64>;
    fn step_size(&self) -> Option<f64>;
}
