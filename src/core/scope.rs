//! RAII guard for begin/end profiling brackets

use super::{event::EventRecord, logger::Logger, outcome::Outcome};

/// Logs an opening event and enters one depth level on creation; leaves the
/// level and logs the closing event when dropped.
///
/// # Example
///
/// ```
/// use rust_profiling_logger::prelude::*;
///
/// let registry = SinkRegistry::builder().build().unwrap();
/// let mut logger = Logger::new(&registry, "Worker");
/// {
///     let mut scope = logger.scope("Importer", "run");
///     scope.log("Importer", "read_rows", None);
///     scope.set_outcome(Outcome::ok_with("12 rows"));
/// }
/// assert_eq!(logger.depth(), 0);
/// assert_eq!(logger.events().len(), 3);
/// ```
pub struct ProfileScope<'a> {
    logger: &'a mut Logger,
    class_name: String,
    method: String,
    outcome: Option<Outcome>,
}

impl<'a> ProfileScope<'a> {
    pub(crate) fn new(logger: &'a mut Logger, class_name: &str, method: &str) -> Self {
        logger.log(class_name, method, None);
        logger.enter();
        Self {
            logger,
            class_name: class_name.to_string(),
            method: method.to_string(),
            outcome: None,
        }
    }

    /// Log a nested event inside this scope
    pub fn log(&mut self, class_name: &str, method: &str, result: Option<Outcome>) -> &EventRecord {
        self.logger.log(class_name, method, result)
    }

    /// Result attached to the closing event
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    /// Open a nested scope
    pub fn scope(&mut self, class_name: &str, method: &str) -> ProfileScope<'_> {
        ProfileScope::new(self.logger, class_name, method)
    }

    pub fn logger(&self) -> &Logger {
        self.logger
    }
}

impl Drop for ProfileScope<'_> {
    fn drop(&mut self) {
        self.logger.leave();
        let class_name = std::mem::take(&mut self.class_name);
        let method = std::mem::take(&mut self.method);
        self.logger.log(&class_name, &method, self.outcome.take());
    }
}
