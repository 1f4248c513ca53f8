//! Logging macros for events with formatted outcomes.
//!
//! # Examples
//!
//! ```
//! use rust_profiling_logger::prelude::*;
//! use rust_profiling_logger::{log_err, log_ok};
//!
//! let registry = SinkRegistry::builder().build().unwrap();
//! let mut logger = Logger::new(&registry, "Worker");
//!
//! log_ok!(logger, "Importer", "open");
//! log_ok!(logger, "Importer", "read", "{} rows", 12);
//! log_err!(logger, "Importer", "parse", 3, "bad row {}", 7);
//!
//! assert_eq!(logger.events().len(), 3);
//! assert!(logger.has_errors());
//! ```

/// Log an event with a successful outcome.
///
/// # Examples
///
/// ```
/// # use rust_profiling_logger::prelude::*;
/// # let registry = SinkRegistry::builder().build().unwrap();
/// # let mut logger = Logger::new(&registry, "Worker");
/// use rust_profiling_logger::log_ok;
/// log_ok!(logger, "Db", "connect");
/// log_ok!(logger, "Db", "query", "{} rows in {} ms", 10, 4);
/// ```
#[macro_export]
macro_rules! log_ok {
    ($logger:expr, $class:expr, $method:expr) => {
        $logger.log($class, $method, Some($crate::Outcome::success()))
    };
    ($logger:expr, $class:expr, $method:expr, $($arg:tt)+) => {
        $logger.log($class, $method, Some($crate::Outcome::ok_with(format!($($arg)+))))
    };
}

/// Log an event with a failing outcome and error code.
///
/// # Examples
///
/// ```
/// # use rust_profiling_logger::prelude::*;
/// # let registry = SinkRegistry::builder().build().unwrap();
/// # let mut logger = Logger::new(&registry, "Worker");
/// use rust_profiling_logger::log_err;
/// log_err!(logger, "Db", "connect", 500, "connection refused");
/// log_err!(logger, "Db", "query", 404, "table {} missing", "users");
/// assert!(logger.has_errors());
/// ```
#[macro_export]
macro_rules! log_err {
    ($logger:expr, $class:expr, $method:expr, $code:expr, $($arg:tt)+) => {
        $logger.log($class, $method, Some($crate::Outcome::failure($code, format!($($arg)+))))
    };
}

/// Open a [`ProfileScope`](crate::ProfileScope); the class defaults to the
/// calling module path.
///
/// # Examples
///
/// ```
/// # use rust_profiling_logger::prelude::*;
/// # let registry = SinkRegistry::builder().build().unwrap();
/// # let mut logger = Logger::new(&registry, "Worker");
/// use rust_profiling_logger::profile_scope;
/// {
///     let _scope = profile_scope!(logger, "run");
/// }
/// assert_eq!(logger.depth(), 0);
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($logger:expr, $method:expr) => {
        $logger.scope(module_path!(), $method)
    };
    ($logger:expr, $class:expr, $method:expr) => {
        $logger.scope($class, $method)
    };
}
