//! Logging macros accepting heterogeneous arguments.
//!
//! Each argument is converted with [`Value::from`](crate::Value), so strings,
//! numbers, JSON values and errors can be mixed in one call. The first
//! argument acts as the template.
//!
//! # Examples
//!
//! ```
//! use reggol::prelude::*;
//! use reggol::info;
//!
//! let memory = MemoryTarget::new();
//! let factory = Factory::new();
//! factory.add_target(Target::printer(memory.clone()));
//! let logger = factory.create_logger("server");
//!
//! info!(logger, "listening on port %d", 8080);
//! info!(logger, "user %s logged in", "alice", serde_json::json!({ "admin": true }));
//!
//! assert_eq!(
//!     memory.lines(),
//!     ["[I] server listening on port 8080", "[I] server user alice logged in { admin: true }"]
//! );
//! ```

/// Log a message of the given [`LogType`](crate::LogType).
///
/// # Examples
///
/// ```
/// # use reggol::prelude::*;
/// # let logger = Factory::new().create_logger("app");
/// use reggol::log;
/// log!(logger, LogType::Info, "Simple message");
/// log!(logger, LogType::Error, "Error code: %d", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $kind:expr, $($arg:expr),+ $(,)?) => {
        $logger.log($kind, ::std::vec![$($crate::Value::from($arg)),+])
    };
}

/// Log a success message.
///
/// ```
/// # use reggol::prelude::*;
/// # let logger = Factory::new().create_logger("app");
/// use reggol::success;
/// success!(logger, "Deployed %s", "v1.2.0");
/// ```
#[macro_export]
macro_rules! success {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogType::Success, $($arg),+)
    };
}

/// Log an error message.
///
/// ```
/// # use reggol::prelude::*;
/// # let logger = Factory::new().create_logger("app");
/// use reggol::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, LoggedError::new("connection refused"));
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogType::Error, $($arg),+)
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogType::Info, $($arg),+)
    };
}

/// Log a warning.
///
/// ```
/// # use reggol::prelude::*;
/// # let logger = Factory::new().create_logger("app");
/// use reggol::warn;
/// warn!(logger, "Retry attempt %d of %d", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogType::Warn, $($arg),+)
    };
}

/// Log a debug message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogType::Debug, $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Factory, LogType, Target, DEBUG};
    use crate::targets::MemoryTarget;

    fn setup(name: &str) -> (std::sync::Arc<crate::Logger>, MemoryTarget) {
        let memory = MemoryTarget::new();
        let factory = Factory::new();
        factory.add_target(Target::printer(memory.clone()));
        let logger = factory.create_logger(name);
        logger.set_level(DEBUG);
        (logger, memory)
    }

    #[test]
    fn test_log_macro() {
        let (logger, memory) = setup("macro");
        log!(logger, LogType::Info, "Test message");
        log!(logger, LogType::Info, "Formatted: %d", 42);
        assert_eq!(
            memory.lines(),
            ["[I] macro Test message", "[I] macro Formatted: 42"]
        );
    }

    #[test]
    fn test_type_macros() {
        let (logger, memory) = setup("m");
        success!(logger, "done");
        error!(logger, "code %d", 500);
        info!(logger, "items", 100);
        warn!(logger, "retry %d of %d", 1, 3,);
        debug!(logger, "flag %s", true);
        assert_eq!(
            memory.lines(),
            [
                "[S] m done",
                "[E] m code 500",
                "[I] m items 100",
                "[W] m retry 1 of 3",
                "[D] m flag true",
            ]
        );
    }
}
