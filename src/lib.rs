//! # Reggol
//!
//! A leveled logging façade with named, hierarchical loggers, printf-style
//! templates with pluggable formatters, and multiple output targets.
//!
//! ## Features
//!
//! - **Named loggers**: one shared instance per name, extended with `:` namespaces
//! - **Level tree**: per-namespace verbosity, optionally overridden per target
//! - **Templates**: `%s %d %j %c %C %o` built in, custom letters registrable
//! - **Targets**: composed console lines or structured records, isolated from
//!   each other's failures
//!
//! ```
//! use reggol::prelude::*;
//!
//! let memory = MemoryTarget::new();
//! let factory = Factory::new();
//! factory.add_target(Target::printer(memory.clone()));
//!
//! let logger = factory.create_logger("app").extend("db");
//! logger.info(["connected to %s", "primary"]);
//! assert_eq!(memory.lines(), ["[I] app:db connected to primary"]);
//! ```

pub mod core;
pub mod macros;
pub mod targets;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::targets::ConsoleTarget;
    pub use crate::targets::{JsonTarget, MemoryTarget};
    pub use crate::core::{
        create_logger, register_formatter, register_target, Align, Clock, ColorSupport,
        ErrorKind, Factory, FieldValue, Level, LevelTree, LabelStyle, LogType, LoggedError,
        Logger, LoggerError, LoggerMetrics, ManualClock, Meta, Record, Result, SystemClock,
        Target, TargetConfig, TargetHandle, Value, DEBUG, ERROR, INFO, SILENT, SUCCESS, WARN,
    };
}

#[cfg(feature = "console")]
pub use targets::ConsoleTarget;
pub use targets::{JsonTarget, MemoryTarget};
pub use core::{
    create_logger, register_formatter, register_target, Align, Clock, ColorSupport, ErrorKind,
    Factory, FactoryBuilder, FieldValue, Formatter, Level, LevelNode, LevelTree, LabelStyle,
    LogType, LoggedError, Logger, LoggerError, LoggerMetrics, ManualClock, Meta, Printer, Record,
    Recorder, Result, Sink, SystemClock, Target, TargetConfig, TargetHandle, TargetId, Value,
    DEBUG, ERROR, INFO, SILENT, SUCCESS, WARN,
};
