//! Core logger types and traits

pub mod clock;
pub mod color;
pub mod error;
pub mod factory;
pub mod formatter;
pub mod inspect;
pub mod level_tree;
pub mod log_type;
pub mod logger;
pub mod meta;
pub mod metrics;
pub mod record;
pub mod target;
pub mod timestamp;
pub mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use color::ColorSupport;
pub use error::{LoggerError, Result};
pub use factory::{
    create_logger, register_formatter, register_target, Factory, FactoryBuilder, TargetHandle,
    TargetId,
};
pub use formatter::{format_message, Formatter, FormatterRegistry};
pub use level_tree::{LevelNode, LevelTree};
pub use log_type::{Level, LogType, DEBUG, ERROR, INFO, SILENT, SUCCESS, WARN};
pub use logger::Logger;
pub use meta::{FieldValue, Meta};
pub use metrics::LoggerMetrics;
pub use record::Record;
pub use target::{Align, LabelStyle, Printer, Recorder, Sink, Target, TargetConfig};
pub use value::{ErrorKind, LoggedError, Value};
