//! Message types and level constants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verbosity threshold. A message is shown when its type's rank does not
/// exceed the effective level of its logger.
pub type Level = u32;

pub const SILENT: Level = 0;
pub const SUCCESS: Level = 1;
pub const ERROR: Level = 1;
pub const INFO: Level = 2;
pub const WARN: Level = 2;
pub const DEBUG: Level = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Success,
    Error,
    Info,
    Warn,
    Debug,
}

impl LogType {
    pub const ALL: [LogType; 5] = [
        LogType::Success,
        LogType::Error,
        LogType::Info,
        LogType::Warn,
        LogType::Debug,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogType::Success => "success",
            LogType::Error => "error",
            LogType::Info => "info",
            LogType::Warn => "warn",
            LogType::Debug => "debug",
        }
    }

    /// Minimum level at which messages of this type are shown
    pub const fn rank(&self) -> Level {
        match self {
            LogType::Success => SUCCESS,
            LogType::Error => ERROR,
            LogType::Info => INFO,
            LogType::Warn => WARN,
            LogType::Debug => DEBUG,
        }
    }

    /// Bracketed one-letter tag printed in front of the message
    pub fn prefix(&self) -> &'static str {
        match self {
            LogType::Success => "[S]",
            LogType::Error => "[E]",
            LogType::Info => "[I]",
            LogType::Warn => "[W]",
            LogType::Debug => "[D]",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(LogType::Success),
            "error" => Ok(LogType::Error),
            "info" => Ok(LogType::Info),
            "warn" | "warning" => Ok(LogType::Warn),
            "debug" => Ok(LogType::Debug),
            _ => Err(format!("Invalid log type: '{}'", s)),
        }
    }
}
