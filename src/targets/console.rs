//! Console target

use crate::core::timestamp::DEFAULT_TIME_TEMPLATE;
use crate::core::{ColorSupport, Printer, Result, Target};
use std::io::Write;

/// Writes composed lines to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleTarget;

impl ConsoleTarget {
    pub fn new() -> Self {
        Self
    }

    /// A target printing to stdout with colors detected from the terminal and
    /// a local time column
    ///
    /// # Example
    ///
    /// ```
    /// use reggol::{ConsoleTarget, Factory};
    ///
    /// let factory = Factory::new();
    /// factory.add_target(ConsoleTarget::target().with_show_diff(true));
    /// ```
    pub fn target() -> Target {
        Target::printer(Self)
            .with_colors(ColorSupport::detect())
            .with_show_time(DEFAULT_TIME_TEMPLATE)
    }
}

impl Printer for ConsoleTarget {
    fn print(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_shows_time_column() {
        let target = ConsoleTarget::target();
        assert_eq!(target.config.show_time.as_deref(), Some(DEFAULT_TIME_TEMPLATE));
        assert_eq!(target.sink_name(), "console");
    }
}
