//! In-memory target for tests and capture

use crate::core::{Printer, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects composed lines in memory.
///
/// Clones share the same buffer, so keep one clone to inspect what a
/// factory printed into the other.
///
/// ```
/// use reggol::{Factory, MemoryTarget, Target};
///
/// let memory = MemoryTarget::new();
/// let factory = Factory::new();
/// factory.add_target(Target::printer(memory.clone()));
///
/// factory.create_logger("db").warn(["slow query"]);
/// assert_eq!(memory.contents(), "[W] db slow query\n");
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryTarget {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// All lines, each terminated by a newline
    pub fn contents(&self) -> String {
        self.lines
            .lock()
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Printer for MemoryTarget {
    fn print(&mut self, text: &str) -> Result<()> {
        self.lines.lock().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryTarget::new();
        let mut writer = memory.clone();
        writer.print("one").unwrap();
        writer.print("two").unwrap();
        assert_eq!(memory.lines(), ["one", "two"]);
        assert_eq!(memory.contents(), "one\ntwo\n");

        memory.clear();
        assert!(writer.is_empty());
    }
}
