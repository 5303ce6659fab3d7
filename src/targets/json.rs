//! JSON lines target for structured records

use crate::core::{Record, Recorder, Result, Target};
use std::io::{self, Write};

/// Writes each record as a single-line JSON object (JSONL format)
///
/// The record's `content` is rendered with this target's configuration, so
/// leave colors off for machine-readable output.
pub struct JsonTarget<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonTarget<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonTarget<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> JsonTarget<W> {
    /// Wrap into a [`Target`] with the default configuration
    pub fn target(writer: W) -> Target {
        Target::recorder(Self::new(writer))
    }
}

impl<W: Write + Send> Recorder for JsonTarget<W> {
    fn record(&mut self, record: &Record) -> Result<()> {
        let json = record.to_json()?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogType, Meta};

    #[test]
    fn test_json_target_writes_lines() -> Result<()> {
        let mut target = JsonTarget::new(Vec::new());
        let record = Record::new(7, 1_000, "app", LogType::Warn)
            .with_content("disk almost full")
            .with_meta(Meta::new().with_field("host", "alpha"));

        target.record(&record)?;
        target.record(&record)?;

        let output = String::from_utf8(target.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0])?;
        assert_eq!(parsed["id"], 7);
        assert_eq!(parsed["type"], "warn");
        assert_eq!(parsed["level"], 2);
        assert_eq!(parsed["content"], "disk almost full");
        assert_eq!(parsed["meta"]["host"], "alpha");
        Ok(())
    }
}
