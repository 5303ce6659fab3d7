//! Output targets: rendering preferences plus one sink

use super::color::{self, ColorSupport};
use super::error::{LoggerError, Result};
use super::formatter::indent_continuation;
use super::level_tree::LevelTree;
use super::log_type::Level;
use super::record::Record;
use super::timestamp::{format_duration, render_millis};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_LENGTH: usize = 10240;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Layout of the logger-name column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    /// Minimum width of the name column
    pub width: usize,
    /// Spaces between columns
    pub margin: usize,
    pub align: Align,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            width: 0,
            margin: 1,
            align: Align::Left,
        }
    }
}

/// Rendering preferences of a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub colors: ColorSupport,
    /// Time column template, see [`crate::core::timestamp`]
    pub show_time: Option<String>,
    /// Append the time elapsed since this target's previous message
    pub show_diff: bool,
    pub label: LabelStyle,
    /// Per-line character limit for message bodies
    pub max_length: usize,
    /// Per-target overrides; names it has no entry for use the factory tree
    pub levels: Option<LevelTree>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            colors: ColorSupport::None,
            show_time: None,
            show_diff: false,
            label: LabelStyle::default(),
            max_length: DEFAULT_MAX_LENGTH,
            levels: None,
        }
    }
}

impl TargetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(LoggerError::config(
                "TargetConfig",
                "max_length must be positive",
            ));
        }
        Ok(())
    }

    /// Effective level of `name` for this target.
    ///
    /// An explicit entry on the name's path in this target's tree wins;
    /// otherwise the factory tree decides.
    pub fn level_of(&self, name: &str, global: &LevelTree) -> Level {
        self.levels
            .as_ref()
            .and_then(|levels| levels.lookup(name))
            .unwrap_or_else(|| global.get(name))
    }
}

/// Receives fully composed lines
pub trait Printer: Send {
    fn print(&mut self, text: &str) -> Result<()>;

    fn name(&self) -> &str {
        "printer"
    }
}

/// Receives structured records
pub trait Recorder: Send {
    fn record(&mut self, record: &Record) -> Result<()>;

    fn name(&self) -> &str {
        "recorder"
    }
}

impl<F> Printer for F
where
    F: FnMut(&str) -> Result<()> + Send,
{
    fn print(&mut self, text: &str) -> Result<()> {
        self(text)
    }
}

impl<F> Recorder for F
where
    F: FnMut(&Record) -> Result<()> + Send,
{
    fn record(&mut self, record: &Record) -> Result<()> {
        self(record)
    }
}

pub enum Sink {
    Print(Box<dyn Printer>),
    Record(Box<dyn Recorder>),
}

impl Sink {
    pub fn name(&self) -> &str {
        match self {
            Sink::Print(printer) => printer.name(),
            Sink::Record(recorder) => recorder.name(),
        }
    }
}

/// A configured output destination
pub struct Target {
    pub config: TargetConfig,
    sink: Sink,
    /// Time of the last message delivered to this target
    timestamp: Option<i64>,
}

impl Target {
    pub fn new(config: TargetConfig, sink: Sink) -> Self {
        Self {
            config,
            sink,
            timestamp: None,
        }
    }

    pub fn printer<P: Printer + 'static>(printer: P) -> Self {
        Self::new(TargetConfig::default(), Sink::Print(Box::new(printer)))
    }

    pub fn recorder<R: Recorder + 'static>(recorder: R) -> Self {
        Self::new(TargetConfig::default(), Sink::Record(Box::new(recorder)))
    }

    #[must_use]
    pub fn with_config(mut self, config: TargetConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorSupport) -> Self {
        self.config.colors = colors;
        self
    }

    /// Show a time column rendered from `template`
    ///
    /// # Example
    ///
    /// ```
    /// use reggol::{MemoryTarget, Target};
    ///
    /// let target = Target::printer(MemoryTarget::new()).with_show_time("hh:mm:ss ");
    /// assert_eq!(target.config.show_time.as_deref(), Some("hh:mm:ss "));
    /// ```
    #[must_use]
    pub fn with_show_time(mut self, template: impl Into<String>) -> Self {
        self.config.show_time = Some(template.into());
        self
    }

    #[must_use]
    pub fn with_show_diff(mut self, show_diff: bool) -> Self {
        self.config.show_diff = show_diff;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: LabelStyle) -> Self {
        self.config.label = label;
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelTree) -> Self {
        self.config.levels = Some(levels);
        self
    }

    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Hand a message to the sink and remember its time for the next diff
    pub(crate) fn deliver(&mut self, record: &Record) -> Result<()> {
        let result = match &mut self.sink {
            Sink::Print(printer) => {
                let line = compose(&self.config, record, self.timestamp);
                printer.print(&line)
            }
            Sink::Record(recorder) => recorder.record(record),
        };
        self.timestamp = Some(record.timestamp);
        result
    }
}

/// Lay out one line: time column, label and prefix, body, diff suffix.
///
/// `previous` is the time of the target's last message; the diff is zero
/// when there is none.
pub fn compose(config: &TargetConfig, record: &Record, previous: Option<i64>) -> String {
    let colors = config.colors;
    let prefix = record.kind.prefix();
    let space = " ".repeat(config.label.margin);
    let mut indent = prefix.len() + space.len();
    let mut output = String::new();

    if let Some(template) = &config.show_time {
        indent += template.chars().count();
        output.push_str(&color::color(colors, 8, render_millis(template, record.timestamp), ""));
    }

    let code = color::code(&record.name, colors);
    let label = match code {
        Some(code) => color::color(colors, code, &record.name, ";1"),
        None => record.name.clone(),
    };
    let name_width = record.name.chars().count();
    let padding = " ".repeat(config.label.width.saturating_sub(name_width));
    let column = config.label.width.max(name_width);

    match config.label.align {
        Align::Right => {
            output.push_str(&padding);
            output.push_str(&label);
            output.push_str(&space);
            output.push_str(prefix);
            output.push_str(&space);
        }
        Align::Left => {
            output.push_str(prefix);
            output.push_str(&space);
            output.push_str(&label);
            output.push_str(&padding);
            output.push_str(&space);
        }
    }
    indent += column + space.len();

    output.push_str(&indent_continuation(&record.content, indent));

    if config.show_diff {
        let diff = previous.map_or(0, |previous| record.timestamp - previous);
        let suffix = format!(" +{}", format_duration(diff));
        match code {
            Some(code) => output.push_str(&color::color(colors, code, suffix, "")),
            None => output.push_str(&suffix),
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_type::{LogType, DEBUG, INFO, SILENT};

    fn record(content: &str) -> Record {
        Record::new(1, 10_000, "test", LogType::Info).with_content(content)
    }

    #[test]
    fn test_compose_default_layout() {
        let config = TargetConfig::default();
        assert_eq!(compose(&config, &record("hello"), None), "[I] test hello");
    }

    #[test]
    fn test_compose_diff() {
        let config = TargetConfig {
            show_diff: true,
            ..TargetConfig::default()
        };
        assert_eq!(compose(&config, &record("x"), None), "[I] test x +0ms");
        assert_eq!(compose(&config, &record("x"), Some(9_998)), "[I] test x +2ms");
    }

    #[test]
    fn test_compose_right_aligned_label() {
        let config = TargetConfig {
            label: LabelStyle {
                align: Align::Right,
                width: 10,
                margin: 2,
            },
            ..TargetConfig::default()
        };
        assert_eq!(
            compose(&config, &record("message\nmessage"), None),
            "      test  [I]  message\n                 message"
        );
    }

    #[test]
    fn test_compose_left_aligned_label_indent() {
        let config = TargetConfig {
            label: LabelStyle {
                width: 6,
                ..LabelStyle::default()
            },
            ..TargetConfig::default()
        };
        assert_eq!(
            compose(&config, &record("a\nb"), None),
            "[I] test   a\n           b"
        );
    }

    #[test]
    fn test_compose_time_column_width() {
        let config = TargetConfig {
            show_time: Some("[time] ".to_string()),
            ..TargetConfig::default()
        };
        assert_eq!(
            compose(&config, &record("a\nb"), None),
            "[time] [I] test a\n                b"
        );
    }

    #[test]
    fn test_compose_colored_label() {
        let config = TargetConfig {
            colors: ColorSupport::Basic,
            ..TargetConfig::default()
        };
        let code = color::code("test", ColorSupport::Basic).unwrap();
        assert_eq!(
            compose(&config, &record("hi"), None),
            format!("[I] \x1b[3{}mtest\x1b[0m hi", code)
        );
    }

    #[test]
    fn test_config_from_json() {
        let config = TargetConfig::from_json(
            r#"{"colors": false, "show_diff": true, "label": {"align": "right", "width": 8},
                "levels": {"base": 3, "noisy": 0}}"#,
        )
        .unwrap();
        assert_eq!(config.colors, ColorSupport::None);
        assert!(config.show_diff);
        assert_eq!(config.label.margin, 1);
        assert_eq!(config.label.align, Align::Right);
        assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);

        let global = LevelTree::default();
        assert_eq!(config.level_of("noisy", &global), 0);
        assert_eq!(config.level_of("other", &global), INFO);
    }

    #[test]
    fn test_level_of_falls_back_to_factory_tree() {
        let config = TargetConfig::from_json(r#"{"levels": {"base": 2, "noisy": 0}}"#).unwrap();
        let mut global = LevelTree::default();
        global.set("svc", DEBUG);

        assert_eq!(config.level_of("svc", &global), DEBUG);
        assert_eq!(config.level_of("noisy", &global), SILENT);
        assert_eq!(config.level_of("noisy:child", &global), SILENT);
        assert_eq!(config.level_of("other", &global), INFO);
        assert_eq!(TargetConfig::default().level_of("svc", &global), DEBUG);
    }

    #[test]
    fn test_config_rejects_zero_max_length() {
        let err = TargetConfig::from_json(r#"{"max_length": 0}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
