//! Template formatting and the formatter registry
//!
//! A template is scanned for `%X` specifiers where `X` is an ASCII letter.
//! Each specifier with a registered formatter consumes the next argument;
//! unknown specifiers stay in the output verbatim and `%%` renders a single
//! `%`. Arguments left over after the template are appended, space separated,
//! with structured values routed through the `o` formatter.
//!
//! Lookups check the factory-local table first and fall back to the shared
//! table, which is seeded with the built-ins `s`, `d`, `j`, `c`, `C` and `o`.

use super::color::{self, ColorSupport};
use super::error::{LoggerError, Result};
use super::inspect::{collapse_lines, inspect};
use super::logger::Logger;
use super::target::TargetConfig;
use super::value::{format_number, Value};
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock};

pub type Formatter = Arc<dyn Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync>;

pub const ELLIPSIS: &str = "...";

static SHARED: OnceLock<RwLock<HashMap<char, Formatter>>> = OnceLock::new();

fn shared() -> &'static RwLock<HashMap<char, Formatter>> {
    SHARED.get_or_init(|| RwLock::new(builtins()))
}

fn into_formatter<F>(f: F) -> Formatter
where
    F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

fn builtins() -> HashMap<char, Formatter> {
    let mut map = HashMap::new();
    map.insert('s', into_formatter(|value, _, _| value.to_string()));
    map.insert(
        'd',
        into_formatter(|value, target, _| {
            color::color(target.colors, 3, format_number(value.to_number()), "")
        }),
    );
    map.insert('j', into_formatter(|value, _, _| value.to_json().to_string()));
    map.insert(
        'c',
        into_formatter(|value, target, logger| {
            color::color_named(target.colors, logger.name(), value, "")
        }),
    );
    map.insert('C', into_formatter(|value, target, _| color::color(target.colors, 15, value, ";1")));
    map.insert('o', into_formatter(|value, target, _| inspect_value(value, target.colors)));
    map
}

fn inspect_value(value: &Value, colors: ColorSupport) -> String {
    collapse_lines(&inspect(value, colors.is_enabled()))
}

fn validate_key(key: char) -> Result<()> {
    if key.is_ascii_alphabetic() {
        Ok(())
    } else {
        Err(LoggerError::formatter_key(key))
    }
}

/// Two-tier formatter table: local entries shadow the shared ones
#[derive(Default)]
pub struct FormatterRegistry {
    local: RwLock<HashMap<char, Formatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a formatter visible to this registry only
    pub fn register<F>(&self, key: char, formatter: F) -> Result<()>
    where
        F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
    {
        self.insert(key, into_formatter(formatter))
    }

    pub fn insert(&self, key: char, formatter: Formatter) -> Result<()> {
        validate_key(key)?;
        self.local.write().insert(key, formatter);
        Ok(())
    }

    /// Remove a local formatter, uncovering the shared one if any
    pub fn unregister(&self, key: char) -> bool {
        self.local.write().remove(&key).is_some()
    }

    /// Register or replace a formatter in the shared table seen by every registry
    pub fn register_shared<F>(key: char, formatter: F) -> Result<()>
    where
        F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
    {
        validate_key(key)?;
        shared().write().insert(key, into_formatter(formatter));
        Ok(())
    }

    pub fn resolve(&self, key: char) -> Option<Formatter> {
        if let Some(formatter) = self.local.read().get(&key) {
            return Some(Arc::clone(formatter));
        }
        shared().read().get(&key).map(Arc::clone)
    }
}

/// Render the arguments of one call for one target
pub fn format_message(
    args: Vec<Value>,
    target: &TargetConfig,
    logger: &Logger,
    registry: &FormatterRegistry,
) -> String {
    let mut args: VecDeque<Value> = args.into();
    let template = match args.pop_front() {
        None => String::new(),
        Some(Value::Str(template)) => template,
        Some(Value::Error(err)) => {
            args.push_front(Value::Str(err.stack_or_message().to_string()));
            "%s".to_string()
        }
        Some(other) => {
            args.push_front(other);
            "%o".to_string()
        }
    };

    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            output.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                output.push('%');
            }
            Some(key) if key.is_ascii_alphabetic() => {
                chars.next();
                match registry.resolve(key) {
                    Some(formatter) => {
                        let value = args.pop_front().unwrap_or(Value::Null);
                        output.push_str(&formatter(&value, target, logger));
                    }
                    None => {
                        output.push('%');
                        output.push(key);
                    }
                }
            }
            _ => output.push('%'),
        }
    }

    for arg in args {
        output.push(' ');
        if arg.is_object() {
            match registry.resolve('o') {
                Some(formatter) => output.push_str(&formatter(&arg, target, logger)),
                None => output.push_str(&inspect_value(&arg, target.colors)),
            }
        } else {
            output.push_str(&arg.to_string());
        }
    }

    truncate_lines(&output, target.max_length)
}

/// Cut every line longer than `max_length` characters and mark it with an ellipsis
pub fn truncate_lines(text: &str, max_length: usize) -> String {
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match line.char_indices().nth(max_length) {
                Some((cut, _)) => format!("{}{}", &line[..cut], ELLIPSIS),
                None => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indent continuation lines so they start under the message column
pub fn indent_continuation(body: &str, indent: usize) -> String {
    body.replace('\n', &format!("\n{}", " ".repeat(indent)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_lines() {
        assert_eq!(truncate_lines("abcdef\nxy", 4), "abcd...\nxy");
        assert_eq!(truncate_lines("abcd", 4), "abcd");
        assert_eq!(truncate_lines("one\r\ntwo", 10), "one\ntwo");
        assert_eq!(truncate_lines("ééééé", 2), "éé...");
    }

    #[test]
    fn test_indent_continuation() {
        assert_eq!(indent_continuation("a\nb\nc", 2), "a\n  b\n  c");
        assert_eq!(indent_continuation("single", 8), "single");
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let registry = FormatterRegistry::new();
        assert!(registry.register('1', |_, _, _| String::new()).is_err());
        assert!(registry.register('%', |_, _, _| String::new()).is_err());
        assert!(FormatterRegistry::register_shared('é', |_, _, _| String::new()).is_err());
    }

    #[test]
    fn test_local_shadows_shared() {
        let registry = FormatterRegistry::new();
        let other = FormatterRegistry::new();
        assert!(registry.resolve('s').is_some());
        assert!(registry.resolve('q').is_none());

        registry.register('q', |_, _, _| "local".to_string()).unwrap();
        assert!(registry.resolve('q').is_some());
        assert!(other.resolve('q').is_none());

        assert!(registry.unregister('q'));
        assert!(registry.resolve('q').is_none());
    }
}
