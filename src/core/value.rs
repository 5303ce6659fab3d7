//! Positional arguments passed to the severity methods

use std::fmt;

/// One positional argument of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Structured data (objects and arrays), rendered through the `o` formatter
    Object(serde_json::Value),
    Error(LoggedError),
}

impl Value {
    /// Anything that is not rendered inline as plain text
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Error(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion used by the `d` formatter. Non-numeric input yields NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Object(_) | Value::Error(_) => f64::NAN,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Object(v) => v.clone(),
            Value::Error(err) => serde_json::json!({ "message": err.message() }),
        }
    }
}

/// Plain-text rendering, as used by `%s` and trailing primitive arguments
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => f.write_str(&format_number(*n)),
            Value::Str(s) => f.write_str(s),
            Value::Object(v) => f.write_str(&super::inspect::inspect_json(v, false)),
            Value::Error(err) => f.write_str(err.stack_or_message()),
        }
    }
}

/// Shortest decimal form; integral values print without a fraction
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == n.trunc() && n.abs() < 1e21 {
        format!("{:.0}", n + 0.0)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(i: $ty) -> Self {
                Value::Int(i64::from(i))
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .unwrap_or_else(|| Value::Float(n.as_f64().unwrap_or(f64::NAN))),
            serde_json::Value::String(s) => Value::Str(s),
            other => Value::Object(other),
        }
    }
}

impl From<LoggedError> for Value {
    fn from(err: LoggedError) -> Self {
        Value::Error(err)
    }
}

/// How an error relates to other errors
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Plain,
    /// Wraps a single underlying cause, which is logged in its place
    Caused(Box<LoggedError>),
    /// Groups several errors, each logged on its own
    Aggregate(Vec<LoggedError>),
}

/// An error value handed to a severity method
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedError {
    message: String,
    stack: Option<String>,
    kind: ErrorKind,
}

impl LoggedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            kind: ErrorKind::Plain,
        }
    }

    pub fn aggregate(message: impl Into<String>, errors: Vec<LoggedError>) -> Self {
        Self {
            message: message.into(),
            stack: None,
            kind: ErrorKind::Aggregate(errors),
        }
    }

    /// Capture `err` and its `source()` chain
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let mut logged = Self::new(err.to_string());
        if let Some(source) = err.source() {
            logged.kind = ErrorKind::Caused(Box::new(Self::from_error(source)));
        }
        logged
    }

    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: LoggedError) -> Self {
        self.kind = ErrorKind::Caused(Box::new(cause));
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn stack_or_message(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

impl fmt::Display for LoggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
