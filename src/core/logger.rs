//! Named logger instances and per-call dispatch

use super::factory::{Factory, FactoryInner};
use super::formatter::format_message;
use super::log_type::{Level, LogType, SILENT};
use super::meta::Meta;
use super::record::Record;
use super::value::{ErrorKind, Value};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

/// A named source of messages.
///
/// Names form a colon-separated hierarchy (`"app:db"`) that the level tree
/// uses for overrides. Obtain loggers from a [`Factory`], which keeps each
/// instance for its own lifetime. Once the factory is dropped, logging
/// through a remaining handle does nothing.
#[derive(Debug)]
pub struct Logger {
    name: String,
    meta: Meta,
    factory: Weak<FactoryInner>,
}

impl Logger {
    pub(crate) fn new(name: String, meta: Meta, factory: Weak<FactoryInner>) -> Self {
        Self {
            name,
            meta,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// The owning factory, if it is still alive
    pub fn factory(&self) -> Option<Factory> {
        self.factory.upgrade().map(Factory::from_inner)
    }

    /// Child logger named `"{name}:{namespace}"`, inheriting this logger's meta.
    ///
    /// An existing child keeps the meta it was created with.
    pub fn extend(&self, namespace: &str) -> Arc<Logger> {
        let name = format!("{}:{}", self.name, namespace);
        match self.factory() {
            Some(factory) => factory.create_logger_with_meta(name, self.meta.clone()),
            None => Arc::new(Logger::new(name, self.meta.clone(), Weak::new())),
        }
    }

    /// Effective level in the factory's level tree
    pub fn level(&self) -> Level {
        self.factory()
            .map_or(SILENT, |factory| factory.level(&self.name))
    }

    pub fn set_level(&self, level: Level) {
        if let Some(factory) = self.factory() {
            factory.set_level(&self.name, level);
        }
    }

    /// Whether any registered target would show a message of this type
    pub fn is_enabled(&self, kind: LogType) -> bool {
        self.factory
            .upgrade()
            .is_some_and(|inner| self.enabled_in(&inner, kind))
    }

    fn enabled_in(&self, inner: &FactoryInner, kind: LogType) -> bool {
        let targets = inner.targets.lock();
        let levels = inner.levels.read();
        targets
            .iter()
            .any(|(_, target)| target.config.level_of(&self.name, &levels) >= kind.rank())
    }

    pub fn log<I>(&self, kind: LogType, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.dispatch(kind, args.into_iter().map(Into::into).collect());
    }

    #[inline]
    pub fn success<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(LogType::Success, args);
    }

    #[inline]
    pub fn error<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(LogType::Error, args);
    }

    #[inline]
    pub fn info<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(LogType::Info, args);
    }

    #[inline]
    pub fn warn<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(LogType::Warn, args);
    }

    #[inline]
    pub fn debug<I>(&self, args: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.log(LogType::Debug, args);
    }

    fn dispatch(&self, kind: LogType, args: Vec<Value>) {
        let Some(inner) = self.factory.upgrade() else {
            return;
        };
        if !self.enabled_in(&inner, kind) {
            inner.metrics.record_filtered();
            return;
        }

        // A lone error with a cause logs the cause; an aggregate logs each member
        if let [Value::Error(err)] = args.as_slice() {
            match err.kind() {
                ErrorKind::Caused(cause) => {
                    self.dispatch(kind, vec![Value::Error((**cause).clone())]);
                    return;
                }
                ErrorKind::Aggregate(errors) => {
                    for error in errors {
                        self.dispatch(kind, vec![Value::Error(error.clone())]);
                    }
                    return;
                }
                ErrorKind::Plain => {}
            }
        }

        let mut targets = inner.targets.lock();
        let thresholds: Vec<Level> = {
            let levels = inner.levels.read();
            targets
                .iter()
                .map(|(_, target)| target.config.level_of(&self.name, &levels))
                .collect()
        };
        if thresholds.iter().all(|threshold| *threshold < kind.rank()) {
            inner.metrics.record_filtered();
            return;
        }

        let id = inner.next_sequence();
        let timestamp = inner.clock.now_millis();

        for (index, ((_, target), threshold)) in targets.iter_mut().zip(thresholds).enumerate() {
            if threshold < kind.rank() {
                continue;
            }

            let result = catch_unwind(AssertUnwindSafe(|| {
                let content = format_message(args.clone(), &target.config, self, &inner.formatters);
                let record = Record::new(id, timestamp, self.name.clone(), kind)
                    .with_content(content)
                    .with_meta(self.meta.clone());
                target.deliver(&record)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Target #{} ({}) failed: {}",
                        index,
                        target.sink_name(),
                        e
                    );
                    inner.metrics.record_sink_failure();
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Target #{} ({}) panicked: {}. \
                         Other targets continue to function.",
                        index,
                        target.sink_name(),
                        panic_message(panic_info.as_ref())
                    );
                    inner.metrics.record_sink_failure();
                }
            }
        }

        inner.metrics.record_emitted();
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
