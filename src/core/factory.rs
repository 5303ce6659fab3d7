//! Logger factory: targets, formatters, levels and the instance cache

use super::clock::{Clock, SystemClock};
use super::error::Result;
use super::formatter::{Formatter, FormatterRegistry};
use super::level_tree::LevelTree;
use super::log_type::Level;
use super::logger::Logger;
use super::meta::Meta;
use super::metrics::LoggerMetrics;
use super::target::{Target, TargetConfig};
use super::value::Value;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

/// Message ids are unique across every factory in the process
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

static GLOBAL: OnceLock<Factory> = OnceLock::new();

pub type TargetId = u64;

pub(crate) struct FactoryInner {
    pub(crate) targets: Mutex<Vec<(TargetId, Target)>>,
    next_target: AtomicU64,
    pub(crate) formatters: FormatterRegistry,
    pub(crate) levels: RwLock<LevelTree>,
    pub(crate) clock: Arc<dyn Clock>,
    instances: Mutex<HashMap<String, Arc<Logger>>>,
    pub(crate) metrics: LoggerMetrics,
}

impl FactoryInner {
    pub(crate) fn next_sequence(&self) -> u64 {
        SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Owns everything loggers share. Cloning yields another handle to the same
/// factory.
///
/// Targets are delivered to while the target list is locked, so sinks and
/// formatters must not log through the same factory.
///
/// # Example
///
/// ```
/// use reggol::{Factory, MemoryTarget, Target, DEBUG};
///
/// let factory = Factory::new();
/// let memory = MemoryTarget::new();
/// factory.add_target(Target::printer(memory.clone()));
///
/// let logger = factory.create_logger("app");
/// logger.set_level(DEBUG);
/// logger.debug(["ready"]);
/// assert_eq!(memory.lines(), ["[D] app ready"]);
/// ```
#[derive(Clone, Debug)]
pub struct Factory {
    pub(crate) inner: Arc<FactoryInner>,
}

impl Factory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Arc::new(SystemClock), LevelTree::default())
    }

    fn with_parts(clock: Arc<dyn Clock>, levels: LevelTree) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                targets: Mutex::new(Vec::new()),
                next_target: AtomicU64::new(0),
                formatters: FormatterRegistry::new(),
                levels: RwLock::new(levels),
                clock,
                instances: Mutex::new(HashMap::new()),
                metrics: LoggerMetrics::new(),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<FactoryInner>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::new()
    }

    /// Process-wide factory, created on first use with a console target
    pub fn global() -> &'static Factory {
        GLOBAL.get_or_init(|| {
            let factory = Factory::new();
            #[cfg(feature = "console")]
            factory.add_target(crate::targets::ConsoleTarget::target());
            factory
        })
    }

    /// Get the logger called `name`, creating it on first request.
    ///
    /// The factory keeps every logger it creates, so the same instance is
    /// returned for its whole lifetime.
    pub fn create_logger(&self, name: impl Into<String>) -> Arc<Logger> {
        self.create_logger_with_meta(name, Meta::new())
    }

    /// Like [`Factory::create_logger`]; `meta` only applies when the logger
    /// does not exist yet.
    pub fn create_logger_with_meta(&self, name: impl Into<String>, meta: Meta) -> Arc<Logger> {
        let name = name.into();
        let mut instances = self.inner.instances.lock();
        let logger = instances.entry(name).or_insert_with_key(|name| {
            Arc::new(Logger::new(name.clone(), meta, Arc::downgrade(&self.inner)))
        });
        Arc::clone(logger)
    }

    pub fn add_target(&self, target: Target) -> TargetHandle {
        let id = self.inner.next_target.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.targets.lock().push((id, target));
        TargetHandle {
            id,
            factory: Arc::downgrade(&self.inner),
        }
    }

    pub fn remove_target(&self, id: TargetId) -> bool {
        remove_target(&self.inner, id)
    }

    /// Change a registered target's configuration in place
    pub fn configure_target<F>(&self, id: TargetId, configure: F) -> bool
    where
        F: FnOnce(&mut TargetConfig),
    {
        configure_target(&self.inner, id, configure)
    }

    pub fn target_count(&self) -> usize {
        self.inner.targets.lock().len()
    }

    /// Register a formatter for this factory only, shadowing the shared one
    pub fn register_formatter<F>(&self, key: char, formatter: F) -> Result<()>
    where
        F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
    {
        self.inner.formatters.register(key, formatter)
    }

    pub fn unregister_formatter(&self, key: char) -> bool {
        self.inner.formatters.unregister(key)
    }

    pub fn formatter(&self, key: char) -> Option<Formatter> {
        self.inner.formatters.resolve(key)
    }

    pub fn level(&self, name: &str) -> Level {
        self.inner.levels.read().get(name)
    }

    pub fn set_level(&self, name: &str, level: Level) {
        self.inner.levels.write().set(name, level);
    }

    /// Snapshot of the level tree
    pub fn levels(&self) -> LevelTree {
        self.inner.levels.read().clone()
    }

    pub fn set_levels(&self, levels: LevelTree) {
        *self.inner.levels.write() = levels;
    }

    pub fn now_millis(&self) -> i64 {
        self.inner.clock.now_millis()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_target(inner: &FactoryInner, id: TargetId) -> bool {
    let mut targets = inner.targets.lock();
    let before = targets.len();
    targets.retain(|(target_id, _)| *target_id != id);
    targets.len() != before
}

fn configure_target<F>(inner: &FactoryInner, id: TargetId, configure: F) -> bool
where
    F: FnOnce(&mut TargetConfig),
{
    let mut targets = inner.targets.lock();
    match targets.iter_mut().find(|(target_id, _)| *target_id == id) {
        Some((_, target)) => {
            configure(&mut target.config);
            true
        }
        None => false,
    }
}

/// Returned by [`Factory::add_target`]; removes or reconfigures that target
#[derive(Debug, Clone)]
pub struct TargetHandle {
    id: TargetId,
    factory: Weak<FactoryInner>,
}

impl TargetHandle {
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Deregister the target. Returns `false` if it was already removed.
    pub fn remove(&self) -> bool {
        self.factory
            .upgrade()
            .is_some_and(|inner| remove_target(&inner, self.id))
    }

    pub fn configure<F>(&self, configure: F) -> bool
    where
        F: FnOnce(&mut TargetConfig),
    {
        self.factory
            .upgrade()
            .is_some_and(|inner| configure_target(&inner, self.id, configure))
    }
}

impl std::fmt::Debug for FactoryInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("targets", &self.targets.try_lock().map(|targets| targets.len()))
            .field("levels", &*self.levels.read())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing a Factory with a fluent API
///
/// # Example
/// ```
/// use reggol::prelude::*;
/// use std::sync::Arc;
///
/// let clock = Arc::new(ManualClock::new(0));
/// let factory = Factory::builder()
///     .clock(clock)
///     .base_level(DEBUG)
///     .target(Target::printer(MemoryTarget::new()).with_show_diff(true))
///     .formatter('u', |value, _, _| value.to_string().to_uppercase())
///     .build()
///     .unwrap();
///
/// assert_eq!(factory.level("anything"), DEBUG);
/// assert_eq!(factory.target_count(), 1);
/// ```
pub struct FactoryBuilder {
    clock: Arc<dyn Clock>,
    levels: LevelTree,
    targets: Vec<Target>,
    formatters: Vec<(char, Formatter)>,
}

impl FactoryBuilder {
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            levels: LevelTree::default(),
            targets: Vec::new(),
            formatters: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the default level of every logger without an override
    #[must_use = "builder methods return a new value"]
    pub fn base_level(mut self, level: Level) -> Self {
        self.levels.set_base(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LevelTree) -> Self {
        self.levels = levels;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F>(mut self, key: char, formatter: F) -> Self
    where
        F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
    {
        let formatter: Formatter = Arc::new(formatter);
        self.formatters.push((key, formatter));
        self
    }

    /// Build the Factory, rejecting formatter keys that are not ASCII letters
    /// and invalid target configurations
    pub fn build(self) -> Result<Factory> {
        for target in &self.targets {
            target.config.validate()?;
        }
        let factory = Factory::with_parts(self.clock, self.levels);
        for (key, formatter) in self.formatters {
            factory.inner.formatters.insert(key, formatter)?;
        }
        for target in self.targets {
            factory.add_target(target);
        }
        Ok(factory)
    }
}

impl Default for FactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Get a logger from the global factory
pub fn create_logger(name: impl Into<String>) -> Arc<Logger> {
    Factory::global().create_logger(name)
}

/// Add a target to the global factory
pub fn register_target(target: Target) -> TargetHandle {
    Factory::global().add_target(target)
}

/// Register a formatter in the shared table, visible to every factory
pub fn register_formatter<F>(key: char, formatter: F) -> Result<()>
where
    F: Fn(&Value, &TargetConfig, &Logger) -> String + Send + Sync + 'static,
{
    FormatterRegistry::register_shared(key, formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_type::{DEBUG, INFO, SILENT};
    use crate::targets::MemoryTarget;

    #[test]
    fn test_singleton_per_name() {
        let factory = Factory::new();
        let first = factory.create_logger("app");
        let second = factory.create_logger("app");
        assert!(Arc::ptr_eq(&first, &second));

        let other = Factory::new().create_logger("app");
        assert!(!Arc::ptr_eq(&first, &other));
    }

    #[test]
    fn test_meta_kept_for_existing_logger() {
        let factory = Factory::new();
        let first = factory.create_logger_with_meta("app", Meta::new().with_field("v", 1));
        let again = factory.create_logger_with_meta("app", Meta::new().with_field("v", 2));
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(again.meta().get("v"), Some(&crate::FieldValue::Int(1)));
    }

    #[test]
    fn test_instance_outlives_caller_handles() {
        let factory = Factory::new();
        let first = factory.create_logger_with_meta("api", Meta::new().with_field("region", "eu"));
        let address = Arc::as_ptr(&first);
        drop(first);

        let again = factory.create_logger("api");
        assert_eq!(Arc::as_ptr(&again), address);
        assert_eq!(again.meta().get("region"), Some(&crate::FieldValue::String("eu".into())));
    }

    #[test]
    fn test_target_handle_removes_its_own_target() {
        let factory = Factory::new();
        let first = factory.add_target(Target::printer(MemoryTarget::new()));
        let second = factory.add_target(Target::printer(MemoryTarget::new()));
        assert_eq!(factory.target_count(), 2);

        assert!(first.remove());
        assert!(!first.remove());
        assert_eq!(factory.target_count(), 1);
        assert!(second.configure(|config| config.show_diff = true));
        assert!(!first.configure(|config| config.show_diff = true));
    }

    #[test]
    fn test_levels() {
        let factory = Factory::new();
        assert_eq!(factory.level("app"), INFO);
        factory.set_level("app:db", DEBUG);
        assert_eq!(factory.level("app:db"), DEBUG);
        assert_eq!(factory.levels().get("app:db"), DEBUG);

        factory.set_levels(LevelTree::new(SILENT));
        assert_eq!(factory.level("app:db"), SILENT);
    }

    #[test]
    fn test_builder_rejects_bad_formatter_key() {
        let result = Factory::builder()
            .formatter('#', |_, _, _| String::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_invalid_target() {
        let result = Factory::builder()
            .target(Target::printer(MemoryTarget::new()).with_max_length(0))
            .build();
        assert!(matches!(
            result,
            Err(crate::LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_sequence_is_monotonic() {
        let factory = Factory::new();
        let a = factory.inner.next_sequence();
        let b = factory.inner.next_sequence();
        assert!(b > a);
    }
}
