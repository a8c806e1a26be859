//! Registration entrypoint
//!
//! Hosts collect their declaration units in an [`InitializerList`] and run
//! it once during startup. Each unit receives the host's context mutably,
//! typically to declare schemas and register RPC methods.
//!
//! Units run once each, higher priority first. Units with equal priority run
//! in the order they were added. The first failing unit stops the run.

use crate::observability::Logger;
use crate::schema::{SchemaError, SchemaResult};

/// Priority of units added without one
pub const DEFAULT_PRIORITY: i32 = -1;

type Unit<C> = Box<dyn FnOnce(&mut C) -> SchemaResult<()>>;

/// One declaration unit
pub struct Initializer<C> {
    name: String,
    priority: i32,
    unit: Unit<C>,
}

impl<C> Initializer<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// Ordered collection of declaration units
pub struct InitializerList<C> {
    initializers: Vec<Initializer<C>>,
}

impl<C> Default for InitializerList<C> {
    fn default() -> Self {
        Self {
            initializers: Vec::new(),
        }
    }
}

impl<C> InitializerList<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit with the default priority
    pub fn add<F>(&mut self, name: impl Into<String>, unit: F) -> &mut Self
    where
        F: FnOnce(&mut C) -> SchemaResult<()> + 'static,
    {
        self.add_with_priority(name, DEFAULT_PRIORITY, unit)
    }

    pub fn add_with_priority<F>(&mut self, name: impl Into<String>, priority: i32, unit: F) -> &mut Self
    where
        F: FnOnce(&mut C) -> SchemaResult<()> + 'static,
    {
        self.initializers.push(Initializer {
            name: name.into(),
            priority,
            unit: Box::new(unit),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.initializers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initializers.is_empty()
    }

    /// Unit names in run order
    pub fn run_order(&self) -> Vec<&str> {
        let mut ordered: Vec<&Initializer<C>> = self.initializers.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));
        ordered.into_iter().map(|i| i.name.as_str()).collect()
    }

    /// Runs every unit and returns how many ran.
    ///
    /// # Errors
    ///
    /// `MGMT_INITIALIZER_FAILED` wrapping the first unit's fault. Later
    /// units do not run.
    pub fn run(self, ctx: &mut C) -> SchemaResult<usize> {
        let mut initializers = self.initializers;
        // stable: equal priorities keep insertion order
        initializers.sort_by(|a, b| b.priority.cmp(&a.priority));

        let mut completed = 0;
        for initializer in initializers {
            let name = initializer.name;
            let priority = initializer.priority.to_string();

            if let Err(cause) = (initializer.unit)(ctx) {
                Logger::error(
                    "INITIALIZER_FAILED",
                    &[
                        ("code", cause.code().code()),
                        ("error", &cause.to_string()),
                        ("initializer", &name),
                    ],
                );
                return Err(SchemaError::initializer_failed(&name, &cause));
            }

            completed += 1;
            Logger::trace(
                "INITIALIZER_COMPLETE",
                &[("initializer", &name), ("priority", &priority)],
            );
        }

        Ok(completed)
    }
}
