//! Processor contract and registry.
//!
//! A processor is an independently registrable unit of contact mutation:
//! a name, an urgency class, declared dependencies, a gating predicate
//! and a mutation. The registry holds processors by name and produces a
//! dependency-respecting linear order for the orchestrator.

use std::collections::HashMap;

use tracing::debug;

use crate::contact::Contact;
use crate::error::{CuratorError, Result};
use crate::queue::RunType;

/// A transformation step over a contact record.
///
/// Implementations must be deterministic given the contact state: the
/// orchestrator calls `gate` and, when it returns true, `mutate`, in
/// dependency order, sharing one mutable record across the whole pass.
pub trait Processor {
    /// Unique processor name. Registering another processor under the
    /// same name replaces this one.
    fn name(&self) -> &str;

    /// The urgency class this processor runs at.
    fn run_type(&self) -> RunType;

    /// Names of processors that must run before this one. A named
    /// dependency that is not registered is skipped, not an error.
    fn dependencies(&self) -> &[&str] {
        &[]
    }

    /// Whether this processor applies to the contact in its current state.
    fn gate(&self, contact: &Contact) -> bool;

    /// Apply this processor's mutation to the contact.
    fn mutate(&self, contact: &mut Contact) -> Result<()>;
}

/// A processor built from closures, for callers extending the pipeline
/// without a dedicated type.
pub struct FnProcessor {
    name: String,
    run_type: RunType,
    dependencies: Vec<&'static str>,
    gate: Box<dyn Fn(&Contact) -> bool + Send + Sync>,
    mutate: Box<dyn Fn(&mut Contact) -> Result<()> + Send + Sync>,
}

impl FnProcessor {
    /// Create a closure-backed processor with no dependencies.
    pub fn new(
        name: impl Into<String>,
        run_type: RunType,
        gate: impl Fn(&Contact) -> bool + Send + Sync + 'static,
        mutate: impl Fn(&mut Contact) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            run_type,
            dependencies: Vec::new(),
            gate: Box::new(gate),
            mutate: Box::new(mutate),
        }
    }

    /// Declare dependencies on other processors by name.
    pub fn with_dependencies(mut self, dependencies: &[&'static str]) -> Self {
        self.dependencies = dependencies.to_vec();
        self
    }
}

impl Processor for FnProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn run_type(&self) -> RunType {
        self.run_type
    }

    fn dependencies(&self) -> &[&str] {
        &self.dependencies
    }

    fn gate(&self, contact: &Contact) -> bool {
        (self.gate)(contact)
    }

    fn mutate(&self, contact: &mut Contact) -> Result<()> {
        (self.mutate)(contact)
    }
}

/// Visiting state during order resolution.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Holds named processors and resolves their execution order.
///
/// Registries are plain caller-owned values; there is no process-wide
/// instance. All access must be serialized by the caller.
#[derive(Default)]
pub struct ProcessorRegistry {
    processors: Vec<Box<dyn Processor>>,
}

impl ProcessorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor by name.
    ///
    /// Re-registering an existing name replaces the whole descriptor in
    /// its original registration slot: last write wins, dependency
    /// lists are never merged.
    pub fn register(&mut self, processor: impl Processor + 'static) {
        let name = processor.name().to_string();
        match self.processors.iter_mut().find(|p| p.name() == name) {
            Some(slot) => {
                *slot = Box::new(processor);
                debug!("replaced processor: {name}");
            }
            None => {
                self.processors.push(Box::new(processor));
                debug!("registered processor: {name}");
            }
        }
    }

    /// Get a processor by name.
    pub fn get(&self, name: &str) -> Option<&dyn Processor> {
        self.processors
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Whether a processor with this name is registered.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a processor by name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.processors.len();
        self.processors.retain(|p| p.name() != name);
        before != self.processors.len()
    }

    /// Remove all processors.
    pub fn clear(&mut self) {
        self.processors.clear();
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Produce a dependency-respecting linear order.
    ///
    /// Depth-first, dependency-first traversal over processors in
    /// registration order: each processor's registered dependencies are
    /// emitted before the processor itself, and a visited set prevents
    /// duplicates. Unregistered dependency names are skipped. The result
    /// is deterministic given the registration order; it is not a Kahn
    /// topological sort. A cyclic dependency graph is detected via the
    /// visiting state and reported as a configuration error.
    pub fn resolve_order(&self) -> Result<Vec<&dyn Processor>> {
        let mut states: HashMap<&str, Visit> = HashMap::new();
        let mut order: Vec<&dyn Processor> = Vec::new();

        for processor in &self.processors {
            self.visit(processor.as_ref(), &mut states, &mut order)?;
        }

        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        processor: &'a dyn Processor,
        states: &mut HashMap<&'a str, Visit>,
        order: &mut Vec<&'a dyn Processor>,
    ) -> Result<()> {
        match states.get(processor.name()) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => {
                return Err(CuratorError::DependencyCycle(processor.name().to_string()));
            }
            None => {}
        }

        states.insert(processor.name(), Visit::InProgress);

        for dependency in processor.dependencies() {
            if let Some(dep) = self.get(dependency) {
                self.visit(dep, states, order)?;
            }
        }

        states.insert(processor.name(), Visit::Done);
        order.push(processor);
        Ok(())
    }
}
