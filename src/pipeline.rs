//! The curator orchestrator.
//!
//! Drives one contact at a time through the registry's dependency-sorted
//! processors: each processor's gate is evaluated against the current
//! record state, and its mutation, when gated in, is visible to every
//! later processor in the same pass. Execution is strictly sequential;
//! one contact completes its pass before the next queued contact begins.

use serde::Serialize;
use tracing::{debug, warn};

use crate::contact::Contact;
use crate::error::{CuratorError, Result};
use crate::queue::CuratorQueue;
use crate::registry::ProcessorRegistry;

/// What to do with the rest of a contact's pass when a processor fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the failing contact's pass and surface the error. Other
    /// queued contacts are unaffected.
    #[default]
    Halt,

    /// Keep running the remaining processors and report all failures in
    /// the run report.
    Continue,
}

/// A processor failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorFailure {
    /// Name of the failing processor.
    pub processor: String,

    /// Why the mutation failed.
    pub message: String,
}

/// Outcome of one contact's pass through the pipeline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// The contact that was processed.
    pub contact: String,

    /// Processors whose gate admitted the contact and whose mutation ran.
    pub executed: Vec<String>,

    /// Processors whose gate declined the contact.
    pub skipped: Vec<String>,

    /// Mutation failures (only populated under `FailurePolicy::Continue`).
    pub failures: Vec<ProcessorFailure>,
}

/// Orchestrates pipeline passes over contacts.
///
/// A curator is a plain caller-owned value; the registry and queue it
/// works with are passed in by reference, never held.
#[derive(Debug, Default)]
pub struct Curator {
    failure_policy: FailurePolicy,
}

impl Curator {
    /// Create a curator with the given failure policy.
    pub fn new(failure_policy: FailurePolicy) -> Self {
        Self { failure_policy }
    }

    /// Run one full pass over a contact.
    ///
    /// The registry's resolved order is obtained once per pass; a cyclic
    /// dependency graph fails here, before any processor runs. Under
    /// `FailurePolicy::Halt` the first mutation failure is returned as an
    /// error naming the contact and processor; under
    /// `FailurePolicy::Continue` failures are collected in the report.
    pub fn run(&self, registry: &ProcessorRegistry, contact: &mut Contact) -> Result<RunReport> {
        let order = registry.resolve_order()?;
        debug!(
            "starting pass for '{}' with {} processors",
            contact.path,
            order.len()
        );

        let mut report = RunReport {
            contact: contact.path.clone(),
            ..Default::default()
        };

        for processor in order {
            let name = processor.name().to_string();

            if !processor.gate(contact) {
                report.skipped.push(name);
                continue;
            }

            match processor.mutate(contact) {
                Ok(()) => report.executed.push(name),
                Err(err) => {
                    warn!("processor '{name}' failed for '{}': {err}", contact.path);
                    match self.failure_policy {
                        FailurePolicy::Halt => {
                            return Err(CuratorError::Processor {
                                contact: contact.path.clone(),
                                processor: name,
                                message: err.to_string(),
                            });
                        }
                        FailurePolicy::Continue => {
                            report.failures.push(ProcessorFailure {
                                processor: name,
                                message: err.to_string(),
                            });
                        }
                    }
                }
            }
        }

        debug!(
            "pass complete for '{}': {} executed, {} skipped, {} failed",
            contact.path,
            report.executed.len(),
            report.skipped.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Drain the queue, running a full pass per dequeued contact.
    ///
    /// `load` resolves a contact reference to its record; `save` receives
    /// the record back after its pass, mutated or not. A failing contact
    /// never affects later queued contacts. The queue's processing status
    /// is set around each pass for observability.
    pub fn drain<L, S>(
        &self,
        registry: &ProcessorRegistry,
        queue: &mut CuratorQueue,
        mut load: L,
        mut save: S,
    ) -> Vec<(String, Result<RunReport>)>
    where
        L: FnMut(&str) -> Option<Contact>,
        S: FnMut(Contact),
    {
        let mut results = Vec::new();

        while let Some(item) = queue.dequeue() {
            queue.set_processing(true, Some(item.contact.clone()));

            match load(&item.contact) {
                Some(mut contact) => {
                    let outcome = self.run(registry, &mut contact);
                    save(contact);
                    results.push((item.contact, outcome));
                }
                None => {
                    warn!("queued contact could not be loaded: {}", item.contact);
                    results.push((
                        item.contact.clone(),
                        Err(CuratorError::ContactUnavailable(item.contact)),
                    ));
                }
            }
        }

        queue.set_processing(false, None);
        results
    }
}
