//! One-slot mailboxes between the main and helper contexts.
//!
//! The forward direction carries a [`Job`] from main to helper, the backward
//! direction carries a [`Completion`] token back. Both are bounded to a
//! single in-flight message and block without timeout. Receiving a message
//! also publishes every write the sender made before sending it.

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};

use tracing::trace;

use super::job::Job;

/// Barrier token sent by the helper once its job has fully executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    job: &'static str,
}

impl Completion {
    pub(crate) fn new(job: &'static str) -> Self {
        Self { job }
    }

    /// Name of the job this token acknowledges.
    pub fn job(&self) -> &'static str {
        self.job
    }
}

/// The peer endpoint has gone away (its thread exited or panicked).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

/// Main-side endpoints: sends jobs, receives completions.
pub struct MainEnd<'a, const K: usize> {
    forward: SyncSender<Job<'a, K>>,
    backward: Receiver<Completion>,
}

/// Helper-side endpoints: receives jobs, sends completions.
pub struct HelperEnd<'a, const K: usize> {
    forward: Receiver<Job<'a, K>>,
    backward: SyncSender<Completion>,
}

/// Create a connected pair of endpoints.
pub fn pair<'a, const K: usize>() -> (MainEnd<'a, K>, HelperEnd<'a, K>) {
    let (job_tx, job_rx) = sync_channel(1);
    let (done_tx, done_rx) = sync_channel(1);
    (
        MainEnd {
            forward: job_tx,
            backward: done_rx,
        },
        HelperEnd {
            forward: job_rx,
            backward: done_tx,
        },
    )
}

impl<'a, const K: usize> MainEnd<'a, K> {
    /// Hand `job` to the helper. Ownership moves into the channel.
    pub fn push(&self, job: Job<'a, K>) -> Result<(), Disconnected> {
        let name = job.name();
        self.forward.send(job).map_err(|_| Disconnected)?;
        trace!(job = name, "job handed off");
        Ok(())
    }

    /// Block until the helper reports completion.
    pub fn pop(&self) -> Result<Completion, Disconnected> {
        self.backward.recv().map_err(|_| Disconnected)
    }
}

impl<'a, const K: usize> HelperEnd<'a, K> {
    /// Block until main hands over a job.
    pub fn pop(&self) -> Result<Job<'a, K>, Disconnected> {
        self.forward.recv().map_err(|_| Disconnected)
    }

    /// Signal completion to main.
    pub fn push(&self, token: Completion) -> Result<(), Disconnected> {
        self.backward.send(token).map_err(|_| Disconnected)
    }
}

impl<const K: usize> core::fmt::Debug for MainEnd<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MainEnd").finish_non_exhaustive()
    }
}

impl<const K: usize> core::fmt::Debug for HelperEnd<'_, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HelperEnd").finish_non_exhaustive()
    }
}
