// model = "claude-opus-4-5"
// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! The causal replay engine.
//!
//! A `State` owns one replica's operation log and the document built from
//! it. The document is always exactly what replaying the sorted log from an
//! empty arena produces, so two replicas holding the same operations render
//! the same value no matter what order those operations arrived in.
//!
//! # Submitting
//!
//! 1. Drop operations already in the log, and duplicates within the batch.
//! 2. Sort the rest by identity.
//! 3. If every new operation sorts after the whole log and nothing is
//!    waiting on a dependency, append and apply just the batch (fast path).
//! 4. Otherwise merge into the log and rebuild the arena from scratch by
//!    replaying everything (slow path). Incremental patching is not safe
//!    here: a late operation can create a container that earlier replays
//!    skipped writes into.
//!
//! # Causal gating
//!
//! An operation whose `dep` is not in the log yet is skipped during a pass
//! but stays in the log. The count of skipped operations is kept, and while
//! it is nonzero every submit takes the slow path, so the operation applies
//! as soon as its dependency shows up.
//!
//! # Failure
//!
//! A structural conflict rejects the whole submit. The log, clock and seen
//! set are only committed after the arena has been built successfully, so a
//! failed submit leaves the replica exactly as it was.

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::apply::apply;
use super::error::Error;
use super::op::Index;
use super::op::Operation;
use super::primitives::Id;
use super::primitives::LamportClock;
use super::store::Store;
use crate::key::Hash;

/// One replica's log and materialized document.
#[derive(Clone, Debug)]
pub struct State {
    /// Accepted operations, sorted by identity.
    log: Vec<Operation>,
    /// Greatest clock in the log.
    clock: LamportClock,
    /// Identities of every operation in the log.
    seen: FxHashSet<Id>,
    store: Store,
    /// Operations in the log skipped for a missing dependency.
    deferred: usize,
}

impl State {
    /// An empty replica.
    pub fn new() -> State {
        return State {
            log: Vec::new(),
            clock: LamportClock::new(),
            seen: FxHashSet::default(),
            store: Store::new(),
            deferred: 0,
        };
    }

    /// Rebuild a replica from a persisted log.
    ///
    /// The log is expected to be sorted already (as `list_operations`
    /// returns it) but is sorted and deduplicated again regardless.
    pub fn from_log(ops: Vec<Operation>) -> Result<State, Error> {
        let mut seen = FxHashSet::default();
        let mut log = Vec::with_capacity(ops.len());
        for op in ops {
            if op.id.is_reserved() {
                return Err(Error::ReservedIdentity { op: op.id });
            }
            if seen.insert(op.id) {
                log.push(op);
            }
        }
        log.sort_by(|a, b| a.id.cmp(&b.id));

        let mut clock = LamportClock::new();
        if let Some(last) = log.last() {
            clock.observe(last.id.clock);
        }
        let (store, deferred) = replay(&log, &seen)?;
        debug!(ops = log.len(), deferred, "loaded log");
        return Ok(State {
            log,
            clock,
            seen,
            store,
            deferred,
        });
    }

    /// Accept a batch of operations.
    ///
    /// Returns the operations that were new to this replica, sorted, for
    /// rebroadcast or persistence.
    pub fn submit<I>(&mut self, ops: I) -> Result<Vec<Operation>, Error>
    where
        I: IntoIterator<Item = Operation>,
    {
        let batch = self.normalize(ops)?;
        if batch.is_empty() {
            return Ok(batch);
        }

        if self.deferred == 0 && self.clock.dominated_by(batch[0].id.clock) {
            self.append(&batch)?;
        } else {
            self.rebuild(&batch)?;
        }
        return Ok(batch);
    }

    /// Filter out known operations, reject reserved identities, sort.
    fn normalize<I>(&self, ops: I) -> Result<Vec<Operation>, Error>
    where
        I: IntoIterator<Item = Operation>,
    {
        let mut fresh = FxHashSet::default();
        let mut batch = Vec::new();
        for op in ops {
            if op.id.is_reserved() {
                return Err(Error::ReservedIdentity { op: op.id });
            }
            if self.seen.contains(&op.id) || !fresh.insert(op.id) {
                continue;
            }
            batch.push(op);
        }
        batch.sort_by(|a, b| a.id.cmp(&b.id));
        return Ok(batch);
    }

    /// Fast path: every operation in `batch` sorts after the log.
    fn append(&mut self, batch: &[Operation]) -> Result<(), Error> {
        debug!(ops = batch.len(), "appending batch");
        for op in batch {
            self.seen.insert(op.id);
        }

        let mut deferred = 0;
        let mut failed = None;
        for op in batch {
            if !ready(op, &self.seen) {
                trace!(op = ?op.id, dep = ?op.dep, "dependency missing, deferring");
                deferred += 1;
                continue;
            }
            if let Err(err) = apply(&mut self.store, op) {
                failed = Some(err);
                break;
            }
        }

        if let Some(err) = failed {
            warn!(error = %err, "rejecting batch, restoring from log");
            for op in batch {
                self.seen.remove(&op.id);
            }
            // The log is untouched, and it replayed cleanly before.
            let (store, deferred) = replay(&self.log, &self.seen)?;
            self.store = store;
            self.deferred = deferred;
            return Err(err);
        }

        self.log.extend(batch.iter().cloned());
        if let Some(last) = batch.last() {
            self.clock.observe(last.id.clock);
        }
        self.deferred = deferred;
        return Ok(());
    }

    /// Slow path: merge `batch` into the log and replay everything.
    fn rebuild(&mut self, batch: &[Operation]) -> Result<(), Error> {
        debug!(ops = batch.len(), log = self.log.len(), deferred = self.deferred, "rebuilding");
        let mut seen = self.seen.clone();
        seen.extend(batch.iter().map(|op| op.id));
        let mut log = self.log.clone();
        log.extend(batch.iter().cloned());
        log.sort_by(|a, b| a.id.cmp(&b.id));

        let (store, deferred) = match replay(&log, &seen) {
            Ok(built) => built,
            Err(err) => {
                warn!(error = %err, "rejecting batch");
                return Err(err);
            }
        };

        if let Some(last) = log.last() {
            self.clock.observe(last.id.clock);
        }
        self.log = log;
        self.seen = seen;
        self.store = store;
        self.deferred = deferred;
        return Ok(());
    }

    /// A copy of the full log, sorted.
    pub fn list_operations(&self) -> Vec<Operation> {
        return self.log.clone();
    }

    /// The full log, sorted.
    pub fn operations(&self) -> &[Operation] {
        return &self.log;
    }

    /// Number of operations in the log.
    pub fn len(&self) -> usize {
        return self.log.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.log.is_empty();
    }

    /// Whether an operation with this identity has been accepted.
    pub fn contains(&self, id: &Id) -> bool {
        return self.seen.contains(id);
    }

    /// The clock a newly authored operation should carry.
    pub fn next_clock(&self) -> u64 {
        return self.clock.next();
    }

    /// Identity of the last operation in log order.
    pub fn latest_identity(&self) -> Option<Id> {
        return self.log.last().map(|op| op.id);
    }

    /// Operations in the log still waiting on a dependency.
    pub fn deferred(&self) -> usize {
        return self.deferred;
    }

    /// The container arena.
    pub fn store(&self) -> &Store {
        return &self.store;
    }

    /// See [`Store::resolve`].
    pub fn resolve(&self, path: &[Index]) -> Option<Id> {
        return self.store.resolve(path);
    }

    /// See [`Store::resolve_parent`].
    pub fn resolve_parent(&self, path: &[Index]) -> Result<Id, Error> {
        return self.store.resolve_parent(path);
    }

    /// The materialized document.
    pub fn render(&self) -> Value {
        return self.store.render();
    }

    /// A hash of the materialized document, for comparing replicas.
    pub fn digest(&self) -> Hash {
        return crate::key::hash(self.render().to_string().as_bytes());
    }
}

impl Default for State {
    fn default() -> Self {
        return Self::new();
    }
}

impl super::Crdt for State {
    fn merge(&mut self, other: &Self) -> Result<(), Error> {
        self.submit(other.list_operations())?;
        return Ok(());
    }
}

fn ready(op: &Operation, seen: &FxHashSet<Id>) -> bool {
    return match &op.dep {
        Some(dep) => seen.contains(dep),
        None => true,
    };
}

/// Build an arena from scratch. Returns it with the number of deferred operations.
fn replay(log: &[Operation], seen: &FxHashSet<Id>) -> Result<(Store, usize), Error> {
    let mut store = Store::new();
    let mut deferred = 0;
    for op in log {
        if !ready(op, seen) {
            trace!(op = ?op.id, dep = ?op.dep, "dependency missing, deferring");
            deferred += 1;
            continue;
        }
        apply(&mut store, op)?;
    }
    return Ok((store, deferred));
}
