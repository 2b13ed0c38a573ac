// ============================================================================
// reactive-list - Dependency
// Per-instance handle to the pull-based tracking engine
// ============================================================================

use std::rc::Rc;

use crate::core::types::{AnySource, DepNode};
use crate::reactivity::tracking::{notify_changed, track_read};

// =============================================================================
// DEPENDENCY
// =============================================================================

/// A registration point for tracked computations.
///
/// A `Dependency` stands for some piece of data that lives elsewhere. Reads
/// of that data call [`track`](Dependency::track) to register the currently
/// running computation; writes call [`invalidate`](Dependency::invalidate)
/// to re-run everything registered. Registration re-arms on the next tracked
/// read, so a computation that stops reading the data stops depending on it.
///
/// # Example
///
/// ```
/// use reactive_list::{effect, Dependency};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let dep = Rc::new(Dependency::new());
/// let runs = Rc::new(Cell::new(0));
///
/// let dep_reader = dep.clone();
/// let runs_clone = runs.clone();
/// let _running = effect(move || {
///     dep_reader.track();
///     runs_clone.set(runs_clone.get() + 1);
/// });
///
/// assert_eq!(runs.get(), 1);
/// dep.invalidate();
/// assert_eq!(runs.get(), 2);
/// ```
pub struct Dependency {
    node: Rc<DepNode>,
}

impl Dependency {
    /// Create a dependency with no registered computations.
    pub fn new() -> Self {
        Self {
            node: Rc::new(DepNode::new()),
        }
    }

    /// Register the currently running tracked computation, if any.
    ///
    /// Outside a computation this is a no-op.
    pub fn track(&self) {
        track_read(self.node.clone() as Rc<dyn AnySource>);
    }

    /// Re-run every computation registered against this dependency.
    pub fn invalidate(&self) {
        notify_changed(self.node.clone() as Rc<dyn AnySource>);
    }

    /// Number of computations currently registered.
    pub fn dependent_count(&self) -> usize {
        self.node.cleanup_dead_reactions();
        self.node.reaction_count()
    }
}

impl Default for Dependency {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
