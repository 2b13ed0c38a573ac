// ============================================================================
// reactive-list - Reactive Context
// Thread-local state for tracking the currently running computation
// ============================================================================
//
// The notion of an "active" computation is ambient state. It lives entirely
// in this module: callers register reads through the tracking layer without
// ever naming the computation that happens to be running.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Weak;

use super::types::AnyReaction;

// =============================================================================
// REACTIVE CONTEXT
// =============================================================================

/// Thread-local reactive context holding the global state for reactivity.
pub struct ReactiveContext {
    /// Currently executing reaction, if any
    active_reaction: RefCell<Option<Weak<dyn AnyReaction>>>,

    /// Whether reads are currently exempt from dependency registration
    untracking: Cell<bool>,

    /// Reactions marked dirty and waiting to run
    pending_reactions: RefCell<Vec<Weak<dyn AnyReaction>>>,

    /// Whether the pending queue is currently being drained
    flushing: Cell<bool>,
}

impl ReactiveContext {
    /// Create a new reactive context with default values
    pub fn new() -> Self {
        Self {
            active_reaction: RefCell::new(None),
            untracking: Cell::new(false),
            pending_reactions: RefCell::new(Vec::new()),
            flushing: Cell::new(false),
        }
    }

    // =========================================================================
    // REACTION TRACKING
    // =========================================================================

    /// Set the active reaction, returning the previous one
    pub fn set_active_reaction(
        &self,
        reaction: Option<Weak<dyn AnyReaction>>,
    ) -> Option<Weak<dyn AnyReaction>> {
        self.active_reaction.replace(reaction)
    }

    /// Get the active reaction
    pub fn get_active_reaction(&self) -> Option<Weak<dyn AnyReaction>> {
        self.active_reaction.borrow().clone()
    }

    /// Check if there's an active reaction
    pub fn has_active_reaction(&self) -> bool {
        self.active_reaction.borrow().is_some()
    }

    /// Set untracking mode, returning the previous value
    pub fn set_untracking(&self, value: bool) -> bool {
        self.untracking.replace(value)
    }

    /// Check if currently untracking
    pub fn is_untracking(&self) -> bool {
        self.untracking.get()
    }

    // =========================================================================
    // PENDING QUEUE
    // =========================================================================

    /// Queue a dirty reaction for execution
    pub fn add_pending_reaction(&self, reaction: Weak<dyn AnyReaction>) {
        self.pending_reactions.borrow_mut().push(reaction);
    }

    /// Take all pending reactions, leaving the queue empty
    pub fn take_pending_reactions(&self) -> Vec<Weak<dyn AnyReaction>> {
        self.pending_reactions.replace(Vec::new())
    }

    /// Set the flushing flag, returning the previous value
    pub fn set_flushing(&self, value: bool) -> bool {
        self.flushing.replace(value)
    }

    /// Check if the pending queue is currently being drained
    pub fn is_flushing(&self) -> bool {
        self.flushing.get()
    }
}

impl Default for ReactiveContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// THREAD-LOCAL ACCESS
// =============================================================================

thread_local! {
    /// The thread-local reactive context
    static CONTEXT: ReactiveContext = ReactiveContext::new();
}

/// Access the thread-local reactive context.
pub fn with_context<R>(f: impl FnOnce(&ReactiveContext) -> R) -> R {
    CONTEXT.with(f)
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Check if currently tracking dependencies (inside a computation and not
/// untracking)
pub fn is_tracking() -> bool {
    with_context(|ctx| ctx.has_active_reaction() && !ctx.is_untracking())
}

/// Check if currently untracking
pub fn is_untracking() -> bool {
    with_context(|ctx| ctx.is_untracking())
}

// =============================================================================
// TESTS
// =============================================================================
