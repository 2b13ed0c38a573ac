// ============================================================================
// reactive-list - Dependency Tracking
// Registering reads and propagating invalidation
// ============================================================================
//
// The key constraint in Rust is borrow scoping: reaction lists are held in
// RefCells, and the callbacks we invoke may re-enter them. Every traversal
// here collects into a temporary Vec before mutating or calling out
// ("collect-then-mutate").
// ============================================================================

use std::rc::Rc;

use crate::core::constants::*;
use crate::core::context::with_context;
use crate::core::types::{AnyReaction, AnySource};

// =============================================================================
// TRACK READ - Register a dependency when reading a source
// =============================================================================

/// Track a read of a source, registering the active computation against it.
///
/// Outside a computation (or inside [`untrack`]) this is a no-op, so plain
/// reads cost one thread-local check and nothing else.
pub fn track_read(source: Rc<dyn AnySource>) {
    with_context(|ctx| {
        if !ctx.has_active_reaction() || ctx.is_untracking() {
            return;
        }

        let reaction = match ctx.get_active_reaction().and_then(|w| w.upgrade()) {
            Some(r) => r,
            None => return,
        };

        // A computation may read the same source many times per run;
        // register it once.
        if reaction_has_dep(&reaction, &source) {
            return;
        }

        reaction.add_dep(source.clone());
        source.add_reaction(Rc::downgrade(&reaction));
    });
}

/// Check whether a reaction already recorded a source, by pointer identity.
fn reaction_has_dep(reaction: &Rc<dyn AnyReaction>, source: &Rc<dyn AnySource>) -> bool {
    let source_ptr = Rc::as_ptr(source) as *const ();
    let mut found = false;
    reaction.for_each_dep(&mut |dep| {
        if Rc::as_ptr(dep) as *const () == source_ptr {
            found = true;
            return false;
        }
        true
    });
    found
}

// =============================================================================
// NOTIFY CHANGED - Called when a source's underlying data has changed
// =============================================================================

/// Notify the reactive system that a source's underlying data changed.
///
/// Marks every registered computation dirty and re-runs them synchronously
/// before returning (unless a flush is already in progress higher up the
/// stack, in which case that flush picks them up).
pub fn notify_changed(source: Rc<dyn AnySource>) {
    // Prevent O(n) growth of the reaction list across many invalidations
    source.cleanup_dead_reactions();

    let mut to_schedule: Vec<Rc<dyn AnyReaction>> = Vec::new();

    source.for_each_reaction(&mut |reaction| {
        let flags = reaction.flags();

        if (flags & DESTROYED) != 0 {
            return true;
        }

        // Skip reactions that are already dirty; they're queued or about
        // to be picked up by the running flush
        if (flags & DIRTY) == 0 {
            reaction.mark_dirty();
            if (flags & EFFECT) != 0 {
                to_schedule.push(reaction);
            }
        }

        true
    });

    for reaction in to_schedule {
        schedule_reaction(reaction);
    }
}

/// Queue a dirty reaction and trigger a flush if none is running.
pub(crate) fn schedule_reaction(reaction: Rc<dyn AnyReaction>) {
    with_context(|ctx| {
        ctx.add_pending_reaction(Rc::downgrade(&reaction));
    });

    let should_flush = with_context(|ctx| !ctx.is_flushing());
    if should_flush {
        flush_pending();
    }
}

/// Drain the pending queue, re-running each dirty reaction.
fn flush_pending() {
    let was_flushing = with_context(|ctx| ctx.set_flushing(true));

    const MAX_ITERATIONS: u32 = 1000;
    let mut iterations = 0;

    loop {
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            with_context(|ctx| ctx.set_flushing(was_flushing));
            panic!(
                "Maximum update depth exceeded. This can happen when a computation \
                 continuously invalidates a source it also reads."
            );
        }

        let pending = with_context(|ctx| ctx.take_pending_reactions());
        if pending.is_empty() {
            break;
        }

        for reaction_weak in pending {
            if let Some(reaction) = reaction_weak.upgrade() {
                let flags = reaction.flags();

                if (flags & DESTROYED) != 0 {
                    continue;
                }

                // Only run if still dirty; a reaction can be queued and then
                // cleaned by an earlier run in the same drain
                if (flags & DIRTY) == 0 {
                    continue;
                }

                reaction.update();
            }
        }
    }

    with_context(|ctx| ctx.set_flushing(was_flushing));
}

// =============================================================================
// REMOVE REACTIONS - Detach a reaction from everything it read
// =============================================================================

/// Remove a reaction from all of its dependencies and forget them.
///
/// Called before each re-run (the run rebuilds the list from what it
/// actually reads) and on disposal.
pub fn remove_reactions(reaction: &Rc<dyn AnyReaction>) {
    let deps: Vec<Rc<dyn AnySource>> = {
        let mut collected = Vec::new();
        reaction.for_each_dep(&mut |dep| {
            collected.push(dep.clone());
            true
        });
        collected
    };
    // Borrow on the reaction's dep list is released

    for dep in deps {
        dep.remove_reaction(reaction);
    }

    reaction.clear_deps();
}

// =============================================================================
// UNTRACK - Read without registering
// =============================================================================

/// Run a closure with dependency registration suspended.
///
/// Reads performed inside the closure are not recorded against the active
/// computation, so later invalidations of those sources won't re-run it.
pub fn untrack<R>(f: impl FnOnce() -> R) -> R {
    let prev = with_context(|ctx| ctx.set_untracking(true));

    // Restore on the way out even if the closure panics
    struct UntrackGuard(bool);

    impl Drop for UntrackGuard {
        fn drop(&mut self) {
            with_context(|ctx| ctx.set_untracking(self.0));
        }
    }

    let _guard = UntrackGuard(prev);
    f()
}

// =============================================================================
// TESTS
// =============================================================================
