// ============================================================================
// reactive-list - Effect System
// Tracked computations that re-run when sources they read are invalidated
// ============================================================================
//
// An effect runs its function once on creation, recording every source read
// during the run. When any of those sources is invalidated, the effect
// re-runs synchronously, rebuilding its dependency set from what it actually
// reads this time. An optional cleanup function runs before each re-run and
// on disposal.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::constants::*;
use crate::core::context::with_context;
use crate::core::types::{AnyReaction, AnySource};
use crate::reactivity::tracking::{remove_reactions, schedule_reaction};

// =============================================================================
// TYPE ALIASES
// =============================================================================

/// Cleanup function returned by an effect; runs before the next execution
/// and on disposal
pub type CleanupFn = Box<dyn FnOnce()>;

/// Effect function signature - returns an optional cleanup
pub type EffectFn = Box<dyn FnMut() -> Option<CleanupFn>>;

// =============================================================================
// EFFECT INNER
// =============================================================================

/// The inner effect state. Implements [`AnyReaction`]; effects are reactions
/// only, never sources.
pub struct EffectInner {
    /// Flags bitmask for state tracking
    flags: Cell<u32>,

    /// The effect function; taken on destruction
    func: RefCell<Option<EffectFn>>,

    /// Sources this effect read during its last run
    deps: RefCell<Vec<Rc<dyn AnySource>>>,

    /// Cleanup from the last run
    teardown: RefCell<Option<CleanupFn>>,

    /// Weak self-reference for trait-object conversion (set after Rc creation)
    self_weak: RefCell<Weak<EffectInner>>,
}

impl EffectInner {
    fn new(func: EffectFn) -> Rc<Self> {
        let effect = Rc::new(Self {
            flags: Cell::new(EFFECT | DIRTY),
            func: RefCell::new(Some(func)),
            deps: RefCell::new(Vec::new()),
            teardown: RefCell::new(None),
            self_weak: RefCell::new(Weak::new()),
        });

        *effect.self_weak.borrow_mut() = Rc::downgrade(&effect);

        effect
    }

    /// Get this effect as a weak reference to AnyReaction
    fn as_weak_reaction(&self) -> Weak<dyn AnyReaction> {
        match self.self_weak.borrow().upgrade() {
            Some(rc) => Rc::downgrade(&(rc as Rc<dyn AnyReaction>)),
            None => Weak::<EffectInner>::new() as Weak<dyn AnyReaction>,
        }
    }
}

impl Drop for EffectInner {
    fn drop(&mut self) {
        // Run any remaining teardown
        if let Some(cleanup) = self.teardown.borrow_mut().take() {
            cleanup();
        }
    }
}

impl AnyReaction for EffectInner {
    fn flags(&self) -> u32 {
        self.flags.get()
    }

    fn set_flags(&self, flags: u32) {
        self.flags.set(flags);
    }

    fn dep_count(&self) -> usize {
        self.deps.borrow().len()
    }

    fn add_dep(&self, source: Rc<dyn AnySource>) {
        self.deps.borrow_mut().push(source);
    }

    fn clear_deps(&self) {
        self.deps.borrow_mut().clear();
    }

    fn for_each_dep(&self, f: &mut dyn FnMut(&Rc<dyn AnySource>) -> bool) {
        for dep in self.deps.borrow().iter() {
            if !f(dep) {
                break;
            }
        }
    }

    fn update(&self) {
        if let Some(rc_self) = self.self_weak.borrow().upgrade() {
            run_effect(&rc_self);
        }
    }
}

// =============================================================================
// RUN EFFECT
// =============================================================================

/// Run an effect and rebuild its dependency set.
///
/// 1. Runs the teardown from the previous run
/// 2. Detaches the effect from everything it read last time
/// 3. Executes the function with this effect as the active computation
/// 4. Stores the new teardown, if one was returned
fn run_effect(effect: &Rc<EffectInner>) {
    let flags = effect.flags.get();

    if (flags & DESTROYED) != 0 {
        return;
    }

    // A source invalidated from inside the function lands back here through
    // the flush while the function is still on the stack. Requeue instead of
    // nesting; a genuine self-invalidation loop trips the flush's runaway
    // guard
    if (flags & REACTION_IS_UPDATING) != 0 {
        schedule_reaction(effect.clone() as Rc<dyn AnyReaction>);
        return;
    }

    effect.mark_clean();

    if let Some(cleanup) = effect.teardown.borrow_mut().take() {
        cleanup();
    }

    // Stale registrations go away; the run below records the live set
    remove_reactions(&(effect.clone() as Rc<dyn AnyReaction>));

    let prev_reaction = with_context(|ctx| {
        ctx.set_active_reaction(Some(effect.as_weak_reaction()))
    });
    effect.set_flags(effect.flags.get() | REACTION_IS_UPDATING);

    let teardown = {
        let mut func = effect.func.borrow_mut();
        match func.as_mut() {
            Some(f) => f(),
            None => None,
        }
    };

    effect.set_flags(effect.flags.get() & !REACTION_IS_UPDATING);
    with_context(|ctx| {
        ctx.set_active_reaction(prev_reaction);
    });

    *effect.teardown.borrow_mut() = teardown;
}

// =============================================================================
// DESTROY EFFECT
// =============================================================================

fn destroy_effect(effect: &Rc<EffectInner>) {
    if (effect.flags.get() & DESTROYED) != 0 {
        return;
    }

    remove_reactions(&(effect.clone() as Rc<dyn AnyReaction>));
    effect.mark_destroyed();

    if let Some(cleanup) = effect.teardown.borrow_mut().take() {
        cleanup();
    }

    *effect.func.borrow_mut() = None;
}

// =============================================================================
// EFFECT HANDLE
// =============================================================================

/// Handle to a running effect.
///
/// The handle owns the effect: dropping the last handle disposes it, so a
/// caller that wants the effect to keep running must hold on to the handle.
pub struct Effect {
    inner: Rc<EffectInner>,
}

impl Effect {
    /// Check if this effect has been disposed
    pub fn is_destroyed(&self) -> bool {
        (self.inner.flags.get() & DESTROYED) != 0
    }

    /// Dispose this effect: detach it from its sources and run its cleanup.
    /// It will never run again.
    pub fn dispose(&self) {
        destroy_effect(&self.inner);
    }
}

impl Drop for Effect {
    fn drop(&mut self) {
        if Rc::strong_count(&self.inner) == 1 {
            self.dispose();
        }
    }
}

impl Clone for Effect {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

// =============================================================================
// PUBLIC API
// =============================================================================

/// Create an effect that re-runs when sources it reads change.
///
/// The function runs immediately; any tracked reads inside it register this
/// effect, and each invalidation re-runs it synchronously.
///
/// # Example
///
/// ```
/// use reactive_list::{effect, ReactiveList};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let list = ReactiveList::from_vec(vec![1, 2, 3]);
/// let total = Rc::new(Cell::new(0));
///
/// let total_clone = total.clone();
/// let reader = list.clone();
/// let _running = effect(move || {
///     total_clone.set(reader.with_items(|items| items.iter().sum()));
/// });
///
/// assert_eq!(total.get(), 6);
/// list.append(4);
/// assert_eq!(total.get(), 10);
/// ```
pub fn effect<F>(mut f: F) -> Effect
where
    F: FnMut() + 'static,
{
    effect_with_cleanup(move || {
        f();
        None
    })
}

/// Create an effect whose function can return a cleanup.
///
/// The cleanup runs before each re-execution and when the effect is
/// disposed or dropped.
pub fn effect_with_cleanup<F>(f: F) -> Effect
where
    F: FnMut() -> Option<CleanupFn> + 'static,
{
    let inner = EffectInner::new(Box::new(f));
    run_effect(&inner);
    Effect { inner }
}

// =============================================================================
// TESTS
// =============================================================================
