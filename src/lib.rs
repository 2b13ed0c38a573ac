// ============================================================================
// reactive-list - A Reactive List for Rust
// ============================================================================
//
// An ordered collection wired into two notification mechanisms:
//
// - Pull: computations created with `effect` that read the whole sequence
//   re-run automatically after every mutation (fine-grained invalidation,
//   not value diffing).
// - Push: subscribers on the list's change feed receive a typed
//   `ListChange` describing each structural edit - insert, remove, replace,
//   swap - with item- and offset-level detail, so an incremental consumer
//   can patch its derived state instead of re-reading the whole list.
//
// Everything is single-threaded and synchronous: a mutation updates state,
// re-runs dependents, emits to subscribers, and returns.
// ============================================================================

pub mod collections;
pub mod core;
pub mod events;
pub mod primitives;
pub mod reactivity;

// Re-export the public surface at the crate root
pub use crate::collections::{ListChange, ListError, ReactiveList};
pub use crate::core::context::{is_tracking, is_untracking, with_context, ReactiveContext};
pub use crate::core::types::{AnyReaction, AnySource, DepNode};
pub use crate::events::{Emitter, Listenable, Subscription};
pub use crate::primitives::dependency::Dependency;
pub use crate::primitives::effect::{effect, effect_with_cleanup, CleanupFn, Effect, EffectFn};
pub use crate::reactivity::{notify_changed, remove_reactions, track_read, untrack};

// =============================================================================
// TESTS
// =============================================================================
