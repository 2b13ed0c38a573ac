// ============================================================================
// reactive-list - Primitives Module
// User-facing reactive building blocks: dependency handles and effects
// ============================================================================

pub mod dependency;
pub mod effect;

// Re-export for convenience
pub use dependency::Dependency;
pub use effect::{effect, effect_with_cleanup, CleanupFn, Effect, EffectFn};
