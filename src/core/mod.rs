// ============================================================================
// reactive-list - Core Module
// Fundamental types, flags, and context for the reactive system
// ============================================================================

pub mod constants;
pub mod context;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use context::{is_tracking, is_untracking, with_context, ReactiveContext};
pub use types::{AnyReaction, AnySource, DepNode};
