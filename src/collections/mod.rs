// ============================================================================
// reactive-list - Collections Module
// The reactive list and its structural change events
// ============================================================================

pub mod change;
pub mod list;

pub use change::ListChange;
pub use list::{ListError, ReactiveList};
