// ============================================================================
// reactive-list - Events Module
// The push-based notification channel: emitter, listenable, subscription
// ============================================================================

pub mod emitter;

pub use emitter::{Emitter, Listenable, Subscription};
