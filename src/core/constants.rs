// ============================================================================
// reactive-list - Constants
// Flag constants for reaction states
// ============================================================================

// =============================================================================
// REACTION TYPE FLAGS
// =============================================================================

/// Reaction is an effect (a user computation that re-runs on invalidation)
pub const EFFECT: u32 = 1 << 0;

// =============================================================================
// REACTION STATE FLAGS
// =============================================================================

/// Reaction is clean (up-to-date)
pub const CLEAN: u32 = 1 << 1;

/// Reaction is dirty (needs to re-run)
pub const DIRTY: u32 = 1 << 2;

/// Reaction is currently executing its function
pub const REACTION_IS_UPDATING: u32 = 1 << 3;

/// Reaction has been destroyed and will never run again
pub const DESTROYED: u32 = 1 << 4;

// =============================================================================
// STATUS MASK (for clearing status bits)
// =============================================================================

/// Mask to clear the status bits (CLEAN, DIRTY)
pub const STATUS_MASK: u32 = !(CLEAN | DIRTY);

// =============================================================================
// TESTS
// =============================================================================
