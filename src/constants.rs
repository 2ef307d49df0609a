//! Default board geometry and engine limits.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board width (columns).
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height (rows). Row 0 is the ground row gems fall towards.
pub const DEFAULT_HEIGHT: usize = 8;

// =============================================================================
// Gem Types
// =============================================================================

/// Smallest number of gem types that still lets a cascade settle.
pub const MIN_GEM_TYPES: usize = 3;

/// Number of distinct gem types available (size of the `GemType` enum).
pub const MAX_GEM_TYPES: usize = 5;

/// Default number of gem types in play.
pub const DEFAULT_GEM_TYPES: usize = MAX_GEM_TYPES;

// =============================================================================
// Matching
// =============================================================================

/// Minimum run length (origin included) that counts as a match.
pub const MIN_MATCH: usize = 3;

// =============================================================================
// Rendering
// =============================================================================

/// Symbol used for an empty cell in text layouts.
pub const EMPTY: char = '.';
