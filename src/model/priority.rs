//! Priority normalization. 0 is the highest priority, 4 the lowest.

/// Priority used when a store gives none or gives something unreadable.
pub const DEFAULT_PRIORITY: u8 = 2;

/// Lowest priority in the unified scale.
pub const MAX_PRIORITY: u8 = 4;

/// Maps the planning store's three-level scale onto {1, 2, 3}.
///
/// 0 and 4 are unreachable from this side.
#[must_use]
pub fn planning_priority(native: Option<&str>) -> u8 {
    match native.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
        Some("high") => 1,
        Some("low") => 3,
        _ => DEFAULT_PRIORITY,
    }
}

/// Clamps a Beads integer priority into the unified range.
#[must_use]
pub fn beads_priority(native: Option<i64>) -> u8 {
    native.map_or(DEFAULT_PRIORITY, |p| {
        u8::try_from(p.clamp(0, i64::from(MAX_PRIORITY))).unwrap_or(DEFAULT_PRIORITY)
    })
}
