//! Experience and leveling
//!
//! Experience is a running total and is never spent. Reaching level N+1
//! requires `N * 1000` total experience.

/// Experience per character level
pub const XP_PER_LEVEL: u32 = 1000;

/// Total experience needed to advance past `level`
pub fn xp_for_next_level(level: u32) -> u32 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// How many levels a character at `level` with `experience` total should gain.
///
/// Keeps advancing while the total still clears the (growing) threshold, so a
/// single large award can grant several levels at once.
pub fn levels_to_gain(level: u32, experience: u32) -> u32 {
    let mut current = level;
    while experience >= xp_for_next_level(current) {
        current += 1;
    }
    current - level
}

/// Progress towards the next level as a fraction in `[0, 1]`
pub fn level_progress(level: u32, experience: u32) -> f32 {
    let floor = xp_for_next_level(level.saturating_sub(1));
    let ceiling = xp_for_next_level(level);
    if ceiling <= floor {
        return 0.0;
    }
    let into = experience.saturating_sub(floor) as f32;
    (into / (ceiling - floor) as f32).clamp(0.0, 1.0)
}
