//! Progression systems

pub mod xp;

pub use xp::{xp_for_next_level, levels_to_gain, level_progress, XP_PER_LEVEL};
