//! Monster creation
//!
//! Defines the monster archetypes and the depth-weighted factory that picks
//! one for each spawn. Deeper levels shift the odds from goblins towards
//! trolls, and every tenth level is all but guaranteed to hold dragons.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::components::{CombatStats, Health, Position};

/// Monster template with fixed stats and rendering info
pub struct MonsterDef {
    pub name: &'static str,
    pub glyph: char,
    pub fg: (u8, u8, u8),
    pub hp: i32,
    pub stats: CombatStats,
    pub exp_value: u32,
    /// Possible per-turn step counts; one is drawn every turn
    pub move_budget: &'static [u32],
}

pub const GOBLIN: MonsterDef = MonsterDef {
    name: "Goblin",
    glyph: 'g',
    fg: (90, 180, 70),
    hp: 30,
    stats: CombatStats { attack: 5, defense: 0 },
    exp_value: 25,
    move_budget: &[0, 1, 2],
};

pub const TROLL: MonsterDef = MonsterDef {
    name: "Troll",
    glyph: 'T',
    fg: (140, 120, 90),
    hp: 50,
    stats: CombatStats { attack: 15, defense: 2 },
    exp_value: 100,
    move_budget: &[0, 1],
};

pub const DRAGON: MonsterDef = MonsterDef {
    name: "Dragon",
    glyph: 'D',
    fg: (220, 50, 40),
    hp: 200,
    stats: CombatStats { attack: 25, defense: 5 },
    exp_value: 1000,
    move_budget: &[1],
};

/// Monster archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Goblin,
    Troll,
    Dragon,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Goblin, Archetype::Troll, Archetype::Dragon];

    pub fn def(&self) -> &'static MonsterDef {
        match self {
            Archetype::Goblin => &GOBLIN,
            Archetype::Troll => &TROLL,
            Archetype::Dragon => &DRAGON,
        }
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    pub fn glyph(&self) -> char {
        self.def().glyph
    }

    /// Relative spawn weight at a given depth
    pub fn spawn_weight(&self, depth: u32) -> u32 {
        match self {
            Archetype::Goblin => 60u32.saturating_sub(3 * depth).max(10),
            Archetype::Troll => 30 + 4 * depth.saturating_sub(5),
            Archetype::Dragon => {
                if depth > 0 && depth % 10 == 0 {
                    1000
                } else {
                    depth / 2
                }
            }
        }
    }
}

/// A live monster on the current level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub archetype: Archetype,
    pub position: Position,
    pub stats: CombatStats,
    pub health: Health,
    pub exp_value: u32,
}

impl Monster {
    pub fn new(archetype: Archetype, position: Position) -> Self {
        let def = archetype.def();
        Self {
            archetype,
            position,
            stats: def.stats,
            health: Health::new(def.hp),
            exp_value: def.exp_value,
        }
    }

    pub fn name(&self) -> &'static str {
        self.archetype.name()
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    /// Draw how many steps this monster takes this turn
    pub fn move_budget(&self, rng: &mut impl Rng) -> u32 {
        self.archetype
            .def()
            .move_budget
            .choose(rng)
            .copied()
            .unwrap_or(0)
    }
}

/// Pick an archetype for the given depth
pub fn roll_archetype(depth: u32, rng: &mut impl Rng) -> Archetype {
    let weights = Archetype::ALL.map(|a| a.spawn_weight(depth));
    match WeightedIndex::new(weights) {
        Ok(dist) => Archetype::ALL[dist.sample(rng)],
        // Goblin weight never drops below 10
        Err(_) => Archetype::Goblin,
    }
}

/// Spawn a depth-appropriate monster at a position
pub fn spawn_monster(depth: u32, position: Position, rng: &mut impl Rng) -> Monster {
    let archetype = roll_archetype(depth, rng);
    Monster::new(archetype, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_archetype_stats() {
        let m = Monster::new(Archetype::Troll, Position::new(2, 2));
        assert_eq!(m.health.current, 50);
        assert_eq!(m.stats, CombatStats::new(15, 2));
        assert_eq!(m.exp_value, 100);
        let d = Monster::new(Archetype::Dragon, Position::new(2, 2));
        assert_eq!(d.health.max, 200);
        assert_eq!(d.exp_value, 1000);
    }

    #[test]
    fn test_spawn_weights() {
        assert_eq!(Archetype::Goblin.spawn_weight(1), 57);
        assert_eq!(Archetype::Goblin.spawn_weight(20), 10);
        assert_eq!(Archetype::Troll.spawn_weight(3), 30);
        assert_eq!(Archetype::Troll.spawn_weight(8), 42);
        assert_eq!(Archetype::Dragon.spawn_weight(1), 0);
        assert_eq!(Archetype::Dragon.spawn_weight(7), 3);
        assert_eq!(Archetype::Dragon.spawn_weight(10), 1000);
    }

    #[test]
    fn test_no_dragons_on_first_level() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert_ne!(roll_archetype(1, &mut rng), Archetype::Dragon);
        }
    }

    #[test]
    fn test_tenth_level_is_dragon_heavy() {
        let mut rng = StdRng::seed_from_u64(12);
        let dragons = (0..1000)
            .filter(|_| roll_archetype(10, &mut rng) == Archetype::Dragon)
            .count();
        assert!(dragons > 800, "dragons: {}", dragons);
    }

    #[test]
    fn test_move_budget_within_archetype_set() {
        let mut rng = StdRng::seed_from_u64(5);
        for archetype in Archetype::ALL {
            let m = Monster::new(archetype, Position::new(1, 1));
            for _ in 0..100 {
                let budget = m.move_budget(&mut rng);
                assert!(archetype.def().move_budget.contains(&budget));
            }
        }
    }

    #[test]
    fn test_spawn_keeps_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = spawn_monster(4, Position::new(7, 3), &mut rng);
        assert_eq!(m.position, Position::new(7, 3));
        assert!(!m.is_dead());
    }
}
