//! Monster movement
//!
//! Each monster either closes in on a nearby player or wanders. The heading
//! is fixed once per turn and the monster walks up to its move budget along
//! it, stopping at the first blocked cell.

use rand::Rng;

use crate::entities::{Monster, Position};
use crate::world::Map;

/// Heading for one monster this turn
pub fn choose_step(from: Position, player: Position, chase_radius_sq: i32, rng: &mut impl Rng) -> (i32, i32) {
    if from.distance_sq(&player) < chase_radius_sq {
        ((player.x - from.x).signum(), (player.y - from.y).signum())
    } else {
        (rng.gen_range(-1..=1), rng.gen_range(-1..=1))
    }
}

/// Check if a monster may step onto `pos`
fn is_valid_move(pos: Position, map: &Map, player: Position, monsters: &[Monster]) -> bool {
    if !map.is_walkable(pos) {
        return false;
    }
    if pos == player {
        return false;
    }
    !monsters.iter().any(|m| m.position == pos)
}

/// Move every monster in list order. Returns how many steps were taken in
/// total.
pub fn move_monsters(
    monsters: &mut [Monster],
    map: &Map,
    player: Position,
    chase_radius_sq: i32,
    rng: &mut impl Rng,
) -> u32 {
    let mut steps = 0;

    for i in 0..monsters.len() {
        if monsters[i].is_dead() {
            continue;
        }
        let (dx, dy) = choose_step(monsters[i].position, player, chase_radius_sq, rng);
        let budget = monsters[i].move_budget(rng);

        for _ in 0..budget {
            let next = monsters[i].position.offset(dx, dy);
            if !is_valid_move(next, map, player, monsters) {
                break;
            }
            monsters[i].position = next;
            steps += 1;
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Archetype;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_chase_inside_radius() {
        let mut rng = StdRng::seed_from_u64(0);
        let step = choose_step(Position::new(5, 5), Position::new(7, 6), 9, &mut rng);
        assert_eq!(step, (1, 1));
        let step = choose_step(Position::new(5, 5), Position::new(5, 3), 9, &mut rng);
        assert_eq!(step, (0, -1));
    }

    #[test]
    fn test_wander_outside_radius() {
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            // distance squared 9 is not strictly inside the radius
            let (dx, dy) = choose_step(Position::new(5, 5), Position::new(8, 5), 9, &mut rng);
            assert!((-1..=1).contains(&dx));
            assert!((-1..=1).contains(&dy));
        }
    }

    #[test]
    fn test_dragon_steps_towards_player() {
        let map = Map::bordered(20, 10);
        let mut monsters = vec![Monster::new(Archetype::Dragon, Position::new(5, 5))];
        let mut rng = StdRng::seed_from_u64(1);
        move_monsters(&mut monsters, &map, Position::new(7, 5), 9, &mut rng);
        assert_eq!(monsters[0].position, Position::new(6, 5));
    }

    #[test]
    fn test_never_steps_onto_player() {
        let map = Map::bordered(20, 10);
        let mut monsters = vec![Monster::new(Archetype::Dragon, Position::new(6, 5))];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            move_monsters(&mut monsters, &map, Position::new(7, 5), 9, &mut rng);
            assert_eq!(monsters[0].position, Position::new(6, 5));
        }
    }

    #[test]
    fn test_blocked_by_wall() {
        let map = Map::bordered(20, 10);
        let mut monsters = vec![Monster::new(Archetype::Dragon, Position::new(1, 5))];
        let mut rng = StdRng::seed_from_u64(1);
        // Player sits beyond the west wall's reach; the dragon heads into it
        move_monsters(&mut monsters, &map, Position::new(-1, 5), 9, &mut rng);
        assert_eq!(monsters[0].position, Position::new(1, 5));
    }

    #[test]
    fn test_blocked_by_other_monster() {
        let map = Map::bordered(20, 10);
        let mut monsters = vec![
            Monster::new(Archetype::Dragon, Position::new(4, 5)),
            Monster::new(Archetype::Dragon, Position::new(5, 5)),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        // Player at (6,5): the first dragon is stuck behind the second,
        // the second is already adjacent and cannot enter the player's cell
        move_monsters(&mut monsters, &map, Position::new(6, 5), 9, &mut rng);
        assert_eq!(monsters[0].position, Position::new(4, 5));
        assert_eq!(monsters[1].position, Position::new(5, 5));
    }

    #[test]
    fn test_no_shared_cells_after_many_turns() {
        let map = Map::bordered(12, 8);
        let mut monsters: Vec<Monster> = (1..=8)
            .map(|x| Monster::new(Archetype::Goblin, Position::new(x, 3)))
            .collect();
        let player = Position::new(5, 5);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            move_monsters(&mut monsters, &map, player, 9, &mut rng);
            let cells: HashSet<_> = monsters.iter().map(|m| m.position).collect();
            assert_eq!(cells.len(), monsters.len());
            assert!(!cells.contains(&player));
            for m in &monsters {
                assert!(map.is_walkable(m.position));
            }
        }
    }
}
