//! Game state machine
//!
//! Owns the level, the player and the RNG, and resolves one turn per
//! intent. Front-ends only ever see `Snapshot`s.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::intent::{InputMode, Intent, InventoryIntent};
use super::snapshot::{InventoryEntry, InventoryView, MessageView, MonsterView, PlayerView, Snapshot};
use crate::ai::move_monsters;
use crate::combat::{monster_retaliation, player_attack};
use crate::config::GameConfig;
use crate::entities::{Direction, ItemUse, Player};
use crate::error::GameError;
use crate::items::{generate_loot, ItemIdGen};
use crate::progression::{level_progress, xp_for_next_level};
use crate::world::{generate_level, Level};

/// Where the turn cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the player's next intent
    AwaitingInput,
    /// Applying an intent and the world's response
    Resolving,
    /// Building the next level after taking the stairs
    LevelTransition,
    /// Player died
    GameOver,
    /// Player took the stairs on the last level
    GameWon,
}

impl TurnPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::GameOver | TurnPhase::GameWon)
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    Lost,
    Quit,
}

/// A message to display in the game log
#[derive(Debug, Clone, PartialEq)]
pub struct GameMessage {
    pub text: String,
    pub turn: u64,
    pub category: MessageCategory,
}

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
}

/// The main game struct that holds all game data
pub struct Game {
    config: GameConfig,
    /// Current phase of the turn cycle
    phase: TurnPhase,
    rng: StdRng,
    /// Current dungeon depth, starting at 1
    depth: u32,
    level: Level,
    player: Player,
    item_ids: ItemIdGen,
    messages: Vec<GameMessage>,
    inventory_open: bool,
    inventory_cursor: usize,
    /// Completed turns
    turn: u64,
    /// Set once the run is over and acknowledged (or quit)
    outcome: Option<RunOutcome>,
}

impl Game {
    /// Start a new run. A seed makes the whole run reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, GameError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let depth = 1;
        let level = generate_level(&config, depth, None, &mut rng)?;
        let player = Player::new(level.player_start, config.player_max_hp, &mut rng);
        log::info!(
            "New run (seed {:?}): player atk {} def {}",
            seed,
            player.stats.attack,
            player.stats.defense
        );

        let mut game = Self {
            config,
            phase: TurnPhase::AwaitingInput,
            rng,
            depth,
            level,
            player,
            item_ids: ItemIdGen::new(),
            messages: Vec::new(),
            inventory_open: false,
            inventory_cursor: 0,
            turn: 0,
            outcome: None,
        };
        game.add_message("You enter the dungeon.", MessageCategory::System);
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        log::debug!("State transition: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn inventory_cursor(&self) -> usize {
        self.inventory_cursor
    }

    /// Final result, once the run has ended
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn input_mode(&self) -> InputMode {
        if self.phase.is_terminal() {
            InputMode::Acknowledge
        } else if self.inventory_open {
            InputMode::Inventory
        } else {
            InputMode::Exploring
        }
    }

    /// Get all messages
    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    /// Add a message to the log
    pub fn add_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            turn: self.turn,
            category,
        });

        if self.messages.len() > self.config.message_log_len {
            let excess = self.messages.len() - self.config.message_log_len;
            self.messages.drain(..excess);
        }
    }

    /// Apply one intent. Intents that make no sense in the current mode are
    /// ignored.
    pub fn apply_intent(&mut self, intent: Intent) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Ok(());
        }

        let mode = self.input_mode();
        if intent == Intent::Quit && mode != InputMode::Acknowledge {
            log::info!("Player quit at depth {}", self.depth);
            self.outcome = Some(RunOutcome::Quit);
            return Ok(());
        }

        match mode {
            // Any input dismisses the final screen, quit included
            InputMode::Acknowledge => {
                self.outcome = Some(if self.phase == TurnPhase::GameWon {
                    RunOutcome::Won
                } else {
                    RunOutcome::Lost
                });
                Ok(())
            }
            InputMode::Inventory => match intent {
                Intent::Inventory(action) => self.inventory_action(action),
                _ => Ok(()),
            },
            InputMode::Exploring => match intent {
                Intent::Move(direction) => {
                    self.set_phase(TurnPhase::Resolving);
                    // A bumped move still counts as moving
                    if !self.try_move_player(direction) {
                        log::debug!("Move {:?} blocked at {:?}", direction, self.player.position);
                    }
                    self.resolve_world(true)
                }
                Intent::Attack => {
                    self.set_phase(TurnPhase::Resolving);
                    self.attack();
                    self.resolve_world(false)
                }
                Intent::OpenInventory => {
                    self.inventory_open = true;
                    self.clamp_cursor();
                    Ok(())
                }
                _ => Ok(()),
            },
        }
    }

    /// Step the player; walls and occupied cells reject the move
    fn try_move_player(&mut self, direction: Direction) -> bool {
        let target = self.player.position.step(direction);
        if !self.level.map.is_walkable(target) || self.level.monster_at(target).is_some() {
            return false;
        }
        self.player.position = target;
        true
    }

    fn attack(&mut self) {
        let Some(result) = player_attack(
            &mut self.player,
            &mut self.level,
            self.depth,
            &self.config,
            &mut self.item_ids,
            &mut self.rng,
        ) else {
            self.add_message("You swing at empty air.", MessageCategory::Combat);
            return;
        };

        let crit = if result.hit.is_crit { " Critical hit!" } else { "" };
        self.add_message(
            format!("You hit the {} for {} damage.{}", result.target.name(), result.hit.damage, crit),
            MessageCategory::Combat,
        );

        if let Some(kill) = result.kill {
            self.add_message(
                format!("The {} dies. +{} exp.", result.target.name(), kill.exp_gained),
                MessageCategory::Combat,
            );
            if kill.levels_gained > 0 {
                self.announce_level(kill.levels_gained);
            }
            if let Some(item) = kill.drop {
                self.add_message(format!("It dropped {}.", item.name), MessageCategory::Item);
            }
        }
    }

    fn announce_level(&mut self, gained: u32) {
        let plural = if gained == 1 { "" } else { "s" };
        self.add_message(
            format!("You gain {} level{}! Now level {}.", gained, plural, self.player.level),
            MessageCategory::System,
        );
    }

    /// Everything that happens after the player's action: monsters move,
    /// strike back if the player held still, then pickups and stairs.
    fn resolve_world(&mut self, player_moved: bool) -> Result<(), GameError> {
        move_monsters(
            &mut self.level.monsters,
            &self.level.map,
            self.player.position,
            self.config.chase_radius_sq,
            &mut self.rng,
        );

        if !player_moved {
            let retaliation = monster_retaliation(
                &mut self.player,
                &self.level.monsters,
                &self.config,
                &mut self.rng,
            );
            for hit in &retaliation.hits {
                let crit = if hit.hit.is_crit { " Critical hit!" } else { "" };
                self.add_message(
                    format!("The {} hits you for {} damage.{}", hit.attacker.name(), hit.hit.damage, crit),
                    MessageCategory::Combat,
                );
            }
            if retaliation.player_died {
                self.turn += 1;
                self.add_message("You die...", MessageCategory::System);
                log::info!("Player died at depth {} on turn {}", self.depth, self.turn);
                self.set_phase(TurnPhase::GameOver);
                return Ok(());
            }
        }

        let gained = self.player.check_level_up();
        if gained > 0 {
            self.announce_level(gained);
        }

        self.pick_up_chest();
        self.turn += 1;

        if self.player.position == self.level.stairs {
            if self.depth >= self.config.max_depth {
                self.add_message("You escape the dungeon. Victory!", MessageCategory::System);
                log::info!("Player won on turn {}", self.turn);
                self.set_phase(TurnPhase::GameWon);
                return Ok(());
            }
            self.descend()?;
        }

        self.set_phase(TurnPhase::AwaitingInput);
        Ok(())
    }

    fn pick_up_chest(&mut self) {
        let Some(index) = self.level.chest_at(self.player.position) else {
            return;
        };
        self.level.chests.remove(index);
        let item = generate_loot(
            self.item_ids.next_id(),
            self.depth,
            0,
            self.config.potion_chance,
            self.config.potion_heal,
            &mut self.rng,
        );
        self.add_message(format!("You open a chest and find {}.", item.name), MessageCategory::Item);
        self.player.inventory.add_item(item);
    }

    /// Proceed to the next level. The player keeps everything.
    pub fn descend(&mut self) -> Result<(), GameError> {
        self.set_phase(TurnPhase::LevelTransition);
        self.depth = (self.depth + 1).min(self.config.max_depth);
        self.level = generate_level(&self.config, self.depth, Some(&mut self.player), &mut self.rng)?;
        log::info!("Descended to depth {}", self.depth);
        self.add_message(
            format!("You descend to depth {}...", self.depth),
            MessageCategory::System,
        );
        self.set_phase(TurnPhase::AwaitingInput);
        Ok(())
    }

    fn inventory_action(&mut self, action: InventoryIntent) -> Result<(), GameError> {
        match action {
            InventoryIntent::CursorUp => {
                self.inventory_cursor = self.inventory_cursor.saturating_sub(1);
            }
            InventoryIntent::CursorDown => {
                if self.inventory_cursor + 1 < self.player.inventory.count() {
                    self.inventory_cursor += 1;
                }
            }
            InventoryIntent::UseOrEquip => self.use_selected(),
            InventoryIntent::Drop => {
                if let Some(item) = self.player.drop_item(self.inventory_cursor) {
                    self.add_message(format!("You drop {}.", item.name), MessageCategory::Item);
                    self.clamp_cursor();
                }
            }
            InventoryIntent::Close => {
                self.inventory_open = false;
                self.set_phase(TurnPhase::Resolving);
                return self.resolve_world(false);
            }
        }
        Ok(())
    }

    fn use_selected(&mut self) {
        let index = self.inventory_cursor;
        let Some(name) = self.player.inventory.get(index).map(|i| i.name.clone()) else {
            return;
        };
        let text = match self.player.use_or_equip(index) {
            Some(ItemUse::Equipped { replaced: Some(old) }) => {
                let old_name = self
                    .player
                    .inventory
                    .get_by_id(old)
                    .map(|i| i.name.clone())
                    .unwrap_or_default();
                format!("You swap {} for {}.", old_name, name)
            }
            Some(ItemUse::Equipped { replaced: None }) => format!("You equip {}.", name),
            Some(ItemUse::Unequipped) => format!("You take off {}.", name),
            Some(ItemUse::Drank { healed }) => {
                self.clamp_cursor();
                format!("You drink {} and recover {} HP.", name, healed)
            }
            None => return,
        };
        self.add_message(text, MessageCategory::Item);
    }

    fn clamp_cursor(&mut self) {
        let count = self.player.inventory.count();
        if count == 0 {
            self.inventory_cursor = 0;
        } else if self.inventory_cursor >= count {
            self.inventory_cursor = count - 1;
        }
    }

    /// Build a render snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        let player = &self.player;
        let items = player
            .inventory
            .items()
            .iter()
            .map(|item| InventoryEntry {
                id: item.id,
                name: item.name.clone(),
                category: item.category,
                description: item.to_string(),
                equipped: player.equipment.is_equipped(item.id),
            })
            .collect();

        Snapshot {
            turn: self.turn,
            depth: self.depth,
            max_depth: self.config.max_depth,
            phase: self.phase,
            mode: self.input_mode(),
            map: self.level.map.clone(),
            chests: self.level.chests.clone(),
            stairs: self.level.stairs,
            monsters: self
                .level
                .monsters
                .iter()
                .map(|m| MonsterView {
                    archetype: m.archetype,
                    name: m.name(),
                    glyph: m.archetype.glyph(),
                    position: m.position,
                    hp: m.health.current,
                    max_hp: m.health.max,
                })
                .collect(),
            player: PlayerView {
                name: player.name.clone(),
                position: player.position,
                hp: player.health.current,
                max_hp: player.health.max,
                hp_fraction: player.health.percentage(),
                attack: player.total_attack(),
                defense: player.total_defense(),
                experience: player.experience,
                level: player.level,
                next_level_exp: xp_for_next_level(player.level),
                exp_progress: level_progress(player.level, player.experience),
            },
            inventory: InventoryView {
                items,
                cursor: self.inventory_cursor,
            },
            messages: self
                .messages
                .iter()
                .map(|m| MessageView {
                    text: m.text.clone(),
                    category: m.category,
                })
                .collect(),
        }
    }
}
