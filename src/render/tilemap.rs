//! Tile rendering
//!
//! Draws each map cell as a Kitty sprite and the status, message and
//! inventory text underneath with plain crossterm commands.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetForegroundColor, Color},
    terminal::{Clear, ClearType},
};

use super::{KittyGraphics, SpriteId, SpriteSheet};
use crate::entities::Position;
use crate::game::{InputMode, MessageCategory, Renderer, Snapshot, TurnPhase};

/// Messages shown under the map
const MESSAGE_LINES: usize = 5;

/// One sprite placed on the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub col: u16,
    pub row: u16,
    pub sprite: SpriteId,
}

/// Renderer drawing the map with Kitty graphics
pub struct TileRenderer<W: Write> {
    out: W,
    kitty: KittyGraphics,
    sprites: SpriteSheet,
    /// Sprite -> uploaded Kitty image id
    uploaded: HashMap<SpriteId, u32>,
    /// Terminal cells covered by one sprite
    cell_span: (u16, u16),
}

impl<W: Write> TileRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_sprites(out, SpriteSheet::default())
    }

    pub fn with_sprites(out: W, sprites: SpriteSheet) -> Self {
        let kitty = KittyGraphics::new();
        let cell_span = kitty.image_to_cells(sprites.sprite_width, sprites.sprite_height);
        Self {
            out,
            kitty,
            sprites,
            uploaded: HashMap::new(),
            cell_span,
        }
    }

    /// Upload every sprite once
    fn upload_sprites(&mut self) -> anyhow::Result<()> {
        for (id, sprite) in self.sprites.iter() {
            let image_id = self.kitty.upload_image(&mut self.out, &sprite.image)?;
            self.uploaded.insert(id, image_id);
        }
        log::info!("Uploaded {} sprites via Kitty protocol", self.uploaded.len());
        Ok(())
    }

    /// Which sprite goes where, in terminal cells
    pub fn layout(&self, snapshot: &Snapshot) -> Vec<Placement> {
        let (span_x, span_y) = self.cell_span;
        let mut placements = Vec::with_capacity((snapshot.map.width * snapshot.map.height) as usize);

        for y in 0..snapshot.map.height {
            for x in 0..snapshot.map.width {
                let pos = Position::new(x, y);
                let Some(tile) = snapshot.map.get_tile(x, y) else {
                    continue;
                };
                let sprite = if snapshot.player.position == pos {
                    SpriteId::PLAYER
                } else if let Some(monster) = snapshot.monster_at(pos) {
                    SpriteId::for_archetype(monster.archetype)
                } else if snapshot.chests.contains(&pos) {
                    SpriteId::CHEST
                } else if snapshot.stairs == pos {
                    SpriteId::STAIRS_DOWN
                } else {
                    SpriteId::for_tile(tile)
                };
                placements.push(Placement {
                    col: x as u16 * span_x,
                    row: y as u16 * span_y,
                    sprite,
                });
            }
        }

        placements
    }

    fn draw_map(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let (span_x, span_y) = self.cell_span;
        for placement in self.layout(snapshot) {
            match self.uploaded.get(&placement.sprite) {
                Some(&image_id) => {
                    self.kitty
                        .place_at(&mut self.out, image_id, placement.col, placement.row, span_x, span_y)?;
                }
                None => log::warn!("No uploaded sprite for {:?}", placement.sprite),
            }
        }
        Ok(())
    }

    /// Status, messages and the inventory list below the map
    fn draw_text(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let mut row = snapshot.map.height as u16 * self.cell_span.1 + 1;

        queue!(self.out, MoveTo(0, row), Print(snapshot.stats_line()))?;
        row += 2;

        if snapshot.mode == InputMode::Inventory {
            queue!(self.out, MoveTo(0, row), SetForegroundColor(Color::Yellow), Print("Inventory"), ResetColor)?;
            row += 1;
            if snapshot.inventory.items.is_empty() {
                queue!(self.out, MoveTo(0, row), Print("  (empty)"))?;
                row += 1;
            }
            for (idx, item) in snapshot.inventory.items.iter().enumerate() {
                let marker = if idx == snapshot.inventory.cursor { '>' } else { ' ' };
                let equip = if item.equipped { " [E]" } else { "" };
                queue!(
                    self.out,
                    MoveTo(0, row),
                    Print(format!("{} {}. {}{}", marker, idx + 1, item.description, equip))
                )?;
                row += 1;
            }
            queue!(
                self.out,
                MoveTo(0, row + 1),
                Print("[jk] Navigate  [u] Use/Equip  [d] Drop  [Esc] Close")
            )?;
            return Ok(());
        }

        let start = snapshot.messages.len().saturating_sub(MESSAGE_LINES);
        for msg in &snapshot.messages[start..] {
            let color = match msg.category {
                MessageCategory::Combat => Color::Red,
                MessageCategory::Item => Color::Yellow,
                MessageCategory::System => Color::Cyan,
            };
            queue!(
                self.out,
                MoveTo(0, row),
                SetForegroundColor(color),
                Print(&msg.text),
                ResetColor
            )?;
            row += 1;
        }
        Ok(())
    }

    fn draw_final_screen(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let (title, color) = if snapshot.phase == TurnPhase::GameWon {
            ("VICTORY", Color::Yellow)
        } else {
            ("GAME OVER", Color::Red)
        };
        queue!(
            self.out,
            MoveTo(2, 2),
            SetForegroundColor(color),
            Print(title),
            ResetColor,
            MoveTo(2, 4),
            Print(snapshot.stats_line()),
            MoveTo(2, 6),
            Print("Press any key to exit")
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TileRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if self.uploaded.is_empty() {
            self.upload_sprites()?;
        }

        self.kitty.clear_placements(&mut self.out)?;
        queue!(self.out, Clear(ClearType::All))?;

        if snapshot.phase.is_terminal() {
            self.draw_final_screen(snapshot)?;
        } else {
            self.draw_map(snapshot)?;
            self.draw_text(snapshot)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for TileRenderer<W> {
    fn drop(&mut self) {
        if let Err(e) = self.kitty.clear_all(&mut self.out).and_then(|_| self.out.flush()) {
            log::warn!("Failed to clear Kitty images: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::{Game, Intent};

    #[test]
    fn test_layout_covers_map_with_entities_on_top() {
        let game = Game::new(GameConfig::default(), Some(6)).unwrap();
        let snapshot = game.snapshot();
        let renderer = TileRenderer::new(Vec::new());
        let layout = renderer.layout(&snapshot);

        assert_eq!(layout.len(), (snapshot.map.width * snapshot.map.height) as usize);

        let at = |pos: Position| {
            layout
                .iter()
                .find(|p| p.col == pos.x as u16 * 2 && p.row == pos.y as u16)
                .map(|p| p.sprite)
        };
        assert_eq!(at(snapshot.player.position), Some(SpriteId::PLAYER));
        assert_eq!(at(snapshot.stairs), Some(SpriteId::STAIRS_DOWN));
        assert_eq!(at(Position::new(0, 0)), Some(SpriteId::WALL));
        for chest in &snapshot.chests {
            assert_eq!(at(*chest), Some(SpriteId::CHEST));
        }
        for monster in &snapshot.monsters {
            assert_eq!(at(monster.position), Some(SpriteId::for_archetype(monster.archetype)));
        }
    }

    #[test]
    fn test_render_uploads_once_and_prints_status() {
        let game = Game::new(GameConfig::default(), Some(6)).unwrap();
        let mut renderer = TileRenderer::new(Vec::new());
        renderer.render(&game.snapshot()).unwrap();
        renderer.render(&game.snapshot()).unwrap();
        let uploads = renderer.uploaded.len();
        let bytes = std::mem::take(&mut renderer.out);
        let text = String::from_utf8_lossy(&bytes);

        assert_eq!(text.matches("a=t,").count(), uploads);
        assert!(text.contains("a=p,"));
        assert!(text.contains("Depth: 1/20"));
    }

    #[test]
    fn test_inventory_mode_lists_items() {
        let mut game = Game::new(GameConfig::default(), Some(6)).unwrap();
        game.apply_intent(Intent::OpenInventory).unwrap();
        let mut renderer = TileRenderer::new(Vec::new());
        renderer.render(&game.snapshot()).unwrap();
        let bytes = std::mem::take(&mut renderer.out);
        assert!(String::from_utf8_lossy(&bytes).contains("(empty)"));
    }
}
