//! Sprite management
//!
//! Sprites are drawn procedurally at startup: a background fill with a
//! simple silhouette on top, so no asset files are needed.

use std::collections::HashMap;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use crate::entities::Archetype;
use crate::world::Tile;

/// Unique identifier for a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub u32);

impl SpriteId {
    // Terrain
    pub const FLOOR: SpriteId = SpriteId(0);
    pub const WALL: SpriteId = SpriteId(1);
    pub const STAIRS_DOWN: SpriteId = SpriteId(8);

    // Entities
    pub const PLAYER: SpriteId = SpriteId(100);
    pub const GOBLIN: SpriteId = SpriteId(101);
    pub const TROLL: SpriteId = SpriteId(102);
    pub const DRAGON: SpriteId = SpriteId(103);

    // Items
    pub const CHEST: SpriteId = SpriteId(233);

    pub fn for_tile(tile: Tile) -> SpriteId {
        match tile {
            Tile::Floor => SpriteId::FLOOR,
            Tile::Wall => SpriteId::WALL,
        }
    }

    pub fn for_archetype(archetype: Archetype) -> SpriteId {
        match archetype {
            Archetype::Goblin => SpriteId::GOBLIN,
            Archetype::Troll => SpriteId::TROLL,
            Archetype::Dragon => SpriteId::DRAGON,
        }
    }
}

/// Silhouettes a procedural sprite can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Plain background
    None,
    /// Filled circle
    Disc,
    /// Upward-pointing triangle
    Spike,
    /// Filled square with a margin
    Block,
    /// Horizontal bars, like steps
    Steps,
    /// Brick pattern over the whole tile
    Bricks,
}

/// A single sprite image
#[derive(Clone)]
pub struct Sprite {
    pub image: DynamicImage,
    pub width: u32,
    pub height: u32,
}

impl Sprite {
    /// Create a sprite from an image
    pub fn new(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self { image, width, height }
    }

    /// Draw `shape` in `fg` over a `bg` filled square of `size` pixels
    pub fn procedural(size: u32, bg: (u8, u8, u8), fg: (u8, u8, u8), shape: Shape) -> Self {
        let bg = Rgba([bg.0, bg.1, bg.2, 255]);
        let fg = Rgba([fg.0, fg.1, fg.2, 255]);
        let s = size as i64;
        let c = s / 2;
        let r = s * 3 / 8;

        let img = RgbaImage::from_fn(size, size, |x, y| {
            let (x, y) = (x as i64, y as i64);
            let inside = match shape {
                Shape::None => false,
                Shape::Disc => (x - c) * (x - c) + (y - c) * (y - c) <= r * r,
                Shape::Spike => {
                    let top = s / 8;
                    let bottom = s - s / 8;
                    y >= top && y < bottom && (x - c).abs() * (bottom - top) <= (y - top) * (s / 2 - 1)
                }
                Shape::Block => {
                    let m = s / 4;
                    x >= m && x < s - m && y >= m && y < s - m
                }
                Shape::Steps => {
                    let band = (s / 4).max(1);
                    let step = y / band;
                    (y % band) < band / 2 + 1 && x >= step * band / 2
                }
                Shape::Bricks => {
                    let row_h = (s / 4).max(1);
                    let row = y / row_h;
                    let offset = if row % 2 == 0 { 0 } else { s / 4 };
                    // mortar lines
                    y % row_h == 0 || (x + offset) % (s / 2).max(1) == 0
                }
            };
            if inside { fg } else { bg }
        });

        Self::new(DynamicImage::ImageRgba8(img))
    }
}

/// The set of sprites the tile renderer draws from
pub struct SpriteSheet {
    sprites: HashMap<SpriteId, Sprite>,
    pub sprite_width: u32,
    pub sprite_height: u32,
}

impl SpriteSheet {
    /// Create an empty sprite sheet
    pub fn new(sprite_width: u32, sprite_height: u32) -> Self {
        Self {
            sprites: HashMap::new(),
            sprite_width,
            sprite_height,
        }
    }

    /// Draw the full game sprite set at `size` pixels square
    pub fn procedural(size: u32) -> Self {
        let mut sheet = Self::new(size, size);
        let floor = Tile::Floor.bg_color();

        sheet.add_sprite(SpriteId::FLOOR, Sprite::procedural(size, floor, floor, Shape::None));
        sheet.add_sprite(
            SpriteId::WALL,
            Sprite::procedural(size, Tile::Wall.fg_color(), Tile::Wall.bg_color(), Shape::Bricks),
        );
        sheet.add_sprite(
            SpriteId::STAIRS_DOWN,
            Sprite::procedural(size, floor, (120, 200, 255), Shape::Steps),
        );
        sheet.add_sprite(SpriteId::PLAYER, Sprite::procedural(size, floor, (255, 255, 200), Shape::Disc));
        sheet.add_sprite(SpriteId::CHEST, Sprite::procedural(size, floor, (139, 90, 43), Shape::Block));

        for (archetype, shape) in [
            (Archetype::Goblin, Shape::Disc),
            (Archetype::Troll, Shape::Block),
            (Archetype::Dragon, Shape::Spike),
        ] {
            sheet.add_sprite(
                SpriteId::for_archetype(archetype),
                Sprite::procedural(size, floor, archetype.def().fg, shape),
            );
        }

        log::info!("Created {} procedural sprites", sheet.len());
        sheet
    }

    /// Add a sprite manually
    pub fn add_sprite(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, sprite);
    }

    /// Get a sprite by ID
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// All sprites, ordered by ID
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        let mut entries: Vec<_> = self.sprites.iter().map(|(id, s)| (*id, s)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::procedural(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sheet_covers_every_drawable() {
        let sheet = SpriteSheet::default();
        for id in [
            SpriteId::FLOOR,
            SpriteId::WALL,
            SpriteId::STAIRS_DOWN,
            SpriteId::PLAYER,
            SpriteId::CHEST,
            SpriteId::GOBLIN,
            SpriteId::TROLL,
            SpriteId::DRAGON,
        ] {
            let sprite = sheet.get(id).unwrap();
            assert_eq!((sprite.width, sprite.height), (16, 16));
        }
    }

    #[test]
    fn test_disc_has_fg_centre_and_bg_corner() {
        let sprite = Sprite::procedural(16, (0, 0, 0), (255, 0, 0), Shape::Disc);
        let img = sprite.image.to_rgba8();
        assert_eq!(img.get_pixel(8, 8), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_plain_shape_is_uniform() {
        let sprite = Sprite::procedural(4, (1, 2, 3), (9, 9, 9), Shape::None);
        let img = sprite.image.to_rgba8();
        assert!(img.pixels().all(|p| *p == Rgba([1, 2, 3, 255])));
    }
}
