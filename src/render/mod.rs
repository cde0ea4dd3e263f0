//! Tile front-end
//!
//! Renders the map as sprites through the Kitty graphics protocol.
//! Supported by: Ghostty, Kitty, WezTerm

pub mod kitty;
pub mod sprites;
pub mod tilemap;

pub use kitty::{is_kitty_supported, KittyGraphics};
pub use sprites::{Shape, Sprite, SpriteId, SpriteSheet};
pub use tilemap::{Placement, TileRenderer};
