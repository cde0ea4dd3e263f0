//! Kitty Graphics Protocol implementation
//!
//! Allows rendering actual images/sprites in supporting terminals.
//! Supported by: Ghostty, Kitty, WezTerm
//!
//! Protocol documentation: https://sw.kovidgoyal.net/kitty/graphics-protocol/

use std::collections::HashMap;
use std::env;
use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, RgbaImage};

/// Maximum payload per escape sequence
const CHUNK_SIZE: usize = 4096;

/// Kitty Graphics Protocol handler. Escape sequences go to whatever
/// writer the caller passes in.
pub struct KittyGraphics {
    /// Uploaded image IDs mapped to their dimensions
    uploaded_images: HashMap<u32, (u32, u32)>,
    /// Next available image ID
    next_id: u32,
    /// Cell size in pixels (width, height) - defaults to 8x16
    cell_size: (u16, u16),
    /// Whether to suppress terminal responses
    quiet: bool,
}

impl KittyGraphics {
    pub fn new() -> Self {
        Self {
            uploaded_images: HashMap::new(),
            next_id: 1,
            cell_size: (8, 16),
            quiet: true,
        }
    }

    fn quiet_flag(&self) -> u8 {
        if self.quiet { 2 } else { 0 }
    }

    /// Upload an image once and get an ID for later placements
    pub fn upload_image(&mut self, out: &mut impl Write, image: &DynamicImage) -> io::Result<u32> {
        let id = self.next_id;
        self.next_id += 1;

        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let encoded = BASE64.encode(encode_png(&rgba)?);

        // a=t (transmit), t=d (direct), f=100 (PNG), i=ID, q=quiet, m=more chunks
        let total = encoded.len();
        let mut start = 0;
        while start < total {
            let end = (start + CHUNK_SIZE).min(total);
            let more = if end < total { 1 } else { 0 };
            // base64 output is ASCII, so any byte offset is a char boundary
            let chunk = &encoded[start..end];
            if start == 0 {
                write!(
                    out,
                    "\x1b_Ga=t,t=d,f=100,i={},q={},m={};{}\x1b\\",
                    id,
                    self.quiet_flag(),
                    more,
                    chunk
                )?;
            } else {
                write!(out, "\x1b_Gm={};{}\x1b\\", more, chunk)?;
            }
            start = end;
        }

        self.uploaded_images.insert(id, (width, height));
        Ok(id)
    }

    /// Place an uploaded image at specific cell coordinates
    pub fn place_at(
        &self,
        out: &mut impl Write,
        image_id: u32,
        col: u16,
        row: u16,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        // Move cursor, then a=p (put), C=1 keeps the cursor where it is
        write!(
            out,
            "\x1b[{};{}H\x1b_Ga=p,i={},c={},r={},C=1,q={}\x1b\\",
            row + 1,
            col + 1,
            image_id,
            cols,
            rows,
            self.quiet_flag()
        )
    }

    /// Remove every placement but keep uploaded image data
    pub fn clear_placements(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\x1b_Ga=d,d=a,q={}\x1b\\", self.quiet_flag())
    }

    /// Delete all uploaded images
    pub fn clear_all(&mut self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "\x1b_Ga=d,d=A,q={}\x1b\\", self.quiet_flag())?;
        self.uploaded_images.clear();
        Ok(())
    }

    pub fn is_uploaded(&self, image_id: u32) -> bool {
        self.uploaded_images.contains_key(&image_id)
    }

    /// Calculate how many cells an image should occupy
    pub fn image_to_cells(&self, width: u32, height: u32) -> (u16, u16) {
        let cols = (width as u16).div_ceil(self.cell_size.0);
        let rows = (height as u16).div_ceil(self.cell_size.1);
        (cols.max(1), rows.max(1))
    }
}

impl Default for KittyGraphics {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if Kitty graphics protocol is likely supported
pub fn is_kitty_supported() -> bool {
    if let Ok(term) = env::var("TERM") {
        let term_lower = term.to_lowercase();
        if term_lower.contains("kitty") || term_lower.contains("ghostty") {
            return true;
        }
    }

    if let Ok(term_prog) = env::var("TERM_PROGRAM") {
        let prog_lower = term_prog.to_lowercase();
        if prog_lower.contains("kitty") || prog_lower.contains("ghostty") || prog_lower.contains("wezterm") {
            return true;
        }
    }

    env::var("KITTY_WINDOW_ID").is_ok()
        || env::var("GHOSTTY_RESOURCES_DIR").is_ok()
        || env::var("WEZTERM_PANE").is_ok()
}

/// Encode an RGBA image as PNG bytes
fn encode_png(image: &RgbaImage) -> io::Result<Vec<u8>> {
    use image::ImageEncoder;
    use std::io::Cursor;

    let mut buffer = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(Cursor::new(&mut buffer));

    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(io::Error::other)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn square(size: u32) -> DynamicImage {
        let mut img = RgbaImage::new(size, size);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([200, 40, 40, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_cell_calculation() {
        let kitty = KittyGraphics::new();

        // 16x16 sprite with 8x16 cells = 2x1 cells
        assert_eq!(kitty.image_to_cells(16, 16), (2, 1));
        assert_eq!(kitty.image_to_cells(32, 32), (4, 2));
    }

    #[test]
    fn test_upload_emits_transmit_command() {
        let mut kitty = KittyGraphics::new();
        let mut out = Vec::new();
        let id = kitty.upload_image(&mut out, &square(16)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("\x1b_Ga=t,t=d,f=100,i={},", id)));
        assert!(text.ends_with("\x1b\\"));
        assert!(kitty.is_uploaded(id));
    }

    #[test]
    fn test_large_upload_is_chunked() {
        let mut kitty = KittyGraphics::new();
        let mut out = Vec::new();
        // Noise does not compress, so the payload spans several chunks
        let mut rng = StdRng::seed_from_u64(8);
        let mut img = RgbaImage::new(64, 64);
        for pixel in img.pixels_mut() {
            let [r, g, b]: [u8; 3] = rng.gen();
            *pixel = image::Rgba([r, g, b, 255]);
        }
        kitty.upload_image(&mut out, &DynamicImage::ImageRgba8(img)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b_Gm=1;"));
        assert!(text.contains("\x1b_Gm=0;"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut kitty = KittyGraphics::new();
        let mut out = Vec::new();
        let a = kitty.upload_image(&mut out, &square(4)).unwrap();
        let b = kitty.upload_image(&mut out, &square(4)).unwrap();
        assert_ne!(a, b);
        kitty.clear_all(&mut out).unwrap();
        assert!(!kitty.is_uploaded(a));
    }

    #[test]
    fn test_place_at_moves_cursor() {
        let kitty = KittyGraphics::new();
        let mut out = Vec::new();
        kitty.place_at(&mut out, 3, 4, 2, 2, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[3;5H"));
        assert!(text.contains("a=p,i=3,c=2,r=1"));
    }
}
