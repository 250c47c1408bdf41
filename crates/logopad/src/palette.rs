//! Pen colors.
//!
//! Scripts pick colors by number. Numbers up to 255 index a fixed 256-entry colormap; anything
//! bigger is a packed `0xRRGGBB00` color.

use serde::{Deserialize, Serialize};

const MUTED: [(u8, u8, u8); 8] = [
    (0x55, 0x55, 0x55),
    (0xc6, 0x71, 0x71),
    (0x71, 0xc6, 0x71),
    (0x8e, 0x8e, 0x38),
    (0x71, 0x71, 0xc6),
    (0x8e, 0x38, 0x8e),
    (0x38, 0x8e, 0x8e),
    (0xaa, 0xaa, 0xaa),
];

const GRAY_RAMP: u32 = 32;
const GRAY_STEPS: u32 = 24;
const COLOR_CUBE: u32 = 56;
const NUM_RED: u32 = 5;
const NUM_GREEN: u32 = 8;
const NUM_BLUE: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenColor(pub u32);

impl Default for PenColor {
    fn default() -> PenColor {
        PenColor::BLACK
    }
}

impl PenColor {
    pub const BLACK: PenColor = PenColor(0);
    pub const RED: PenColor = PenColor(1);
    pub const GREEN: PenColor = PenColor(2);
    pub const YELLOW: PenColor = PenColor(3);
    pub const BLUE: PenColor = PenColor(4);
    pub const MAGENTA: PenColor = PenColor(5);
    pub const CYAN: PenColor = PenColor(6);
    pub const WHITE: PenColor = PenColor(7);

    pub fn rgb(self) -> (u8, u8, u8) {
        let i = self.0;
        match i {
            0..=7 => {
                let on = |bit: u32| if i & bit != 0 { 0xff } else { 0 };
                (on(1), on(2), on(4))
            }
            8..=15 => MUTED[(i - 8) as usize],
            // Unassigned slots.
            16..=31 => (0x80, 0x80, 0x80),
            32..=55 => {
                let level = ((i - GRAY_RAMP) * 255 / (GRAY_STEPS - 1)) as u8;
                (level, level, level)
            }
            56..=255 => {
                let n = i - COLOR_CUBE;
                let g = n % NUM_GREEN;
                let r = (n / NUM_GREEN) % NUM_RED;
                let b = n / (NUM_GREEN * NUM_RED);
                (
                    (r * 255 / (NUM_RED - 1)) as u8,
                    (g * 255 / (NUM_GREEN - 1)) as u8,
                    (b * 255 / (NUM_BLUE - 1)) as u8,
                )
            }
            _ => ((i >> 24) as u8, (i >> 16) as u8, (i >> 8) as u8),
        }
    }

    /// The color as a CSS/SVG hex string, like `#ff0000`.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}
