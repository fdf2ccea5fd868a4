use crate::physic_engine::types::Color;

pub const PINK: Color = Color::rgb(0xFF, 0x3F, 0x8E);
pub const CYAN: Color = Color::rgb(0x04, 0xC2, 0xC9);
pub const BLUE: Color = Color::rgb(0x2E, 0x55, 0xFF);
pub const GOLD: Color = Color::rgb(0xFF, 0xD7, 0x00);
pub const ORANGE_RED: Color = Color::rgb(0xFF, 0x45, 0x00);
pub const GREEN_YELLOW: Color = Color::rgb(0xAD, 0xFF, 0x2F);

/// Palette fixe des gerbes : une couleur tirée uniformément par gerbe.
pub const DEFAULT_PALETTE: [Color; 6] = [PINK, CYAN, BLUE, GOLD, ORANGE_RED, GREEN_YELLOW];
