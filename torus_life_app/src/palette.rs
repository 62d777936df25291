// palette.rs - Cell colours keyed on neighbour count

use egui::Color32;

pub const BOARD: Color32 = Color32::BLACK;

/// Colour of a live cell with `neighbors` live neighbours.
pub fn alive_color(neighbors: u8) -> Color32 {
    match neighbors {
        0 => Color32::WHITE,
        1 => Color32::RED,
        2 => Color32::GREEN,
        3 => Color32::BLUE,
        _ => Color32::YELLOW,  // About to die of overcrowding
    }
}
