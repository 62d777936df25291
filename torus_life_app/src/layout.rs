// layout.rs - Pixel geometry of the board

use egui::{Pos2, Rect, Vec2, pos2};

/// Default edge of one cell in points.
pub const CELL_SIZE: f32 = 16.0;
/// Gap between a cell's square and the disc drawn inside it.
pub const CELL_PADDING: f32 = 2.0;

/// Where the board sits on screen and how big its cells are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin: Pos2,
    pub cells: usize,
    pub cell_size: f32,
    pub padding: f32,
}

impl BoardLayout {
    pub fn new(origin: Pos2, cells: usize, cell_size: f32) -> Self {
        Self {
            origin,
            cells,
            cell_size,
            padding: CELL_PADDING.min(cell_size / 4.0),
        }
    }

    pub fn board_size(&self) -> Vec2 {
        Vec2::splat(self.cell_size * self.cells as f32)
    }

    pub fn board_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.board_size())
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let min = pos2(
            self.origin.x + col as f32 * self.cell_size,
            self.origin.y + row as f32 * self.cell_size,
        );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// Radius of the disc drawn for a cell.
    pub fn cell_radius(&self) -> f32 {
        self.cell_size / 2.0 - self.padding
    }

    /// Maps a pointer position to (row, col); `None` outside the board.
    pub fn cell_at(&self, pos: Pos2) -> Option<(usize, usize)> {
        let x = pos.x - self.origin.x;
        let y = pos.y - self.origin.y;
        if x < 0.0 || y < 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let col = (x / self.cell_size) as usize;
        let row = (y / self.cell_size) as usize;
        (row < self.cells && col < self.cells).then_some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout::new(pos2(50.0, 50.0), 50, CELL_SIZE)
    }

    #[test]
    fn click_maps_to_row_and_column() {
        let layout = layout();
        assert_eq!(layout.cell_at(pos2(50.0, 50.0)), Some((0, 0)));
        assert_eq!(layout.cell_at(pos2(50.0 + 16.0 * 3.0 + 1.0, 50.0 + 16.0 * 7.5)), Some((7, 3)));
        assert_eq!(layout.cell_at(pos2(849.9, 849.9)), Some((49, 49)));
    }

    #[test]
    fn clicks_outside_the_board_are_ignored() {
        let layout = layout();
        assert_eq!(layout.cell_at(pos2(49.0, 60.0)), None);
        assert_eq!(layout.cell_at(pos2(60.0, 10.0)), None);
        assert_eq!(layout.cell_at(pos2(850.0, 60.0)), None);
        assert_eq!(layout.cell_at(pos2(f32::NAN, 60.0)), None);
    }

    #[test]
    fn cell_centres_map_back_to_their_cell() {
        let layout = layout();
        for &(row, col) in &[(0, 0), (12, 40), (49, 0), (49, 49)] {
            let centre = layout.cell_rect(row, col).center();
            assert_eq!(layout.cell_at(centre), Some((row, col)));
        }
    }

    #[test]
    fn padding_shrinks_the_disc() {
        let layout = layout();
        assert_eq!(layout.cell_radius(), 6.0);
        assert_eq!(layout.board_rect().max, pos2(850.0, 850.0));
    }
}
