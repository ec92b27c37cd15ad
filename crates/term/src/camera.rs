//! Camera - which part of game space is visible.
//!
//! Game rows grow upward from the ground line; screen rows grow downward.
//! The camera stores the bottom-left game cell of the window and inverts
//! rows when mapping onto the screen.
//!
//! When the whole level fits, the window sits at the origin. Otherwise it
//! keeps the player [`CAMERA_BOTTOM_MARGIN`] rows above the bottom edge and
//! centred horizontally, without scrolling past the left edge or the
//! rightmost drawn column.

use crate::types::{Position, CAMERA_BOTTOM_MARGIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    /// Lowest visible game row.
    pub bottom: i32,
    /// Leftmost visible game column.
    pub left: i32,
    pub width: u16,
    pub height: u16,
}

impl Camera {
    /// Window of `width` x `height` at the origin.
    pub fn at_origin(width: u16, height: u16) -> Self {
        Self {
            bottom: 0,
            left: 0,
            width,
            height,
        }
    }

    /// Place the window around the player.
    ///
    /// `extent` is the highest row and rightmost column of everything drawn.
    pub fn follow(
        extent: Option<(i32, i32)>,
        player: &[Position],
        width: u16,
        height: u16,
    ) -> Self {
        let mut camera = Self::at_origin(width, height);
        let Some((max_row, max_col)) = extent else {
            return camera;
        };
        let w = i32::from(width);
        let h = i32::from(height);
        let player_row = player.iter().map(|p| p.row).min().unwrap_or(0);
        let player_col = player.iter().map(|p| p.col).min().unwrap_or(0);

        if max_row >= h {
            camera.bottom = (player_row - CAMERA_BOTTOM_MARGIN).max(0);
        }
        if max_col >= w {
            let mut left = (player_col - w / 2).max(0);
            if left + w > max_col + 1 {
                left = (max_col + 1 - w).max(0);
            }
            camera.left = left;
        }
        camera
    }

    /// Screen `(x, y)` of a game cell, if it is inside the window.
    pub fn to_screen(&self, pos: Position) -> Option<(u16, u16)> {
        let dy = pos.row - self.bottom;
        let dx = pos.col - self.left;
        if dy < 0 || dx < 0 || dy >= i32::from(self.height) || dx >= i32::from(self.width) {
            return None;
        }
        let y = i32::from(self.height) - dy - 1;
        Some((dx as u16, y as u16))
    }
}
