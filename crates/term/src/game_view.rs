//! GameView: maps a `core::Session` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom:
//!
//! ```text
//! row 0   (blank)
//! row 1   help line
//! row 2   status message, centred
//! row 3   score, high score, boost, debug log
//! row 4   ------------------------------------
//! row 5.. playfield (camera window)
//! ```

use crate::camera::Camera;
use crate::core::{SceneBuffer, Session};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Tint, STATUS_AREA_HEIGHT};

pub const HELP_LINE: &str =
    "Type 'e' to exit. 'r' to restart. 'p' to pause. Up/left/right/down to move. 'x' to fire.";
pub const MENU_PROMPT: &str = "Type a level number and hit enter to play: ";

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows left for the playfield under the status area.
    pub fn playfield_height(&self) -> u16 {
        self.height.saturating_sub(STATUS_AREA_HEIGHT)
    }
}

/// Color for a rendering class.
pub fn tint_style(tint: Tint) -> CellStyle {
    match tint {
        Tint::Plain => CellStyle::default(),
        Tint::Player => CellStyle::fg(Rgb::new(80, 200, 255)).bold(),
        Tint::Terrain => CellStyle::fg(Rgb::new(180, 130, 90)),
        Tint::Hazard => CellStyle::fg(Rgb::new(220, 90, 90)).bold(),
        Tint::Fire => CellStyle::fg(Rgb::new(255, 140, 0)).bold(),
        Tint::Pickup => CellStyle::fg(Rgb::new(240, 220, 80)).bold(),
        Tint::Goal => CellStyle::fg(Rgb::new(120, 220, 120)).bold(),
        Tint::Projectile => CellStyle::fg(Rgb::new(200, 200, 200)),
    }
}

/// Single-width stand-in for glyphs terminals draw two columns wide.
pub fn display_glyph(ch: char) -> char {
    match ch {
        '🔥' => '^',
        c => c,
    }
}

/// Terminal renderer for a running level.
#[derive(Debug, Default)]
pub struct GameView {
    scene: SceneBuffer,
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the session into an existing framebuffer.
    ///
    /// Returns the camera used for the playfield.
    pub fn render_into(
        &mut self,
        session: &Session,
        high_score: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Camera {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        self.draw_status_area(fb, session, high_score);

        session.render(&mut self.scene);
        let player = session.player_footprint();
        let camera = Camera::follow(
            self.scene.extent(),
            player.as_slice(),
            viewport.width,
            viewport.playfield_height(),
        );
        for (pos, cell) in self.scene.iter() {
            if let Some((x, y)) = camera.to_screen(pos) {
                fb.put_char(
                    x,
                    y + STATUS_AREA_HEIGHT,
                    display_glyph(cell.glyph),
                    tint_style(cell.tint),
                );
            }
        }
        camera
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&mut self, session: &Session, high_score: u64, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(session, high_score, viewport, &mut fb);
        fb
    }

    fn draw_status_area(&self, fb: &mut FrameBuffer, session: &Session, high_score: u64) {
        let label = CellStyle::default().bold();
        let dim = CellStyle::default().dim();

        fb.put_str(0, 1, HELP_LINE, dim);
        if let Some(msg) = session.status_message() {
            fb.put_centered(2, msg, CellStyle::fg(Rgb::new(255, 255, 255)).bold());
        }

        let mut line = format!(
            "Level {}  Score {}  High {}  Boost {:+}",
            session.level(),
            session.score(),
            high_score,
            session.speed_boost()
        );
        let log = session.debug_log();
        if !log.is_empty() {
            line.push_str("  ");
            line.push_str(&log.joined());
        }
        fb.put_str(0, 3, &line, label);
        fb.hline(4, '-', dim);
    }
}

/// One line of the level select menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem<'a> {
    pub id: u32,
    pub description: &'a str,
}

/// Level select screen: entries listed upward from above the prompt.
#[derive(Debug, Default)]
pub struct MenuView;

impl MenuView {
    pub fn render_into(
        &self,
        items: &[MenuItem<'_>],
        typed: &str,
        notice: Option<&str>,
        high_score: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let h = viewport.height;
        fb.put_str(0, 0, &format!("High score: {}", high_score), CellStyle::default().dim());
        if let Some(notice) = notice {
            fb.put_str(0, 1, notice, CellStyle::fg(Rgb::new(220, 90, 90)).bold());
        }

        for (i, item) in items.iter().enumerate() {
            let Some(y) = h.checked_sub(i as u16 + 4) else {
                break;
            };
            if y <= 1 {
                break;
            }
            fb.put_str(
                3,
                y,
                &format!("{}: {}", item.id, item.description),
                CellStyle::default(),
            );
        }

        let prompt_y = h.saturating_sub(2);
        let bold = CellStyle::default().bold();
        fb.put_str(0, prompt_y, MENU_PROMPT, bold);
        fb.put_str(MENU_PROMPT.len() as u16, prompt_y, typed, bold);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameAction;

    fn find_char(fb: &FrameBuffer, ch: char) -> Option<(u16, u16)> {
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).map(|c| c.ch) == Some(ch) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    #[test]
    fn small_level_drawn_from_bottom() {
        let session = Session::from_level_text(1, "P\n=\n", 1).unwrap();
        let mut view = GameView::new();
        let fb = view.render(&session, 0, Viewport::new(20, 15));

        // Playfield is rows 5..15; game row 0 is screen row 14.
        assert_eq!(fb.get(0, 14).unwrap().ch, '=');
        assert_eq!(fb.get(0, 13).unwrap().ch, 'M');
        assert_eq!(fb.get(0, 12).unwrap().ch, 'M');
        assert_eq!(fb.row_text(4), "-".repeat(20));
    }

    #[test]
    fn status_message_and_score_line() {
        let mut session = Session::from_level_text(3, "P\n=\n", 1).unwrap();
        session.apply_action(GameAction::Pause);
        let mut view = GameView::new();
        let fb = view.render(&session, 12, Viewport::new(60, 12));
        assert!(fb.row_text(2).contains("Game paused"));
        assert!(fb.row_text(3).starts_with("Level 3  Score 0  High 12  Boost +0"));
    }

    #[test]
    fn camera_follows_player_on_wide_level() {
        let mut text = String::from(&" ".repeat(60));
        text.push('P');
        text.push('\n');
        text.push_str(&"=".repeat(100));
        text.push('\n');
        let session = Session::from_level_text(1, &text, 1).unwrap();
        let mut view = GameView::new();
        let mut fb = FrameBuffer::new(1, 1);
        let camera = view.render_into(&session, 0, Viewport::new(20, 10), &mut fb);
        assert_eq!(camera.left, 50);
        assert_eq!(find_char(&fb, 'M'), Some((10, 7)));
    }

    #[test]
    fn fire_drawn_single_width() {
        assert_eq!(display_glyph('🔥'), '^');
        assert_eq!(display_glyph('T'), 'T');
    }

    #[test]
    fn menu_lists_levels_upward() {
        let items = [
            MenuItem {
                id: 1,
                description: "Intro",
            },
            MenuItem {
                id: 2,
                description: "Birds",
            },
        ];
        let mut fb = FrameBuffer::new(60, 10);
        MenuView.render_into(&items, "2", None, 7, Viewport::new(60, 10), &mut fb);
        assert!(fb.row_text(6).starts_with("   1: Intro"));
        assert!(fb.row_text(5).starts_with("   2: Birds"));
        assert!(fb.row_text(8).starts_with(MENU_PROMPT));
        assert_eq!(fb.get(MENU_PROMPT.len() as u16, 8).unwrap().ch, '2');
        assert!(fb.row_text(0).starts_with("High score: 7"));
    }

    #[test]
    fn menu_shows_notice() {
        let mut fb = FrameBuffer::new(40, 8);
        MenuView.render_into(&[], "", Some("No level 4"), 0, Viewport::new(40, 8), &mut fb);
        assert!(fb.row_text(1).starts_with("No level 4"));
    }
}
