//! DOM overlay and HUD mapping
//!
//! Pure functions from session state to what the page should show. The
//! browser shell applies them; nothing here touches the DOM.

use glam::Vec2;

use crate::sim::{GamePhase, GameState};

/// Playfield width over height
pub const PLAYFIELD_ASPECT: f32 = 3.0 / 2.0;
/// Share of the window width the playfield may take
pub const PLAYFIELD_MAX_WIDTH: f32 = 0.9;
/// Share of the window height the playfield may take
pub const PLAYFIELD_MAX_HEIGHT: f32 = 0.7;

/// Element IDs the shell writes to
pub mod ids {
    pub const CANVAS: &str = "gameCanvas";
    pub const START_SCREEN: &str = "startScreen";
    pub const GAME_OVER: &str = "gameOver";
    pub const INFO: &str = "info";
    pub const SCORE: &str = "score";
    pub const ESCAPED: &str = "escaped";
    pub const FINAL_SCORE: &str = "finalScore";
    pub const START_BUTTON: &str = "startButton";
    pub const RESTART_BUTTON: &str = "restartButton";
}

/// Which overlays are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlays {
    pub start_screen: bool,
    pub game_over: bool,
    pub info: bool,
    pub canvas: bool,
}

impl Overlays {
    pub fn for_phase(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Ready => Self {
                start_screen: true,
                game_over: false,
                info: false,
                canvas: false,
            },
            GamePhase::Running => Self {
                start_screen: false,
                game_over: false,
                info: true,
                canvas: true,
            },
            GamePhase::GameOver => Self {
                start_screen: false,
                game_over: true,
                info: true,
                canvas: true,
            },
        }
    }

    /// (element id, visible) pairs
    pub fn entries(&self) -> [(&'static str, bool); 4] {
        [
            (ids::START_SCREEN, self.start_screen),
            (ids::GAME_OVER, self.game_over),
            (ids::INFO, self.info),
            (ids::CANVAS, self.canvas),
        ]
    }
}

/// Largest 3:2 playfield fitting in 90% of the window width and 70% of its
/// height, never smaller than one pixel per side
pub fn playfield_size(window: Vec2) -> Vec2 {
    let max_w = window.x * PLAYFIELD_MAX_WIDTH;
    let max_h = window.y * PLAYFIELD_MAX_HEIGHT;
    let size = if max_w / PLAYFIELD_ASPECT < max_h {
        Vec2::new(max_w, max_w / PLAYFIELD_ASPECT)
    } else {
        Vec2::new(max_h * PLAYFIELD_ASPECT, max_h)
    };
    size.round().max(Vec2::ONE)
}

/// (element id, text) pairs for the score sinks
pub fn hud_text(state: &GameState) -> Vec<(&'static str, String)> {
    let mut text = vec![
        (ids::SCORE, state.score.to_string()),
        (ids::ESCAPED, state.escaped.to_string()),
    ];
    if state.phase == GamePhase::GameOver {
        text.push((ids::FINAL_SCORE, state.score.to_string()));
    }
    text
}
