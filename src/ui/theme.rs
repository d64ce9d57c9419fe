//! Visual theme
//!
//! Colors and spacing shared by all components.

use egui::{Color32, Rounding};

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub user_bubble: Color32,
    pub assistant_bubble: Color32,
    /// Floating thought words.
    pub thought_word: Color32,
    /// Active state of the thought-process toggle.
    pub accent_active: Color32,
    pub like: Color32,
    pub dislike: Color32,
    pub bubble_rounding: Rounding,
    pub card_rounding: Rounding,
    pub spacing: f32,
    pub spacing_sm: f32,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            bg_primary: Color32::WHITE,
            bg_secondary: Color32::from_rgb(0xF4, 0xF4, 0xF6),
            text_primary: Color32::BLACK,
            text_muted: Color32::from_rgb(0x66, 0x66, 0x66),
            user_bubble: Color32::from_rgb(0xFF, 0xAC, 0x1C),
            assistant_bubble: Color32::from_rgb(0xE9, 0xE9, 0xEB),
            thought_word: Color32::from_rgb(0x66, 0x66, 0x66),
            accent_active: Color32::from_rgb(0xCC, 0xCC, 0xFF),
            like: Color32::from_rgb(0x6F, 0xCF, 0x6F),
            dislike: Color32::from_rgb(0xE8, 0x6A, 0x6A),
            bubble_rounding: Rounding::same(12.0),
            card_rounding: Rounding::same(8.0),
            spacing: 10.0,
            spacing_sm: 6.0,
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_primary;
        ctx.set_visuals(visuals);
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
