//! Floating thought-word overlay
//!
//! Paints the active session's word cloud over the message area. Stored
//! positions are unclamped; clamping into the visible rect happens here.

use crate::animation::{Viewport, VisualState};
use crate::ui::theme::Theme;
use egui::epaint::TextShape;
use egui::{self, FontId, Pos2, Rect};

const BASE_FONT_SIZE: f32 = 12.0;

pub struct ThoughtOverlay<'a> {
    visuals: &'a VisualState,
    theme: &'a Theme,
}

impl<'a> ThoughtOverlay<'a> {
    pub fn new(visuals: &'a VisualState, theme: &'a Theme) -> Self {
        Self { visuals, theme }
    }

    /// Paint the cloud over `rect`. A no-op while no session is running.
    pub fn paint(self, ui: &mut egui::Ui, rect: Rect) {
        if self.visuals.cloud.is_empty() {
            return;
        }

        let viewport = Viewport {
            width: rect.width(),
            height: rect.height(),
        };
        let painter = ui.painter();

        for visual in self.visuals.cloud.words() {
            if visual.opacity <= 0.0 {
                continue;
            }

            let (x, y) = visual.clamped_position(viewport);
            let pos = Pos2::new(rect.left() + x, rect.top() + y);
            let color = self.theme.thought_word.gamma_multiply(visual.opacity);
            let font = FontId::proportional(BASE_FONT_SIZE * visual.scale);

            let galley = painter.layout_no_wrap(visual.word.clone(), font, color);
            let shape = TextShape::new(pos, galley, color)
                .with_angle(visual.rotation_deg.to_radians());
            painter.add(shape);
        }
    }
}
