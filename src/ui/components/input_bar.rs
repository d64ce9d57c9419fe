//! Input bar component
//!
//! Text input plus a round send button; Enter submits.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let available_width = ui.available_width() - 40.0;

            let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
                .hint_text("Type a message...")
                .desired_width(available_width)
                .margin(egui::Margin::symmetric(12.0, 6.0));

            let response = ui.add(text_edit);
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Message input")
            });

            if response.has_focus()
                && ui.input(|i| i.key_pressed(Key::Enter))
                && !self.state.input_text.trim().is_empty()
            {
                self.state.send_message();
            }

            let can_send = !self.state.input_text.trim().is_empty();
            let button = egui::Button::new(RichText::new("↑").color(egui::Color32::WHITE))
                .fill(if can_send {
                    self.theme.user_bubble
                } else {
                    self.theme.text_muted
                })
                .rounding(egui::Rounding::same(14.0))
                .min_size(Vec2::splat(28.0));

            let send = ui.add_enabled(can_send, button);
            send.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, can_send, "Send message")
            });
            if send.clicked() {
                self.state.send_message();
            }
        });
    }
}
