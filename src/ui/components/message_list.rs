//! Message list component
//!
//! Displays the conversation history. The latest assistant message renders
//! whatever the animation session says it should: a pulsing typing
//! indicator, a partial reveal, or its committed text.

use crate::animation::VisualState;
use crate::messages::{Message, Rating};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText, Sense, Vec2};

pub struct MessageList<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
    visuals: &'a VisualState,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme, visuals: &'a VisualState) -> Self {
        Self {
            state,
            theme,
            visuals,
        }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let messages = self.state.messages.get_all();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing);
                for message in &messages {
                    self.show_message(ui, message);
                    ui.add_space(self.theme.spacing_sm);
                }
                ui.add_space(self.theme.spacing);
            });
    }

    fn show_message(&mut self, ui: &mut egui::Ui, message: &Message) {
        let align = if message.is_user() {
            Align::RIGHT
        } else {
            Align::LEFT
        };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.horizontal(|ui| {
                if message.is_user() {
                    // push the bubble (and badge) to the right edge
                    ui.add_space(ui.available_width() * 0.25);
                    if message.show_question_mark {
                        self.show_question_badge(ui, message);
                    }
                    self.show_bubble(ui, message);
                } else {
                    self.show_bubble(ui, message);
                }
            });

            if !message.is_user() {
                self.show_rating_circles(ui, message);
            }
        });
    }

    fn show_bubble(&mut self, ui: &mut egui::Ui, message: &Message) {
        let (fill, text_color) = if message.is_user() {
            (self.theme.user_bubble, Color32::WHITE)
        } else {
            (self.theme.assistant_bubble, self.theme.text_primary)
        };

        let is_typing = self.visuals.typing_for == Some(message.id);
        let partial = match &self.visuals.partial {
            Some((id, text)) if *id == message.id => Some(text.clone()),
            _ => None,
        };

        let response = egui::Frame::none()
            .fill(fill)
            .rounding(self.theme.bubble_rounding)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.75);
                if is_typing {
                    self.show_typing_indicator(ui);
                } else {
                    let shown = partial.as_deref().unwrap_or(&message.text);
                    let label = ui.label(RichText::new(shown).color(text_color));
                    let accessibility_text = if message.is_user() {
                        format!("User message: {}", shown)
                    } else {
                        format!("Assistant response: {}", shown)
                    };
                    label.widget_info(|| {
                        egui::WidgetInfo::labeled(
                            egui::WidgetType::Label,
                            true,
                            &accessibility_text,
                        )
                    });
                }
            })
            .response;

        // tapping an assistant bubble reveals its rating controls
        if !message.is_user() && response.interact(Sense::click()).clicked() {
            self.state.show_rating_controls(message.id);
        }
    }

    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        let response = ui
            .horizontal(|ui| {
                for i in 0..3 {
                    let t = ui.ctx().input(|input| input.time);
                    let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                    ui.label(
                        RichText::new("●")
                            .size(10.0)
                            .color(self.theme.text_muted.gamma_multiply(alpha)),
                    );
                }
            })
            .response;
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, "Typing indicator")
        });
        ui.ctx().request_repaint();
    }

    fn show_question_badge(&mut self, ui: &mut egui::Ui, message: &Message) {
        let badge = egui::Button::new(
            RichText::new("?")
                .size(12.0)
                .color(self.theme.text_muted),
        )
        .fill(self.theme.assistant_bubble)
        .rounding(egui::Rounding::same(10.0))
        .min_size(Vec2::splat(20.0));

        let response = ui.add(badge).on_hover_text("The bot found this unrelated");
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Unrelated marker")
        });
        if response.clicked() {
            self.state.dismiss_question(message.id);
        }
    }

    fn show_rating_circles(&mut self, ui: &mut egui::Ui, message: &Message) {
        let show_like = message.show_rating_controls || message.rating == Rating::Liked;
        let show_dislike = message.show_rating_controls || message.rating == Rating::Disliked;
        if !show_like && !show_dislike {
            return;
        }

        ui.horizontal(|ui| {
            if show_like {
                self.show_rating_circle(ui, message, true);
            }
            if show_dislike {
                self.show_rating_circle(ui, message, false);
            }
        });
    }

    fn show_rating_circle(&mut self, ui: &mut egui::Ui, message: &Message, liked: bool) {
        let (base, selected, label) = if liked {
            (self.theme.like, message.rating == Rating::Liked, "Like response")
        } else {
            (
                self.theme.dislike,
                message.rating == Rating::Disliked,
                "Dislike response",
            )
        };
        let fill = if selected { base } else { base.gamma_multiply(0.4) };

        let circle = egui::Button::new("")
            .fill(fill)
            .rounding(egui::Rounding::same(8.0))
            .min_size(Vec2::splat(16.0));

        let response = ui.add(circle);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label)
        });
        if response.clicked() {
            self.state.rate_message(message.id, liked);
        }
    }
}
