//! Main application struct and eframe integration

use crate::client::ChatHandle;
use crate::ui::components::{InputBar, MessageList, ThoughtOverlay};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, TopBottomPanel, Vec2};

/// Main Ponder application
pub struct PonderApp {
    state: AppState,
    theme: Theme,
}

impl PonderApp {
    pub fn new(cc: &eframe::CreationContext<'_>, chat: ChatHandle) -> Self {
        let theme = Theme::light();
        theme.apply(&cc.egui_ctx);

        let mut state = AppState::new();
        state.connect(chat);

        Self { state, theme }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("ponder")
                            .size(18.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        // thought-process toggle
                        let fill = if self.state.show_thoughts {
                            self.theme.accent_active
                        } else {
                            self.theme.assistant_bubble
                        };
                        let button = egui::Button::new(
                            RichText::new("◌").size(13.0).color(self.theme.text_muted),
                        )
                        .fill(fill)
                        .rounding(egui::Rounding::same(12.0))
                        .min_size(Vec2::splat(25.0));

                        if ui
                            .add(button)
                            .on_hover_text("Show the bot's train of thought")
                            .clicked()
                        {
                            self.state.show_thoughts = !self.state.show_thoughts;
                        }
                    });
                });

                ui.label(
                    RichText::new(
                        "tap the bot's messages to rate them; the circle up top shows its train of thought",
                    )
                    .size(11.0)
                    .color(self.theme.text_muted),
                );
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                InputBar::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let visuals = self.state.visuals();

                MessageList::new(&mut self.state, &self.theme, &visuals).show(ui);

                // the word cloud floats over the messages
                ThoughtOverlay::new(&visuals, &self.theme).paint(ui, rect);
            });
    }
}

impl eframe::App for PonderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.bootstrap();
        self.state.poll_events();

        self.show_header(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // animation state changes between frames, not on input
        if self.state.is_animating() {
            ctx.request_repaint();
        }
    }
}
