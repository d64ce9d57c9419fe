//! UI tests driven through the accessibility tree.
//!
//! These render the real components against a bare (backend-less)
//! `AppState` plus a hand-built `VisualState`, and query the result via
//! egui_kittest and AccessKit.

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use ponder::animation::VisualState;
use ponder::messages::Rating;
use ponder::ui::components::{InputBar, MessageList};
use ponder::ui::{AppState, Theme};

struct TestApp {
    state: AppState,
    theme: Theme,
    visuals: VisualState,
}

impl TestApp {
    fn new() -> Self {
        Self {
            state: AppState::new(),
            theme: Theme::light(),
            visuals: VisualState::default(),
        }
    }
}

fn harness(app: TestApp) -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(320.0, 560.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    MessageList::new(&mut app.state, &app.theme, &app.visuals).show(ui);
                    ui.separator();
                    InputBar::new(&mut app.state, &app.theme).show(ui);
                });
            },
            app,
        )
}

#[test]
fn message_input_exists() {
    let mut harness = harness(TestApp::new());
    harness.run();

    let _input = harness.get_by_label("Message input");
}

#[test]
fn typing_into_the_input_updates_state() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Message input").focus();
    harness.run();

    harness.get_by_label("Message input").type_text("olive");
    harness.run();

    assert_eq!(harness.state().state.input_text, "olive");
}

#[test]
fn sending_appends_a_user_message() {
    let mut harness = harness(TestApp::new());
    harness.run();

    harness.get_by_label("Message input").focus();
    harness.run();
    harness.get_by_label("Message input").type_text("olive");
    harness.run();

    harness.get_by_label("Send message").click();
    harness.run();

    let messages = harness.state().state.messages.get_all();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].is_user());
    assert_eq!(messages[0].text, "olive");
    assert!(harness.state().state.input_text.is_empty());

    let _bubble = harness.get_by_label("User message: olive");
}

#[test]
fn both_senders_render_labeled_bubbles() {
    let app = TestApp::new();
    app.state.messages.add_user("branch");
    app.state.messages.add_assistant("leaf");

    let mut harness = harness(app);
    harness.run();

    let _user = harness.get_by_label("User message: branch");
    let _assistant = harness.get_by_label("Assistant response: leaf");
}

#[test]
fn typing_indicator_replaces_the_bubble_text() {
    let mut app = TestApp::new();
    let id = app.state.messages.add_assistant("");
    app.visuals.typing_for = Some(id);

    let mut harness = harness(app);
    harness.run();

    let _dots = harness.get_by_label("Typing indicator");
}

#[test]
fn partial_reveal_text_is_shown_while_animating() {
    let mut app = TestApp::new();
    let id = app.state.messages.add_assistant("");
    app.visuals.partial = Some((id, "hi th".to_string()));

    let mut harness = harness(app);
    harness.run();

    let _partial = harness.get_by_label("Assistant response: hi th");
}

#[test]
fn clicking_like_records_the_rating_and_hides_controls() {
    let app = TestApp::new();
    let id = app.state.messages.add_assistant("leaf");
    app.state.messages.set_rating_controls_visible(id, true);

    let mut harness = harness(app);
    harness.run();

    harness.get_by_label("Like response").click();
    harness.run();

    let message = harness.state().state.messages.get(id).unwrap();
    assert_eq!(message.rating, Rating::Liked);
    assert!(!message.show_rating_controls);
}

#[test]
fn clicking_the_question_badge_dismisses_it() {
    let app = TestApp::new();
    let id = app.state.messages.add_user("word");
    app.state.messages.set_question_mark(id, true);

    let mut harness = harness(app);
    harness.run();

    harness.get_by_label("Unrelated marker").click();
    harness.run();

    assert!(!harness.state().state.messages.get(id).unwrap().show_question_mark);
}
