//! Turn sequencing state machine.
//!
//! `TurnAnimator` drives one bot turn through its visual timeline. Every
//! timed wait and every state mutation re-checks a generation counter, so a
//! superseded session stops at its next step without leaving a word frozen
//! mid-fade or a typing indicator that never resolves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

use super::cloud::{Viewport, WordCloud};
use super::reveal::RevealSequence;
use crate::messages::MessageStore;

/// Delay between seeding a stage and the first fade-in.
pub const SETTLE: Duration = Duration::from_millis(50);
/// Gap between consecutive word fade-ins.
pub const FADE_IN_STAGGER: Duration = Duration::from_millis(50);
/// Hold once the intro stage is fully visible.
pub const INTRO_HOLD: Duration = Duration::from_millis(100);
/// Gap between consecutive word removals.
pub const REMOVAL_STAGGER: Duration = Duration::from_millis(100);
/// Hold between stage pairs.
pub const STAGE_HOLD: Duration = Duration::from_millis(150);
/// Hold before the text reveal starts.
pub const PRE_REVEAL_HOLD: Duration = Duration::from_millis(500);
/// Gap between revealed characters.
pub const REVEAL_TICK: Duration = Duration::from_millis(25);
/// Hold between the reveal and the cloud dissolve.
pub const POST_REVEAL_HOLD: Duration = Duration::from_millis(300);
/// Time the dissolved cloud lingers before it is cleared.
pub const FADE_OUT_HOLD: Duration = Duration::from_millis(400);
/// Gap between scripted welcome lines.
pub const WELCOME_GAP: Duration = Duration::from_millis(100);

/// One bot reply plus its optional staged thought data.
#[derive(Debug, Clone)]
pub struct Turn {
    pub final_text: String,
    pub thought_stages: Option<Vec<Vec<String>>>,
}

impl Turn {
    pub fn plain(final_text: impl Into<String>) -> Self {
        Self {
            final_text: final_text.into(),
            thought_stages: None,
        }
    }

    pub fn with_stages(final_text: impl Into<String>, stages: Vec<Vec<String>>) -> Self {
        Self {
            final_text: final_text.into(),
            thought_stages: Some(stages),
        }
    }

    /// Stages usable by the rich path: present, with a non-empty first
    /// stage (only the first stage ever introduces words).
    fn usable_stages(&self) -> Option<&[Vec<String>]> {
        match self.thought_stages.as_deref() {
            Some(stages) if stages.first().is_some_and(|s| !s.is_empty()) => Some(stages),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Typing,
    CloudIntro,
    CloudThinning,
    TextReveal,
    CloudFadeOut,
}

/// Observable animation state, re-read by the UI every frame.
#[derive(Debug, Clone, Default)]
pub struct VisualState {
    pub phase: Phase,
    pub cloud: WordCloud,
    /// Message currently showing the typing indicator.
    pub typing_for: Option<Uuid>,
    /// Message currently being revealed, with its partial text.
    pub partial: Option<(Uuid, String)>,
    /// Final text owed to a message if this session is cut short.
    pending_commit: Option<(Uuid, String)>,
}

struct AnimatorInner {
    generation: AtomicU64,
    state: Mutex<VisualState>,
    store: MessageStore,
    viewport: Viewport,
}

/// Drives turn animations against a message store.
///
/// Cheap to clone; clones share the same session state, so any clone can
/// supersede the running session.
#[derive(Clone)]
pub struct TurnAnimator {
    inner: Arc<AnimatorInner>,
    runtime: Handle,
}

impl TurnAnimator {
    pub fn new(store: MessageStore, runtime: Handle) -> Self {
        Self::with_viewport(store, runtime, Viewport::default())
    }

    pub fn with_viewport(store: MessageStore, runtime: Handle, viewport: Viewport) -> Self {
        Self {
            inner: Arc::new(AnimatorInner {
                generation: AtomicU64::new(0),
                state: Mutex::new(VisualState::default()),
                store,
                viewport,
            }),
            runtime,
        }
    }

    /// Snapshot of the observable state.
    pub fn snapshot(&self) -> VisualState {
        self.inner.state.lock().clone()
    }

    pub fn is_idle(&self) -> bool {
        self.inner.state.lock().phase == Phase::Idle
    }

    /// Animate one turn. Supersedes any running session; the most recent
    /// call always wins.
    ///
    /// With `thoughts_enabled` false, or without usable stages, the turn
    /// takes the plain path: character reveal only, no typing indicator, no
    /// word cloud.
    pub fn run(&self, message_id: Uuid, turn: Turn, thoughts_enabled: bool) -> JoinHandle<()> {
        let session = self.supersede();
        debug!(%message_id, thoughts_enabled, "starting turn session");
        self.runtime
            .spawn(async move { session.drive(message_id, turn, thoughts_enabled).await })
    }

    /// Type out scripted lines through the plain path, one message per
    /// line, under a single session; a real turn cancels the remainder.
    pub fn play_script(&self, lines: Vec<String>) -> JoinHandle<()> {
        let session = self.supersede();
        self.runtime.spawn(async move { session.drive_script(lines).await })
    }

    /// Stop the running session, settle its message, and return to idle.
    pub fn cancel(&self) {
        self.supersede();
    }

    /// Invalidate the current session: bump the generation, clear the
    /// visual state, and commit any text the cut-short session still owed
    /// its message so nothing is left permanently blank.
    fn supersede(&self) -> Session {
        let id = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let pending = {
            let mut state = self.inner.state.lock();
            let pending = state.pending_commit.take();
            *state = VisualState::default();
            pending
        };
        if let Some((message_id, text)) = pending {
            debug!(%message_id, "settling superseded session");
            self.inner.store.set_text(message_id, &text);
        }
        Session {
            inner: Arc::clone(&self.inner),
            id,
        }
    }
}

/// One run of the state machine, pinned to the generation it started with.
struct Session {
    inner: Arc<AnimatorInner>,
    id: u64,
}

impl Session {
    fn is_active(&self) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == self.id
    }

    /// Apply a mutation iff this session is still the active one. The
    /// generation is re-checked under the state lock, so a superseding
    /// session can never interleave with a stale write.
    fn update<F: FnOnce(&mut VisualState)>(&self, f: F) -> bool {
        let mut state = self.inner.state.lock();
        if self.inner.generation.load(Ordering::SeqCst) != self.id {
            return false;
        }
        f(&mut state);
        true
    }

    /// Timed suspension point; false means the session was superseded.
    async fn pause(&self, duration: Duration) -> bool {
        sleep(duration).await;
        self.is_active()
    }

    async fn drive(self, message_id: Uuid, turn: Turn, thoughts_enabled: bool) {
        if !self.update(|s| s.pending_commit = Some((message_id, turn.final_text.clone()))) {
            // superseded before the first step; settle the message directly
            self.inner.store.set_text(message_id, &turn.final_text);
            return;
        }

        let done = match turn.usable_stages().filter(|_| thoughts_enabled) {
            Some(stages) => self.rich(message_id, &turn.final_text, stages).await,
            None => self.plain(message_id, &turn.final_text).await,
        };
        if done {
            debug!(%message_id, "turn session complete");
        }
    }

    async fn drive_script(self, lines: Vec<String>) {
        for line in lines {
            if !self.is_active() {
                return;
            }
            let message_id = self.inner.store.add_assistant("");
            if !self.update(|s| s.pending_commit = Some((message_id, line.clone()))) {
                self.inner.store.set_text(message_id, &line);
                return;
            }
            if !self.reveal(message_id, &line).await {
                return;
            }
            if !self.pause(WELCOME_GAP).await {
                return;
            }
        }
        self.update(|s| *s = VisualState::default());
    }

    /// Reveal-only path: no typing indicator, no word cloud.
    async fn plain(&self, message_id: Uuid, text: &str) -> bool {
        if !self.reveal(message_id, text).await {
            return false;
        }
        self.update(|s| *s = VisualState::default())
    }

    /// Full sequence: typing, staged word cloud, reveal, dissolve.
    async fn rich(&self, message_id: Uuid, text: &str, stages: &[Vec<String>]) -> bool {
        // typing indicator goes up before any words exist
        if !self.update(|s| {
            s.phase = Phase::Typing;
            s.typing_for = Some(message_id);
        }) {
            return false;
        }

        // stage 0: seed hidden, then fade in word by word, in stage order
        let cloud = WordCloud::seed(&stages[0], self.inner.viewport);
        if !self.update(|s| {
            s.phase = Phase::CloudIntro;
            s.cloud = cloud;
        }) {
            return false;
        }
        if !self.pause(SETTLE).await {
            return false;
        }
        for word in &stages[0] {
            if !self.update(|s| s.cloud.set_opacity(word, 1.0)) {
                return false;
            }
            if !self.pause(FADE_IN_STAGGER).await {
                return false;
            }
        }
        if !self.pause(INTRO_HOLD).await {
            return false;
        }

        // thin the cloud one stage pair at a time; removals are staggered
        // like the fade-ins
        for i in 0..stages.len().saturating_sub(1) {
            let (current, next) = (&stages[i], &stages[i + 1]);
            if !self.update(|s| s.phase = Phase::CloudThinning) {
                return false;
            }
            for word in current.iter().filter(|w| !next.contains(*w)) {
                if !self.update(|s| s.cloud.set_opacity(word, 0.0)) {
                    return false;
                }
                if !self.pause(REMOVAL_STAGGER).await {
                    return false;
                }
            }
            if !self.update(|s| s.cloud.retain(|v| next.contains(&v.word))) {
                return false;
            }
            if i + 2 < stages.len() && !self.pause(STAGE_HOLD).await {
                return false;
            }
        }

        // finale: resolve the typing indicator into the revealed reply,
        // then dissolve whatever is left of the cloud
        if !self.pause(PRE_REVEAL_HOLD).await {
            return false;
        }
        if !self.update(|s| s.typing_for = None) {
            return false;
        }
        if !self.reveal(message_id, text).await {
            return false;
        }
        if !self.pause(POST_REVEAL_HOLD).await {
            return false;
        }
        if !self.update(|s| {
            s.phase = Phase::CloudFadeOut;
            s.cloud.fade_all();
        }) {
            return false;
        }
        if !self.pause(FADE_OUT_HOLD).await {
            return false;
        }
        self.update(|s| *s = VisualState::default())
    }

    /// Publish prefixes one character at a time, then commit the full text
    /// to the store exactly once. A cancelled reveal never commits.
    async fn reveal(&self, message_id: Uuid, text: &str) -> bool {
        let sequence = RevealSequence::new(text);
        if sequence.char_count() > 0 {
            if !self.update(|s| s.phase = Phase::TextReveal) {
                return false;
            }
            for prefix in sequence.prefixes() {
                if !self.update(|s| s.partial = Some((message_id, prefix.to_string()))) {
                    return false;
                }
                if !self.pause(REVEAL_TICK).await {
                    return false;
                }
            }
        }
        if !self.update(|s| {
            s.partial = None;
            s.pending_commit = None;
        }) {
            return false;
        }
        self.inner.store.set_text(message_id, sequence.text());
        true
    }
}
