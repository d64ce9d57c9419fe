//! Floating thought-word state.
//!
//! A `WordCloud` holds the per-word visuals for one animation session. It
//! is a plain data holder; the controller owns it inside the shared visual
//! state and drives every opacity change.

use rand::Rng;

/// Words may seed this far outside the left edge; the right bound shrinks
/// by the same amount. Clamping back into view happens at render time and
/// never affects membership logic.
pub const EDGE_OVERSCAN: f32 = 35.0;

const ROTATION_LIMIT_DEG: f32 = 15.0;
const SCALE_MIN: f32 = 0.8;
const SCALE_MAX: f32 = 1.2;

/// The rectangle words are scattered over, in message-area pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 260.0,
            height: 430.0,
        }
    }
}

/// One floating word.
#[derive(Debug, Clone, PartialEq)]
pub struct WordVisual {
    pub word: String,
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl WordVisual {
    /// Position clamped into the viewport for rendering. The stored value
    /// stays unclamped.
    pub fn clamped_position(&self, viewport: Viewport) -> (f32, f32) {
        (
            self.x.clamp(0.0, viewport.width),
            self.y.clamp(0.0, viewport.height),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordCloud {
    words: Vec<WordVisual>,
}

impl WordCloud {
    /// Scatter one stage of words over the viewport, hidden. Placement is
    /// independently random per word and per call; duplicate words within
    /// the stage collapse to a single visual.
    pub fn seed(stage: &[String], viewport: Viewport) -> Self {
        let mut rng = rand::thread_rng();
        let mut words: Vec<WordVisual> = Vec::with_capacity(stage.len());

        for word in stage {
            if words.iter().any(|w| &w.word == word) {
                continue;
            }
            words.push(WordVisual {
                word: word.clone(),
                opacity: 0.0,
                x: rng.gen_range(-EDGE_OVERSCAN..viewport.width - EDGE_OVERSCAN),
                y: rng.gen_range(0.0..viewport.height),
                rotation_deg: rng.gen_range(-ROTATION_LIMIT_DEG..ROTATION_LIMIT_DEG),
                scale: rng.gen_range(SCALE_MIN..SCALE_MAX),
            });
        }

        Self { words }
    }

    /// Set the opacity of the visual for `word`, if present.
    pub fn set_opacity(&mut self, word: &str, value: f32) {
        if let Some(visual) = self.words.iter_mut().find(|w| w.word == word) {
            visual.opacity = value.clamp(0.0, 1.0);
        }
    }

    /// Drop visuals failing the predicate.
    pub fn retain<F: FnMut(&WordVisual) -> bool>(&mut self, f: F) {
        self.words.retain(f);
    }

    /// Fade every remaining word out.
    pub fn fade_all(&mut self) {
        for visual in &mut self.words {
            visual.opacity = 0.0;
        }
    }

    /// Words currently visible (opacity above zero), in seed order.
    pub fn visible_words(&self) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| w.opacity > 0.0)
            .map(|w| w.word.as_str())
            .collect()
    }

    pub fn words(&self) -> &[WordVisual] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn seed_places_words_hidden_within_bounds() {
        let viewport = Viewport::default();
        // randomized placement, so sample a few rounds
        for _ in 0..20 {
            let cloud = WordCloud::seed(&stage(&["sun", "moon", "tide"]), viewport);
            assert_eq!(cloud.len(), 3);
            for visual in cloud.words() {
                assert_eq!(visual.opacity, 0.0);
                assert!(visual.x >= -EDGE_OVERSCAN && visual.x < viewport.width - EDGE_OVERSCAN);
                assert!(visual.y >= 0.0 && visual.y < viewport.height);
                assert!(visual.rotation_deg.abs() <= ROTATION_LIMIT_DEG);
                assert!(visual.scale >= SCALE_MIN && visual.scale < SCALE_MAX);
            }
        }
    }

    #[test]
    fn seed_collapses_duplicates() {
        let cloud = WordCloud::seed(&stage(&["echo", "echo", "echo"]), Viewport::default());
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn set_opacity_touches_only_the_named_word() {
        let mut cloud = WordCloud::seed(&stage(&["sun", "moon"]), Viewport::default());
        cloud.set_opacity("sun", 1.0);

        assert_eq!(cloud.visible_words(), vec!["sun"]);
        cloud.set_opacity("sun", 0.0);
        assert!(cloud.visible_words().is_empty());
    }

    #[test]
    fn retain_prunes_by_predicate() {
        let mut cloud = WordCloud::seed(&stage(&["sun", "moon", "tide"]), Viewport::default());
        cloud.retain(|w| w.word != "moon");

        assert_eq!(cloud.len(), 2);
        assert!(cloud.words().iter().all(|w| w.word != "moon"));
    }

    #[test]
    fn fade_all_hides_everything() {
        let mut cloud = WordCloud::seed(&stage(&["sun", "moon"]), Viewport::default());
        cloud.set_opacity("sun", 1.0);
        cloud.set_opacity("moon", 1.0);

        cloud.fade_all();
        assert!(cloud.visible_words().is_empty());
        assert_eq!(cloud.len(), 2);
    }

    #[test]
    fn rendering_clamps_but_storage_does_not() {
        let viewport = Viewport::default();
        let visual = WordVisual {
            word: "drift".to_string(),
            opacity: 1.0,
            x: -20.0,
            y: viewport.height + 50.0,
            rotation_deg: 0.0,
            scale: 1.0,
        };

        let (x, y) = visual.clamped_position(viewport);
        assert_eq!((x, y), (0.0, viewport.height));
        assert_eq!(visual.x, -20.0);
    }
}
