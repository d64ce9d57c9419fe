//! Turn animation engine
//!
//! Turns one bot reply, plus its optional staged "train of thought" word
//! sets, into a sequenced visual presentation: typing indicator, staggered
//! word fade-ins, stage-by-stage thinning, character-by-character text
//! reveal, and a final dissolve. At most one session animates at a time; a
//! newer turn supersedes the running one at its next suspension point.

pub mod cloud;
pub mod controller;
pub mod reveal;

pub use cloud::{Viewport, WordCloud, WordVisual};
pub use controller::{Phase, Turn, TurnAnimator, VisualState};
pub use reveal::RevealSequence;
