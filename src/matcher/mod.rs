//! Gameplay-side consumers of the gesture feed.

pub mod gesture_matcher;
pub mod recipe;

pub use gesture_matcher::{GestureMatcher, MatchEvent};
pub use recipe::{Recipe, RecipeProgress};
