use std::time::Duration;

/// Outcome of [`Recipe::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeProgress {
    /// Moved on to the ingredient at this index.
    Next(usize),
    /// The last ingredient was brewed. The cursor stays on it until [`Recipe::reset`].
    Complete,
}

/// A potion: ordered gesture names, each held for `required_hold`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub required_hold: Duration,
    current: usize,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
        required_hold: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            required_hold,
            current: 0,
        }
    }

    /// Gesture expected next, or `None` for a recipe without ingredients.
    pub fn current_ingredient(&self) -> Option<&str> {
        self.ingredients.get(self.current).map(String::as_str)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self) -> RecipeProgress {
        if self.current + 1 >= self.ingredients.len() {
            return RecipeProgress::Complete;
        }
        self.current += 1;
        RecipeProgress::Next(self.current)
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Share of the potion filled by one ingredient; 0 when there are none.
    pub fn ingredient_fraction(&self) -> f32 {
        if self.ingredients.is_empty() {
            return 0.0;
        }
        1.0 / self.ingredients.len() as f32
    }
}
