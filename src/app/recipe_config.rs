use std::time::Duration;

use crate::{config::Config, matcher::Recipe, osc::WandGesture};

const SECTION: &str = "Recipe";
const DEFAULT_NAME: &str = "Elixir";
const DEFAULT_HOLD_SECS: f32 = 2.0;

/// Builds the practice recipe from the `[Recipe]` section.
///
/// Keys: `name`, `ingredients` (comma separated gesture labels) and
/// `hold_secs`. Missing or malformed keys fall back to a three-step recipe
/// over the Wekinator gestures.
pub fn recipe_from_config(config: &Config) -> Recipe {
    let name = config.get_or_default(SECTION, "name", DEFAULT_NAME);

    let ingredients: Vec<String> = match config.get_non_empty(SECTION, "ingredients") {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    let ingredients = if ingredients.is_empty() {
        [
            WandGesture::LeftRightWave,
            WandGesture::UpDownWave,
            WandGesture::CircularMotion,
        ]
        .iter()
        .map(|g| g.name().to_string())
        .collect()
    } else {
        ingredients
    };

    let hold = config
        .get_non_empty(SECTION, "hold_secs")
        .and_then(|raw| raw.parse::<f32>().ok())
        .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
        .filter(|d| !d.is_zero())
        .unwrap_or(Duration::from_secs_f32(DEFAULT_HOLD_SECS));

    Recipe::new(name, ingredients, hold)
}
