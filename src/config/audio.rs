use serde::{Serialize, Deserialize};

/// Volumes for the background track and the one-shot effects, `0.0..=1.0`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_volume: f32,
    pub effect_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            music_volume: 0.15,
            effect_volume: 1.0,
        }
    }
}
