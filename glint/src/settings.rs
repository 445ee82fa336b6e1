use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The background color the frame is cleared to.
    pub clear_color: [f32; 4],

    /// How far the green channel advances on each touch. The channel wraps
    /// around at 1.
    pub green_step: f32,

    /// Half-extent of the triangle in clip space.
    pub triangle_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clear_color: [0.2, 0.2, 0.3, 1.0],
            green_step: 0.1,
            triangle_size: 0.4,
        }
    }
}
