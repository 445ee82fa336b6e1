pub mod app;
pub mod render;
pub mod renderer;
pub mod settings;

pub use app::{App, Event, InputState, Reply, ViewportSize};
pub use renderer::Renderer;
pub use settings::Settings;
