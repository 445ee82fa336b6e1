use crate::render;
use crate::renderer::Renderer;
use crate::settings::Settings;

use std::rc::Rc;

/// An event delivered by the host shell.
///
/// Events are handled synchronously, one at a time, in arrival order. There
/// is no queueing or reordering on this side; the host's delivery order is
/// the processing order.
pub enum Event {
    /// The surface became visible and `context` is current.
    Visible(render::Context),

    /// The surface is going away. GL resources are released before this
    /// returns.
    Hidden,

    /// The drawable size changed.
    Resized { width: u32, height: u32 },

    /// A request to paint one frame. `external` marks requests that
    /// originate outside the owned surface; those are ignored.
    Paint { external: bool },

    /// A touch or click at a position in pixels.
    Touch { x: f32, y: f32 },
}

/// What the host shell should do after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    Quiet,

    /// A frame was drawn and is ready to present.
    Present,
}

/// The last known drawable size in pixels.
///
/// Lifecycle transitions do not reset the size; the host only reports it
/// when it changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The last touch position and the number of touches seen so far.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub x: f32,
    pub y: f32,
    taps: u32,
}

impl InputState {
    pub fn press(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.taps = self.taps.wrapping_add(1);
    }

    /// The green channel for the current touch count.
    pub fn green(&self, step: f32) -> f32 {
        green_after(self.taps, step)
    }
}

/// Green channel intensity after `taps` touches, advancing by `step` per
/// touch and wrapping around at 1.
pub fn green_after(taps: u32, step: f32) -> f32 {
    ((f64::from(taps) * f64::from(step)) % 1.0) as f32
}

/// Owns the renderer and the event-visible state, and dispatches host
/// events.
///
/// The renderer only exists between a `Visible` and a `Hidden` event, so a
/// frame can never touch GL resources while no context is current.
pub struct App {
    settings: Rc<Settings>,

    renderer: Option<Renderer>,
    viewport: ViewportSize,
    input: InputState,
}

impl App {
    pub fn new(settings: &Rc<Settings>) -> Self {
        Self {
            settings: Rc::clone(settings),
            renderer: None,
            viewport: ViewportSize::default(),
            input: InputState::default(),
        }
    }

    pub fn handle(&mut self, event: Event) -> Reply {
        match event {
            Event::Visible(context) => {
                self.acquire_context(&context);
                Reply::Quiet
            }

            Event::Hidden => {
                // Dropping the renderer deletes the program, buffer, and
                // vertex array.
                self.renderer = None;
                Reply::Quiet
            }

            Event::Resized { width, height } => {
                self.viewport = ViewportSize::new(width, height);
                Reply::Quiet
            }

            Event::Paint { external } => self.paint(external),

            Event::Touch { x, y } => {
                self.input.press(x, y);
                Reply::Quiet
            }
        }
    }

    fn acquire_context(&mut self, context: &render::Context) {
        self.renderer = match Renderer::new(context, &self.settings) {
            Ok(renderer) => Some(renderer),
            Err(problem) => {
                log::error!("Failed to set up the GL pipeline: {}", problem);
                None
            }
        };
    }

    fn paint(&mut self, external: bool) -> Reply {
        if external {
            return Reply::Quiet;
        }

        match &self.renderer {
            // An empty viewport means no size event has arrived yet; the
            // touch-to-clip-space mapping would divide by zero.
            Some(renderer) if !self.viewport.is_empty() => {
                renderer.draw(self.viewport, &self.input);
                Reply::Present
            }
            _ => Reply::Quiet,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn app() -> App {
        App::new(&Rc::new(Settings::default()))
    }

    #[test]
    fn cycles_green_by_a_tenth_per_touch() {
        let mut input = InputState::default();

        for _ in 0..3 {
            input.press(10.0, 20.0);
        }

        assert_relative_eq!(input.green(0.1), 0.3, epsilon = 1e-6);
    }

    #[test]
    fn wraps_green_around_after_ten_touches() {
        assert_relative_eq!(green_after(10, 0.1), 0.0, epsilon = 1e-6);
        assert_relative_eq!(green_after(14, 0.1), 0.4, epsilon = 1e-6);
        assert_relative_eq!(green_after(137, 0.1), 0.7, epsilon = 1e-4);
    }

    #[test]
    fn remembers_the_last_touch_position() {
        let mut app = app();

        app.handle(Event::Touch { x: 12.0, y: 34.0 });
        app.handle(Event::Touch { x: 56.0, y: 78.0 });

        assert_eq!(app.input.x, 56.0);
        assert_eq!(app.input.y, 78.0);
    }

    #[test]
    fn skips_painting_without_a_context() {
        let mut app = app();
        app.handle(Event::Resized {
            width: 640,
            height: 480,
        });

        assert_eq!(app.handle(Event::Paint { external: false }), Reply::Quiet);
    }

    #[test]
    fn skips_external_paint_requests() {
        let mut app = app();

        assert_eq!(app.handle(Event::Paint { external: true }), Reply::Quiet);
    }

    #[test]
    fn keeps_the_viewport_across_lifecycle_transitions() {
        let mut app = app();
        app.handle(Event::Resized {
            width: 390,
            height: 844,
        });

        app.handle(Event::Hidden);

        assert!(app.renderer.is_none());
        assert_eq!(app.viewport, ViewportSize::new(390, 844));
    }

    #[test]
    fn skips_painting_before_the_first_resize() {
        let mut app = app();

        assert!(app.viewport.is_empty());
        assert_eq!(app.handle(Event::Paint { external: false }), Reply::Quiet);
    }
}
