use glint::{App, Reply, Settings};
use glutin::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::Window;
use glutin::PossiblyCurrent;
use std::rc::Rc;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let logical_size = glutin::dpi::LogicalSize::new(640, 480);
    let (context, window, event_loop) = get_rendering_context(logical_size);
    let physical_size = logical_size.to_physical::<u32>(window.window().scale_factor());

    let context = Rc::new(context);
    let mut app = App::new(&Rc::new(Settings::default()));

    app.handle(glint::Event::Visible(Rc::clone(&context)));
    app.handle(glint::Event::Resized {
        width: physical_size.width,
        height: physical_size.height,
    });

    // Touch events carry their own position; mouse clicks use the last
    // reported cursor position.
    let mut cursor = glutin::dpi::PhysicalPosition::new(0.0, 0.0);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::LoopDestroyed => (),

            Event::Resumed => {
                app.handle(glint::Event::Visible(Rc::clone(&context)));
            }

            Event::Suspended => {
                app.handle(glint::Event::Hidden);
            }

            Event::MainEventsCleared => {
                window.window().request_redraw();
            }

            Event::RedrawRequested(_) => {
                if let Reply::Present = app.handle(glint::Event::Paint { external: false }) {
                    window.swap_buffers().unwrap();
                }
            }

            Event::WindowEvent { ref event, .. } => match event {
                WindowEvent::Resized(physical_size) => {
                    window.resize(*physical_size);
                    app.handle(glint::Event::Resized {
                        width: physical_size.width,
                        height: physical_size.height,
                    });
                }

                WindowEvent::CursorMoved { position, .. } => {
                    cursor = *position;
                }

                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    app.handle(glint::Event::Touch {
                        x: cursor.x as f32,
                        y: cursor.y as f32,
                    });
                }

                WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                    app.handle(glint::Event::Touch {
                        x: touch.location.x as f32,
                        y: touch.location.y as f32,
                    });
                }

                WindowEvent::CloseRequested => {
                    app.handle(glint::Event::Hidden);
                    *control_flow = ControlFlow::Exit;
                }

                _ => (),
            },

            _ => (),
        }
    });
}

pub fn get_rendering_context(
    logical_size: glutin::dpi::LogicalSize<u32>,
) -> (
    glow::Context,
    glutin::ContextWrapper<PossiblyCurrent, Window>,
    EventLoop<()>,
) {
    let event_loop = glutin::event_loop::EventLoop::new();

    let window_builder = glutin::window::WindowBuilder::new()
        .with_title("Glint")
        .with_resizable(true)
        .with_inner_size(logical_size);

    let window = glutin::ContextBuilder::new()
        .with_vsync(true)
        .with_double_buffer(Some(true))
        .with_gl_profile(glutin::GlProfile::Core)
        .build_windowed(window_builder, &event_loop)
        .unwrap();
    let window = unsafe { window.make_current().unwrap() };

    let gl =
        unsafe { glow::Context::from_loader_function(|s| window.get_proc_address(s) as *const _) };

    (gl, window, event_loop)
}
