use crate::app::{InputState, ViewportSize};
use crate::render::{
    self, Buffer, Context, Program, Uniform, UniformValue, VertexArrayObject, VertexBufferLayout,
};
use crate::settings::Settings;

use glow::HasContext;
use std::rc::Rc;

static TRIANGLE_VERT_SHADER: &str =
    include_str!(concat!(env!("OUT_DIR"), "/shaders/triangle.vert"));
static TRIANGLE_FRAG_SHADER: &str =
    include_str!(concat!(env!("OUT_DIR"), "/shaders/triangle.frag"));

const VERTEX_COUNT: i32 = 3;
const COORDS_PER_VERTEX: u32 = 3;

/// The GL pipeline for the triangle: one shader program, one vertex buffer,
/// and the vertex layout recorded in a vertex array.
///
/// All GL objects are deleted when the renderer is dropped, so a renderer
/// must not outlive the context it was created with.
pub struct Renderer {
    context: Context,
    settings: Rc<Settings>,

    triangle_program: Program,
    #[allow(dead_code)]
    triangle_vertices: Buffer,
    triangle: VertexArrayObject,
}

impl Renderer {
    pub fn new(context: &Context, settings: &Rc<Settings>) -> Result<Self, render::Problem> {
        let triangle_program =
            Program::new(context, (TRIANGLE_VERT_SHADER, TRIANGLE_FRAG_SHADER))?;

        let triangle_vertices = Buffer::from_f32(
            context,
            &triangle_vertices(settings.triangle_size),
            glow::ARRAY_BUFFER,
            glow::STATIC_DRAW,
        )?;

        let triangle = VertexArrayObject::new(
            context,
            &triangle_program,
            &[(
                &triangle_vertices,
                VertexBufferLayout {
                    name: "position",
                    size: COORDS_PER_VERTEX,
                    type_: glow::FLOAT,
                    ..Default::default()
                },
            )],
        )?;

        Ok(Self {
            context: Rc::clone(context),
            settings: Rc::clone(settings),
            triangle_program,
            triangle_vertices,
            triangle,
        })
    }

    /// Draw one frame, placing the triangle at the last touch position.
    pub fn draw(&self, viewport: ViewportSize, input: &InputState) {
        let [red, green, blue, alpha] = self.settings.clear_color;

        unsafe {
            self.context
                .viewport(0, 0, viewport.width as i32, viewport.height as i32);
            self.context.clear_color(red, green, blue, alpha);
            self.context.clear(glow::COLOR_BUFFER_BIT);
        }

        self.triangle_program.use_program();

        let offset = clip_offset(input.x, input.y, viewport);
        let color = [1.0, input.green(self.settings.green_step), 0.0, 1.0];
        self.triangle_program.set_uniforms(&[
            &Uniform {
                name: "offset",
                value: UniformValue::Vec2(&offset),
            },
            &Uniform {
                name: "color",
                value: UniformValue::Vec4(&color),
            },
        ]);

        unsafe {
            self.context.bind_vertex_array(Some(self.triangle.id));
            self.context.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);
            self.context.bind_vertex_array(None);
        }
    }
}

/// Map a touch position in pixels to a clip-space offset.
///
/// Pixel Y grows downwards while clip-space Y grows upwards, so the Y axis
/// is flipped.
pub fn clip_offset(x: f32, y: f32, viewport: ViewportSize) -> [f32; 2] {
    [
        (x / viewport.width as f32) * 2.0 - 1.0,
        -((y / viewport.height as f32) * 2.0 - 1.0),
    ]
}

// Top, bottom left, bottom right.
#[rustfmt::skip]
fn triangle_vertices(size: f32) -> [f32; 9] {
    [
        0.0,   size, 0.0,
        -size, -size, 0.0,
        size,  -size, 0.0,
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn maps_the_top_left_corner_to_minus_one_plus_one() {
        let viewport = ViewportSize::new(414, 896);
        let [x, y] = clip_offset(0.0, 0.0, viewport);
        assert_relative_eq!(x, -1.0);
        assert_relative_eq!(y, 1.0);
    }

    #[test]
    fn maps_the_bottom_right_corner_to_plus_one_minus_one() {
        let viewport = ViewportSize::new(414, 896);
        let [x, y] = clip_offset(414.0, 896.0, viewport);
        assert_relative_eq!(x, 1.0);
        assert_relative_eq!(y, -1.0);
    }

    #[test]
    fn maps_the_center_to_the_origin() {
        let viewport = ViewportSize::new(1280, 800);
        let [x, y] = clip_offset(640.0, 400.0, viewport);
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 0.0);
    }

    #[test]
    fn builds_a_symmetric_triangle_in_the_xy_plane() {
        let vertices = triangle_vertices(0.4);

        let top = &vertices[0..3];
        let bottom_left = &vertices[3..6];
        let bottom_right = &vertices[6..9];

        assert_eq!(top, &[0.0, 0.4, 0.0]);
        assert_eq!(bottom_left, &[-0.4, -0.4, 0.0]);
        assert_eq!(bottom_right, &[0.4, -0.4, 0.0]);
    }
}
