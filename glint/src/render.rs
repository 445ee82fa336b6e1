use glow::HasContext;
use rustc_hash::FxHashMap;
use std::rc::Rc;
use thiserror::Error;

pub type Context = Rc<glow::Context>;
type GlDataType = u32;
type Result<T> = std::result::Result<T, Problem>;

#[derive(Error, Debug)]
pub enum Problem {
    #[error("Cannot create buffer")]
    CannotCreateBuffer,

    #[error("Cannot create vertex array")]
    CannotCreateVertexArray,

    #[error("{}", match .0 {
        Some(n) => format!("Cannot create shader: {}", n),
        None => format!("Cannot create shader"),
    })]
    CannotCreateShader(Option<String>),

    #[error("Cannot create program")]
    CannotCreateProgram,

    #[error("Cannot link program: {0}")]
    CannotLinkProgram(String),

    #[error("Vertex attribute type is not supported")]
    CannotBindUnsupportedVertexType,
}

#[derive(Debug)]
pub struct Buffer {
    context: Context,
    pub id: glow::Buffer,
    pub size: usize,
    pub type_: u32,
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_buffer(self.id);
        }
    }
}

impl Buffer {
    pub fn from_bytes(
        context: &Context,
        data: &[u8],
        buffer_type: u32,
        usage: u32,
    ) -> Result<Self> {
        let buffer = unsafe {
            let buffer = context
                .create_buffer()
                .map_err(|_| Problem::CannotCreateBuffer)?;

            context.bind_buffer(buffer_type, Some(buffer));
            context.buffer_data_u8_slice(buffer_type, data, usage);
            context.bind_buffer(buffer_type, None);

            buffer
        };

        Ok(Self {
            context: Rc::clone(context),
            id: buffer,
            size: data.len(),
            type_: buffer_type,
        })
    }

    pub fn from_f32(context: &Context, data: &[f32], buffer_type: u32, usage: u32) -> Result<Self> {
        Self::from_bytes(context, bytemuck::cast_slice(data), buffer_type, usage)
    }
}

pub struct Program {
    context: Context,
    pub program: glow::Program,
    attributes: FxHashMap<String, AttributeInfo>,
    uniforms: FxHashMap<String, UniformInfo>,
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_program(self.program);
        }
    }
}

impl Program {
    pub fn new(context: &Context, shaders: (&str, &str)) -> Result<Self> {
        let vertex_shader = compile_shader(context, glow::VERTEX_SHADER, shaders.0)?;
        let fragment_shader = compile_shader(context, glow::FRAGMENT_SHADER, shaders.1)?;

        let program = unsafe {
            let program = context
                .create_program()
                .map_err(|_| Problem::CannotCreateProgram)?;
            context.attach_shader(program, vertex_shader);
            context.attach_shader(program, fragment_shader);
            context.link_program(program);

            if !context.get_program_link_status(program) {
                return Err(Problem::CannotLinkProgram(
                    context.get_program_info_log(program),
                ));
            }

            // Delete the shaders to free up memory
            context.detach_shader(program, vertex_shader);
            context.detach_shader(program, fragment_shader);
            context.delete_shader(vertex_shader);
            context.delete_shader(fragment_shader);

            program
        };

        // Get attribute locations
        let mut attributes = FxHashMap::default();
        unsafe {
            let attribute_count = context.get_active_attributes(program);
            for num in 0..attribute_count {
                if let Some(info) = context.get_active_attribute(program, num) {
                    if let Some(location) = context.get_attrib_location(program, &info.name) {
                        attributes.insert(
                            info.name,
                            AttributeInfo {
                                type_: info.atype,
                                size: info.size as u32,
                                location,
                            },
                        );
                    }
                }
            }
        }

        // Get uniform locations
        let mut uniforms = FxHashMap::default();
        unsafe {
            let uniform_count = context.get_active_uniforms(program);
            for num in 0..uniform_count {
                if let Some(info) = context.get_active_uniform(program, num) {
                    if let Some(location) = context.get_uniform_location(program, &info.name) {
                        uniforms.insert(
                            info.name,
                            UniformInfo {
                                type_: info.utype,
                                size: info.size,
                                location,
                            },
                        );
                    }
                }
            }
        }

        Ok(Program {
            context: Rc::clone(context),
            program,
            attributes,
            uniforms,
        })
    }

    pub fn use_program(&self) {
        unsafe {
            self.context.use_program(Some(self.program));
        }
    }

    pub fn set_uniforms(&self, uniforms: &[&Uniform]) {
        for uniform in uniforms.iter() {
            self.set_uniform(uniform);
        }
    }

    pub fn set_uniform(&self, uniform: &Uniform) {
        let context = &self.context;
        self.use_program();

        unsafe {
            match uniform.value {
                UniformValue::Vec2(value) => context.uniform_2_f32(
                    self.get_uniform_location(uniform.name).as_ref(),
                    value[0],
                    value[1],
                ),

                UniformValue::Vec4(value) => context.uniform_4_f32(
                    self.get_uniform_location(uniform.name).as_ref(),
                    value[0],
                    value[1],
                    value[2],
                    value[3],
                ),
            }
        }
    }

    pub fn get_attrib_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).map(|info| info.location)
    }

    pub fn get_uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        self.uniforms.get(name).map(|info| info.location.clone())
    }
}

#[allow(dead_code)]
#[derive(Clone)]
struct AttributeInfo {
    type_: u32,
    size: u32,
    location: u32,
}

#[allow(dead_code)]
#[derive(Clone)]
struct UniformInfo {
    type_: u32,
    size: i32,
    location: glow::UniformLocation,
}

pub struct Uniform<'a> {
    pub name: &'static str,
    pub value: UniformValue<'a>,
}

#[derive(Clone)]
pub enum UniformValue<'a> {
    Vec2(&'a [f32; 2]),
    Vec4(&'a [f32; 4]),
}

pub fn compile_shader(context: &Context, shader_type: u32, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = context
            .create_shader(shader_type)
            .map_err(|_| Problem::CannotCreateShader(None))?;
        context.shader_source(shader, source);
        context.compile_shader(shader);

        if context.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            Err(Problem::CannotCreateShader(Some(
                context.get_shader_info_log(shader),
            )))
        }
    }
}

#[derive(Default)]
pub struct VertexBufferLayout {
    pub name: &'static str,
    pub size: u32,
    pub type_: GlDataType,
    pub stride: u32,
    pub offset: u32,
}

pub struct VertexArrayObject {
    context: Context,
    pub id: glow::VertexArray,
}

impl Drop for VertexArrayObject {
    fn drop(&mut self) {
        unsafe {
            self.context.delete_vertex_array(self.id);
        }
    }
}

impl VertexArrayObject {
    pub fn new(
        context: &Context,
        program: &Program,
        vertices: &[(&Buffer, VertexBufferLayout)],
    ) -> Result<Self> {
        let id = unsafe {
            context
                .create_vertex_array()
                .map_err(|_| Problem::CannotCreateVertexArray)?
        };

        let vao = Self {
            id,
            context: Rc::clone(context),
        };

        unsafe {
            vao.context.bind_vertex_array(Some(vao.id));

            for (vertex, layout) in vertices.iter() {
                bind_attributes(&vao.context, program, vertex, layout)?;
            }

            vao.context.bind_vertex_array(None);
        }

        Ok(vao)
    }
}

pub fn bind_attributes(
    context: &Context,
    program: &Program,
    buffer: &Buffer,
    buffer_layout: &VertexBufferLayout,
) -> Result<()> {
    unsafe {
        context.bind_buffer(glow::ARRAY_BUFFER, Some(buffer.id));

        if let Some(location) = program.get_attrib_location(buffer_layout.name) {
            context.enable_vertex_attrib_array(location);

            match buffer_layout.type_ {
                glow::FLOAT => context.vertex_attrib_pointer_f32(
                    location,
                    buffer_layout.size as i32,
                    buffer_layout.type_,
                    false,
                    buffer_layout.stride as i32,
                    buffer_layout.offset as i32,
                ),
                glow::UNSIGNED_SHORT | glow::UNSIGNED_INT | glow::INT => context
                    .vertex_attrib_pointer_i32(
                        location,
                        buffer_layout.size as i32,
                        buffer_layout.type_,
                        buffer_layout.stride as i32,
                        buffer_layout.offset as i32,
                    ),
                _ => return Err(Problem::CannotBindUnsupportedVertexType),
            };
        }

        context.bind_buffer(glow::ARRAY_BUFFER, None);
    }

    Ok(())
}
