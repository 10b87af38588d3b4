use std::collections::HashMap;

use glow::HasContext;
use shared::RoomSpec;

use super::camera::OrbitCamera;
use super::mesh::MeshData;
use super::room;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Background color RGB
    pub bg_color: [u8; 3],
    /// Active floor swatch color
    pub floor_color: [f32; 3],
    /// Active wall swatch color
    pub wall_color: [f32; 3],
    /// Placement to draw with the selection tint
    pub highlight: Option<String>,
    /// Selection tint RGB
    pub selection_color: [u8; 3],
}

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    _vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    /// Room shell surfaces, white vertices tinted per draw. Rebuilt only
    /// when the room dimensions change; swatch colors are uniforms.
    room_floor: Option<GpuMesh>,
    room_walls: Option<GpuMesh>,
    room_ceiling: Option<GpuMesh>,
    cached_room: Option<RoomSpec>,
    /// Furniture meshes keyed by placement ID
    scene_meshes: HashMap<String, GpuMesh>,
    /// Version counter to detect layout changes
    last_scene_version: u64,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Self {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG);

        Self {
            mesh_program,
            room_floor: None,
            room_walls: None,
            room_ceiling: None,
            cached_room: None,
            scene_meshes: HashMap::new(),
            last_scene_version: 0,
        }
    }

    /// Rebuild the room shell when the room dimensions change
    pub fn update_room(&mut self, gl: &glow::Context, spec: &RoomSpec) {
        if self.cached_room == Some(*spec) {
            return;
        }

        for old in [
            self.room_floor.take(),
            self.room_walls.take(),
            self.room_ceiling.take(),
        ]
        .into_iter()
        .flatten()
        {
            delete_mesh(gl, &old);
        }

        self.room_floor = Some(upload_mesh(gl, &room::floor(spec)));
        self.room_walls = Some(upload_mesh(gl, &room::walls(spec)));
        self.room_ceiling = Some(upload_mesh(gl, &room::ceiling(spec)));
        self.cached_room = Some(*spec);
    }

    /// Upload pre-built furniture meshes to the GPU, replacing previous ones
    pub fn sync_from_meshes(
        &mut self,
        gl: &glow::Context,
        meshes: &HashMap<String, MeshData>,
        version: u64,
    ) {
        if version == self.last_scene_version && self.scene_meshes.len() == meshes.len() {
            return;
        }
        self.last_scene_version = version;

        // Clear old GPU meshes
        for (_, mesh) in self.scene_meshes.drain() {
            delete_mesh(gl, &mesh);
        }

        // Upload new meshes
        for (id, mesh_data) in meshes {
            let gpu_mesh = upload_mesh(gl, mesh_data);
            self.scene_meshes.insert(id.clone(), gpu_mesh);
        }
    }

    /// Render the room and its furniture
    pub fn paint(&self, gl: &glow::Context, camera: &OrbitCamera, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3];
        let vp = camera.view_projection(aspect);
        let eye = camera.eye_position();
        let wall_height = self
            .cached_room
            .map(|r| r.wall_height as f32)
            .unwrap_or(shared::WALL_HEIGHT_DEFAULT as f32);

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            // Clear viewport area with configured background color
            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            gl.use_program(Some(self.mesh_program));
            set_uniform_mat4(gl, self.mesh_program, "u_mvp", &vp);

            // Fixed key light plus a fill light near the ceiling center
            let light_dir = glam::Vec3::new(0.3, 0.8, 0.5).normalize();
            let point_pos = glam::Vec3::new(0.0, wall_height * 0.9, 0.0);
            set_uniform_vec3(gl, self.mesh_program, "u_light_dir", &light_dir);
            set_uniform_vec3(gl, self.mesh_program, "u_point_pos", &point_pos);
            set_uniform_vec3(gl, self.mesh_program, "u_eye", &eye);

            let tint = glam::Vec3::new(
                params.selection_color[0] as f32 / 255.0,
                params.selection_color[1] as f32 / 255.0,
                params.selection_color[2] as f32 / 255.0,
            );
            set_uniform_vec3(gl, self.mesh_program, "u_tint_color", &tint);

            // Shell surfaces: white geometry multiplied by the swatch color
            set_uniform_f32(gl, self.mesh_program, "u_tint_strength", 0.0);
            set_uniform_vec3(
                gl,
                self.mesh_program,
                "u_mul_color",
                &glam::Vec3::from_array(params.floor_color),
            );
            if let Some(ref floor) = self.room_floor {
                draw_mesh(gl, floor);
            }
            set_uniform_vec3(
                gl,
                self.mesh_program,
                "u_mul_color",
                &glam::Vec3::from_array(params.wall_color),
            );
            if let Some(ref walls) = self.room_walls {
                draw_mesh(gl, walls);
            }
            // The ceiling only draws while the eye is under it, so orbiting
            // above the room still shows the interior
            if eye.y < wall_height {
                if let Some(ref ceiling) = self.room_ceiling {
                    draw_mesh(gl, ceiling);
                }
            }

            // Furniture, with the selection tint on the highlighted one
            set_uniform_vec3(gl, self.mesh_program, "u_mul_color", &glam::Vec3::ONE);
            for (id, mesh) in &self.scene_meshes {
                let selected = params.highlight.as_deref() == Some(id.as_str());
                set_uniform_f32(
                    gl,
                    self.mesh_program,
                    "u_tint_strength",
                    if selected { 0.35 } else { 0.0 },
                );
                draw_mesh(gl, mesh);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    #[allow(dead_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.mesh_program);
        }
        for mesh in [&self.room_floor, &self.room_walls, &self.room_ceiling]
            .into_iter()
            .flatten()
        {
            delete_mesh(gl, mesh);
        }
        for mesh in self.scene_meshes.values() {
            delete_mesh(gl, mesh);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> GpuMesh {
    unsafe {
        let vao = gl.create_vertex_array().unwrap();
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = 9 * 4; // 9 floats * 4 bytes
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);
        // color: location 2
        gl.enable_vertex_attrib_array(2);
        gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 6 * 4);

        let ibo = gl.create_buffer().unwrap();
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        GpuMesh {
            vao,
            _vbo: vbo,
            ibo,
            index_count: data.indices.len() as i32,
        }
    }
}

fn delete_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh._vbo);
        gl.delete_buffer(mesh.ibo);
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> glow::Program {
    unsafe {
        let program = gl.create_program().unwrap();

        let vert = gl.create_shader(glow::VERTEX_SHADER).unwrap();
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER).unwrap();
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            tracing::error!("Program link error: {log}");
        }

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        program
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, value: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), value);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            slice.as_ptr() as *const u8,
            std::mem::size_of_val(slice),
        )
    }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_world;
out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_world = a_position;
    v_normal = a_normal;
    v_color = a_color;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_light_dir;
uniform vec3 u_point_pos;
uniform vec3 u_eye;
uniform vec3 u_mul_color;
uniform vec3 u_tint_color;
uniform float u_tint_strength;

in vec3 v_world;
in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    float diffuse = max(dot(n, u_light_dir), 0.0);

    vec3 to_point = u_point_pos - v_world;
    float dist = length(to_point);
    float atten = 1.0 / (1.0 + 0.15 * dist * dist);
    float point_diffuse = max(dot(n, to_point / dist), 0.0) * atten;

    vec3 to_eye = normalize(u_eye - v_world);
    vec3 halfway = normalize(to_point / dist + to_eye);
    float spec = pow(max(dot(n, halfway), 0.0), 32.0) * 0.15 * atten;

    float light = 0.30 + 0.45 * diffuse + 0.6 * point_diffuse;
    vec3 base = mix(v_color * u_mul_color, u_tint_color, u_tint_strength);
    frag_color = vec4(base * light + vec3(spec), 1.0);
}
"#;
