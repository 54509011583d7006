//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
// -----------------------------------------------------------------------------
// Ported to rust from https://github.com/rxi/microui/ and the original license
//
// Copyright (c) 2020 rxi
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.
//
//! OpenGL implementation of [`GraphicsBackend`] on top of `glow`.

use std::collections::HashMap;
use std::mem::{offset_of, size_of};
use std::sync::Arc;

use glow::HasContext;

use crate::shader::{FRAGMENT_SHADER, VERTEX_SHADER};
use crate::*;

/// Column-major orthographic projection.
pub(crate) fn ortho4(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> [f32; 16] {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    let r00 = 2.0 / width;
    let r11 = 2.0 / height;
    let r22 = -2.0 / depth;
    let r03 = -(right + left) / width;
    let r13 = -(top + bottom) / height;
    let r23 = -(far + near) / depth;
    [r00, 0.0, 0.0, 0.0, 0.0, r11, 0.0, 0.0, 0.0, 0.0, r22, 0.0, r03, r13, r23, 1.0]
}

// (location, component count, byte offset)
const ATTRIBUTES: [(u32, i32, usize); 11] = [
    (0, 2, offset_of!(Vertex, pos)),
    (1, 4, offset_of!(Vertex, border_color)),
    (2, 1, offset_of!(Vertex, border_width)),
    (3, 4, offset_of!(Vertex, color)),
    (4, 2, offset_of!(Vertex, texcoord)),
    (5, 1, offset_of!(Vertex, tex_index)),
    (6, 2, offset_of!(Vertex, scale)),
    (7, 2, offset_of!(Vertex, pos_px)),
    (8, 1, offset_of!(Vertex, corner_radius)),
    (10, 2, offset_of!(Vertex, min_coord)),
    (11, 2, offset_of!(Vertex, max_coord)),
];

unsafe fn create_program(gl: &glow::Context, vs: &str, fs: &str) -> Result<glow::NativeProgram> {
    unsafe {
        let program = gl.create_program().map_err(WarpError::Backend)?;
        let mut shaders = Vec::with_capacity(2);
        for (stage, kind, source) in [("vertex", glow::VERTEX_SHADER, vs), ("fragment", glow::FRAGMENT_SHADER, fs)] {
            let shader = gl.create_shader(kind).map_err(WarpError::Backend)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                for s in shaders {
                    gl.delete_shader(s);
                }
                gl.delete_program(program);
                return Err(WarpError::ShaderCompile { stage, log });
            }
            gl.attach_shader(program, shader);
            shaders.push(shader);
        }

        gl.link_program(program);
        let linked = gl.get_program_link_status(program);
        let log = if linked { String::new() } else { gl.get_program_info_log(program) };
        for shader in shaders {
            gl.detach_shader(program, shader);
            gl.delete_shader(shader);
        }
        if !linked {
            gl.delete_program(program);
            return Err(WarpError::ShaderLink(log));
        }
        Ok(program)
    }
}

struct Pipeline {
    program: glow::NativeProgram,
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
    ibo: glow::NativeBuffer,
    u_proj: Option<glow::NativeUniformLocation>,
    u_screen_size: Option<glow::NativeUniformLocation>,
    u_textures: Option<glow::NativeUniformLocation>,
}

/// Batch backend for an OpenGL 4.5 core context.
///
/// A backend whose shaders failed to build stays usable: [`GlowBackend::is_ready`] returns `false` and draws
/// are dropped, while textures are still created so asset loading keeps working.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
    pipeline: Option<Pipeline>,
    textures: HashMap<u32, glow::NativeTexture>,
    next_handle: u32,
    width: u32,
    height: u32,
}

impl GlowBackend {
    /// Builds the batch program and buffers. Shader errors are logged and leave the backend not ready.
    ///
    /// # Safety
    /// `gl` must be current on the calling thread for the lifetime of the backend.
    pub unsafe fn new(gl: Arc<glow::Context>, width: u32, height: u32) -> Result<Self> {
        let pipeline = match unsafe { Self::create_pipeline(&gl) } {
            Ok(p) => Some(p),
            Err(e @ (WarpError::ShaderCompile { .. } | WarpError::ShaderLink(_))) => {
                log::error!("{}", e);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self { gl, pipeline, textures: HashMap::new(), next_handle: 1, width, height })
    }

    unsafe fn create_pipeline(gl: &glow::Context) -> Result<Pipeline> {
        unsafe {
            let program = create_program(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;
            let vao = gl.create_vertex_array().map_err(WarpError::Backend)?;
            let vbo = gl.create_buffer().map_err(WarpError::Backend)?;
            let ibo = gl.create_buffer().map_err(WarpError::Backend)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
            let stride = size_of::<Vertex>() as i32;
            for (location, size, offset) in ATTRIBUTES {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, size, glow::FLOAT, false, stride, offset as i32);
            }
            gl.bind_vertex_array(None);
            debug_assert_eq!(gl.get_error(), 0);

            Ok(Pipeline {
                program,
                vao,
                vbo,
                ibo,
                u_proj: gl.get_uniform_location(program, "u_proj"),
                u_screen_size: gl.get_uniform_location(program, "u_screen_size"),
                u_textures: gl.get_uniform_location(program, "u_textures"),
            })
        }
    }

    /// `false` when the batch program failed to compile or link.
    pub fn is_ready(&self) -> bool { self.pipeline.is_some() }

    /// Shared GL context.
    pub fn gl(&self) -> &Arc<glow::Context> { &self.gl }

    /// Clears the color buffer.
    pub fn clear(&mut self, color: Color) {
        unsafe {
            self.gl.viewport(0, 0, self.width as i32, self.height as i32);
            self.gl.clear_color(color.r as f32 / 255.0, color.g as f32 / 255.0, color.b as f32 / 255.0, color.a as f32 / 255.0);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}

impl GraphicsBackend for GlowBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
    }

    fn draw(&mut self, vertices: &[Vertex], indices: &[u32], textures: &[TextureHandle]) {
        let Some(p) = &self.pipeline else { return };
        if indices.is_empty() {
            return;
        }
        let gl = &self.gl;
        unsafe {
            gl.viewport(0, 0, self.width as i32, self.height as i32);
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);

            gl.use_program(Some(p.program));
            let proj = ortho4(0.0, self.width as f32, self.height as f32, 0.0, -1.0, 1.0);
            gl.uniform_matrix_4_f32_slice(p.u_proj.as_ref(), false, &proj);
            gl.uniform_2_f32(p.u_screen_size.as_ref(), self.width as f32, self.height as f32);

            let units: Vec<i32> = (0..MAX_TEX_COUNT_BATCH as i32).collect();
            gl.uniform_1_i32_slice(p.u_textures.as_ref(), &units);
            for (unit, handle) in textures.iter().enumerate().take(MAX_TEX_COUNT_BATCH) {
                gl.active_texture(glow::TEXTURE0 + unit as u32);
                gl.bind_texture(glow::TEXTURE_2D, self.textures.get(&handle.0).copied());
            }

            gl.bind_vertex_array(Some(p.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(p.vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(vertices), glow::DYNAMIC_DRAW);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(p.ibo));
            gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(indices), glow::DYNAMIC_DRAW);
            debug_assert_eq!(gl.get_error(), 0);

            gl.draw_elements(glow::TRIANGLES, indices.len() as i32, glow::UNSIGNED_INT, 0);
            debug_assert_eq!(gl.get_error(), 0);

            gl.bind_vertex_array(None);
            gl.use_program(None);
            gl.active_texture(glow::TEXTURE0);
        }
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> Result<TextureHandle> {
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(WarpError::Backend(format!("expected {} bytes for a {}x{} texture, got {}", width * height * 4, width, height, rgba.len())));
        }
        let gl = &self.gl;
        let filter = match filter {
            TextureFilter::Linear => glow::LINEAR,
            TextureFilter::Nearest => glow::NEAREST,
        } as i32;
        let texture = unsafe {
            let texture = gl.create_texture().map_err(WarpError::Backend)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(rgba)),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
            let err = gl.get_error();
            if err != glow::NO_ERROR {
                gl.delete_texture(texture);
                return Err(WarpError::Backend(format!("glTexImage2D failed with 0x{:x}", err)));
            }
            texture
        };
        let handle = self.next_handle;
        self.next_handle += 1;
        self.textures.insert(handle, texture);
        Ok(TextureHandle(handle))
    }

    fn destroy_texture(&mut self, handle: TextureHandle) {
        if let Some(texture) = self.textures.remove(&handle.0) {
            unsafe { self.gl.delete_texture(texture) }
        }
    }
}

impl Drop for GlowBackend {
    fn drop(&mut self) {
        unsafe {
            for (_, texture) in self.textures.drain() {
                self.gl.delete_texture(texture);
            }
            if let Some(p) = self.pipeline.take() {
                self.gl.delete_buffer(p.vbo);
                self.gl.delete_buffer(p.ibo);
                self.gl.delete_vertex_array(p.vao);
                self.gl.delete_program(p.program);
            }
        }
    }
}
