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
//! Batch shader sources and a CPU reference of the fragment stage.
//!
//! The fragment stage draws every quad as a rounded box: fragments outside the per-vertex clip rect are
//! discarded, rounded quads are carved out of a full-screen quad with a signed distance field, and borders are
//! the ring between the outer box and a box inset by the border width.

use crate::Vertex;

/// Vertex stage.
pub const VERTEX_SHADER: &str = r#"#version 450 core
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec4 a_border_color;
layout (location = 2) in float a_border_width;
layout (location = 3) in vec4 a_color;
layout (location = 4) in vec2 a_texcoord;
layout (location = 5) in float a_tex_index;
layout (location = 6) in vec2 a_scale;
layout (location = 7) in vec2 a_pos_px;
layout (location = 8) in float a_corner_radius;
layout (location = 10) in vec2 a_min_coord;
layout (location = 11) in vec2 a_max_coord;

uniform mat4 u_proj;

out vec4 v_border_color;
out float v_border_width;
out vec4 v_color;
out vec2 v_texcoord;
out float v_tex_index;
flat out vec2 v_scale;
flat out vec2 v_pos_px;
out float v_corner_radius;
out vec2 v_min_coord;
out vec2 v_max_coord;

void main() {
    v_border_color = a_border_color;
    v_border_width = a_border_width;
    v_color = a_color;
    v_texcoord = a_texcoord;
    v_tex_index = a_tex_index;
    v_scale = a_scale;
    v_pos_px = a_pos_px;
    v_corner_radius = a_corner_radius;
    v_min_coord = a_min_coord;
    v_max_coord = a_max_coord;
    gl_Position = u_proj * vec4(a_pos, 0.0, 1.0);
}
"#;

/// Fragment stage.
pub const FRAGMENT_SHADER: &str = r#"#version 450 core
out vec4 o_color;

in vec4 v_border_color;
in float v_border_width;
in vec4 v_color;
in vec2 v_texcoord;
in float v_tex_index;
flat in vec2 v_scale;
flat in vec2 v_pos_px;
in float v_corner_radius;
in vec2 v_min_coord;
in vec2 v_max_coord;

uniform sampler2D u_textures[32];
uniform vec2 u_screen_size;

float rounded_box_sdf(vec2 p, vec2 size, float radius) {
    return length(max(abs(p) - size + radius, 0.0)) - radius;
}

float box_distance(vec2 location, vec2 size, float radius) {
    return rounded_box_sdf(gl_FragCoord.xy - location - size / 2.0, size / 2.0, radius);
}

void main() {
    float flipped_y = u_screen_size.y - gl_FragCoord.y;
    if (v_min_coord.y != -1.0 && flipped_y < v_min_coord.y) discard;
    if (v_max_coord.y != -1.0 && flipped_y > v_max_coord.y) discard;
    if (v_min_coord.x != -1.0 && gl_FragCoord.x < v_min_coord.x) discard;
    if (v_max_coord.x != -1.0 && gl_FragCoord.x > v_max_coord.x) discard;

    vec4 opaque = v_color;
    if (v_tex_index != -1.0) {
        opaque = texture(u_textures[int(v_tex_index)], v_texcoord) * v_color;
    }

    vec2 size = v_scale;
    vec2 location = vec2(v_pos_px.x, u_screen_size.y - v_pos_px.y - size.y);
    vec2 inner_location = location + vec2(v_border_width);
    vec2 inner_size = size - vec2(v_border_width * 2.0);

    if (v_corner_radius != 0.0) {
        float radius = v_corner_radius * 2.0;
        float alpha = 1.0 - smoothstep(0.0, 2.0, box_distance(location, size, radius));
        vec3 fill = opaque.rgb;
        if (v_border_width != 0.0 && box_distance(inner_location, inner_size, radius) > 0.0) {
            fill = v_border_color.rgb;
        }
        float target_alpha = v_border_width != 0.0 ? alpha : opaque.a;
        o_color = mix(vec4(0.0), vec4(fill, target_alpha), alpha);
    } else {
        o_color = opaque;
        if (v_border_width != 0.0 && box_distance(inner_location, inner_size, v_corner_radius) > 0.0) {
            o_color = v_border_color;
        }
    }
}
"#;

/// Signed distance from `p` to a box of half extents `size` with corners rounded by `radius`.
pub fn rounded_box_sdf(p: [f32; 2], size: [f32; 2], radius: f32) -> f32 {
    let qx = (p[0].abs() - size[0] + radius).max(0.0);
    let qy = (p[1].abs() - size[1] + radius).max(0.0);
    (qx * qx + qy * qy).sqrt() - radius
}

/// Hermite interpolation matching GLSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn box_distance(frag: [f32; 2], location: [f32; 2], size: [f32; 2], radius: f32) -> f32 {
    let half = [size[0] / 2.0, size[1] / 2.0];
    rounded_box_sdf([frag[0] - location[0] - half[0], frag[1] - location[1] - half[1]], half, radius)
}

/// Evaluates [`FRAGMENT_SHADER`] on the CPU.
///
/// `frag` is in window coordinates (origin bottom-left, like `gl_FragCoord`), `texel` is the sampled texture
/// value for textured vertices. Returns `None` for discarded fragments.
pub fn shade_fragment(v: &Vertex, frag: [f32; 2], screen: [f32; 2], texel: [f32; 4]) -> Option<[f32; 4]> {
    let set = |b: f32| b != -1.0;
    let flipped_y = screen[1] - frag[1];
    if (set(v.min_coord[1]) && flipped_y < v.min_coord[1])
        || (set(v.max_coord[1]) && flipped_y > v.max_coord[1])
        || (set(v.min_coord[0]) && frag[0] < v.min_coord[0])
        || (set(v.max_coord[0]) && frag[0] > v.max_coord[0])
    {
        return None;
    }

    let opaque = if v.tex_index == -1.0 {
        v.color
    } else {
        [texel[0] * v.color[0], texel[1] * v.color[1], texel[2] * v.color[2], texel[3] * v.color[3]]
    };

    let size = v.scale;
    let bw = v.border_width;
    let location = [v.pos_px[0], screen[1] - v.pos_px[1] - size[1]];
    let inner_location = [location[0] + bw, location[1] + bw];
    let inner_size = [size[0] - bw * 2.0, size[1] - bw * 2.0];

    if v.corner_radius != 0.0 {
        let radius = v.corner_radius * 2.0;
        let alpha = 1.0 - smoothstep(0.0, 2.0, box_distance(frag, location, size, radius));
        let in_border = bw != 0.0 && box_distance(frag, inner_location, inner_size, radius) > 0.0;
        let fill = if in_border { v.border_color } else { opaque };
        let target_alpha = if bw != 0.0 { alpha } else { opaque[3] };
        Some([fill[0] * alpha, fill[1] * alpha, fill[2] * alpha, target_alpha * alpha])
    } else if bw != 0.0 && box_distance(frag, inner_location, inner_size, v.corner_radius) > 0.0 {
        Some(v.border_color)
    } else {
        Some(opaque)
    }
}
