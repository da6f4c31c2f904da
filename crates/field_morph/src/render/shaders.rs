//! Embedded program sources for the field renderer.
//!
//! Static configuration owned by `FieldRenderer::init`; both programs share
//! the vertex stage.

/// Vertex stage: transforms the unit quad by `u_mvp` and derives texture
/// coordinates from quad positions via `u_tex_mvp`.
pub(crate) const QUAD_VERT: &str = r#"
    #version 110

    attribute vec4 v_pos;

    uniform mat4 u_mvp;
    uniform mat4 u_tex_mvp;

    varying vec2 f_uv;

    void main(){
        vec4 uv = u_tex_mvp * vec4(v_pos.xy * vec2(0.5) + vec2(0.5), 0.0, 1.0);
        f_uv = uv.xy;
        gl_Position = u_mvp * v_pos;
    }
"#;

/// Fragment stage for a single field: power/threshold shaping into an alpha
/// mask over a flat color.
pub(crate) const FIELD_FRAG: &str = r#"
    #version 110

    uniform vec4 f_color;
    uniform float f_power;
    uniform sampler2D f_field;

    varying vec2 f_uv;

    void main(){
        float mask = clamp(texture2D(f_field, f_uv).r * f_power, -1.0, 1.0) * f_color.a;
        gl_FragColor = vec4(f_color.rgb, mask);
    }
"#;

/// Fragment stage for the morph blend: two field samples mixed by
/// `f_progress` before the same shaping as the single-field stage.
pub(crate) const MORPH_FRAG: &str = r#"
    #version 110

    uniform vec4 f_color;
    uniform float f_power;
    uniform float f_progress;
    uniform sampler2D f_field_a;
    uniform sampler2D f_field_b;

    varying vec2 f_uv;

    void main(){
        float a = texture2D(f_field_a, f_uv).r;
        float b = texture2D(f_field_b, f_uv).r;
        float mask = clamp(mix(a, b, f_progress) * f_power, -1.0, 1.0) * f_color.a;
        gl_FragColor = vec4(f_color.rgb, mask);
    }
"#;
