//! Scalar and color helpers shared by the CPU kernel library.
//!
//! All values are normalized floats; color channels are in `[0, 1]` and stored in the
//! `[r, g, b, a]` order used by the texture buffers.

/// One normalized RGBA sample.
pub type Rgba = [f32; 4];

/// Truth value of a boolean-valued shader float: anything above zero is on.
pub fn is_on(value: f32) -> bool {
    value > 0.0
}

pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

pub fn mul3(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] * b[0], a[1] * b[1], a[2] * b[2]]
}

pub fn scale3(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn rgb(c: Rgba) -> [f32; 3] {
    [c[0], c[1], c[2]]
}

pub fn with_alpha(c: [f32; 3], a: f32) -> Rgba {
    [c[0], c[1], c[2], a]
}

pub fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    if a == b {
        return if x < a { 0.0 } else { 1.0 };
    }
    let t = saturate((x - a) / (b - a));
    t * t * (3.0 - 2.0 * t)
}

/// `pow` that tolerates negative bases the way shader code does (clamped to zero).
pub fn spow(x: f32, p: f32) -> f32 {
    x.max(0.0).powf(p)
}

pub fn luminance(c: [f32; 3]) -> f32 {
    0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
}

/// Photoshop-style overlay of `blend` onto `base`; mid-gray is the identity.
pub fn overlay(base: [f32; 3], blend: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for i in 0..3 {
        out[i] = if base[i] < 0.5 {
            2.0 * base[i] * blend[i]
        } else {
            1.0 - 2.0 * (1.0 - base[i]) * (1.0 - blend[i])
        };
    }
    out
}

pub fn rgb_to_hsv(c: [f32; 3]) -> [f32; 3] {
    let max = c[0].max(c[1]).max(c[2]);
    let min = c[0].min(c[1]).min(c[2]);
    let delta = max - min;
    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == c[0] {
        ((c[1] - c[2]) / delta).rem_euclid(6.0) / 6.0
    } else if max == c[1] {
        ((c[2] - c[0]) / delta + 2.0) / 6.0
    } else {
        ((c[0] - c[1]) / delta + 4.0) / 6.0
    };
    let s = if max <= f32::EPSILON { 0.0 } else { delta / max };
    [h, s, max]
}

pub fn hsv_to_rgb(hsv: [f32; 3]) -> [f32; 3] {
    let [h, s, v] = hsv;
    let h6 = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}

/// Hue shift (0.5 is neutral), saturation and brightness multipliers (1.0 is neutral).
pub fn adjust_hsb(c: [f32; 3], hue: f32, saturation: f32, brightness: f32) -> [f32; 3] {
    let [h, s, v] = rgb_to_hsv(c);
    hsv_to_rgb([h + hue - 0.5, saturate(s * saturation), v * brightness])
}

/// Decode a tangent-space normal stored in `[0, 1]` texel space.
pub fn unpack_normal(c: Rgba) -> [f32; 3] {
    [c[0] * 2.0 - 1.0, c[1] * 2.0 - 1.0, c[2] * 2.0 - 1.0]
}

pub fn pack_normal(n: [f32; 3]) -> Rgba {
    [n[0] * 0.5 + 0.5, n[1] * 0.5 + 0.5, n[2] * 0.5 + 0.5, 1.0]
}

pub fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f32::EPSILON {
        return [0.0, 0.0, 1.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

/// Quantize a normalized channel to 8 bits.
pub fn to_u8(x: f32) -> u8 {
    (saturate(x) * 255.0).round() as u8
}

pub fn from_u8(x: u8) -> f32 {
    f32::from(x) / 255.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
