/// Straight (non-premultiplied) 8-bit RGBA color handed to the rendering
/// surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }

    /// CSS hex form, `#rrggbb` when fully opaque, `#rrggbbaa` otherwise.
    pub fn css_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Fill color of in-flight flow markers.
pub const FLOW_MARKER: Rgba8 = Rgba8::rgb(0x4a, 0x9e, 0xff);

/// Outline color of gauges whose unit is heavily stalled.
pub const STALL_ALERT: Rgba8 = Rgba8::rgb(0xff, 0x6b, 0x6b);

// Light-to-dark stops of the sequential Blues scale; occupancy 0 maps to
// the lightest stop and occupancy 1 to the darkest.
const BLUES: [Rgba8; 5] = [
    Rgba8::rgb(247, 251, 255),
    Rgba8::rgb(198, 219, 239),
    Rgba8::rgb(107, 174, 214),
    Rgba8::rgb(33, 113, 181),
    Rgba8::rgb(8, 48, 107),
];

/// Sample the sequential blue occupancy ramp at `t` in `[0, 1]`.
///
/// Monotonic in `t` per channel, so higher occupancy always reads darker.
pub fn blues(t: f64) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (BLUES.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(BLUES.len() - 2);
    Rgba8::lerp(BLUES[idx], BLUES[idx + 1], scaled - idx as f64)
}
