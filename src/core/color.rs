//! Page palette and the blended backdrop.

use super::blend::clamp01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear mix, rounded.  `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = clamp01(t);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

pub const BASE_BG: Rgb = Rgb::new(240, 240, 236);
pub const BASE_TEXT: Rgb = Rgb::new(15, 15, 19);
pub const WORKS_BG: Rgb = Rgb::new(224, 224, 255);
pub const PEOPLE_PURPLE: Rgb = Rgb::new(224, 207, 239);
pub const MUTED_TEXT: Rgb = Rgb::new(90, 90, 96);

/// Contact panel accents, cycled across the panel rows.
pub const CONTACT_ACCENTS: [Rgb; 4] = [
    Rgb::new(91, 43, 255),
    Rgb::new(255, 79, 216),
    Rgb::new(123, 255, 235),
    Rgb::new(177, 158, 239),
];

/// Members background: base pushed 70% toward purple.
pub fn people_tint() -> Rgb {
    BASE_BG.lerp(PEOPLE_PURPLE, 0.7)
}

/// Page background for the current works and members blends.
pub fn backdrop(works: f64, members: f64) -> Rgb {
    BASE_BG.lerp(WORKS_BG, works).lerp(people_tint(), members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn people_tint_matches_the_seventy_percent_mix() {
        assert_eq!(people_tint(), Rgb::new(229, 217, 238));
    }

    #[test]
    fn backdrop_endpoints() {
        assert_eq!(backdrop(0.0, 0.0), BASE_BG);
        assert_eq!(backdrop(1.0, 0.0), WORKS_BG);
        assert_eq!(backdrop(0.0, 1.0), people_tint());
        assert_eq!(backdrop(1.0, 1.0), people_tint());
        assert_eq!(backdrop(f64::NAN, -2.0), BASE_BG);
    }
}
