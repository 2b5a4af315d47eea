//! Gradient fills for the meteor shapes.

use ratatui::style::Color;

use crate::color::{hsl_to_rgb, scale_rgb};

/// Opacity below which a sample paints nothing.
const MIN_ALPHA: f32 = 1.0 / 255.0;

/// A single gradient stop.
#[derive(Debug, Clone, Copy)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0-1.0.
    pub offset: f32,
    /// RGB color at this stop.
    pub rgb: (u8, u8, u8),
    /// Opacity at this stop, 0.0-1.0.
    pub alpha: f32,
}

/// A fixed five-stop linear gradient running from the canvas midline
/// (offset 0) to the top edge (offset 1).
///
/// The final fade scales the color toward black, which is how transparency
/// composites on a dark terminal background.
#[derive(Debug, Clone)]
pub struct Gradient {
    stops: [GradientStop; 5],
}

impl Gradient {
    /// Fill for the meteor head and tail, dark stop at 0.55.
    pub fn meteor() -> Self {
        Self::burn(0.55)
    }

    /// Fill for the spark particles, dark stop at 0.9.
    pub fn spark() -> Self {
        Self::burn(0.9)
    }

    /// White-hot core fading through orange to transparent.
    fn burn(dark_offset: f32) -> Self {
        let dark = hsl_to_rgb(30.0, 1.0, 0.2);
        Self {
            stops: [
                GradientStop {
                    offset: 0.0,
                    rgb: hsl_to_rgb(30.0, 1.0, 1.0),
                    alpha: 1.0,
                },
                GradientStop {
                    offset: 0.025,
                    rgb: hsl_to_rgb(30.0, 1.0, 0.7),
                    alpha: 1.0,
                },
                GradientStop {
                    offset: 0.15,
                    rgb: hsl_to_rgb(30.0, 1.0, 0.4),
                    alpha: 1.0,
                },
                GradientStop {
                    offset: dark_offset,
                    rgb: dark,
                    alpha: 1.0,
                },
                GradientStop {
                    offset: 1.0,
                    rgb: dark,
                    alpha: 0.0,
                },
            ],
        }
    }

    /// Stops in axis order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Sample the gradient at a position along its axis.
    ///
    /// Positions are clamped to 0.0-1.0. Returns `None` where the sample
    /// is fully transparent.
    pub fn sample(&self, t: f32) -> Option<Color> {
        let t = t.clamp(0.0, 1.0);

        let mut prev = &self.stops[0];
        for stop in &self.stops[1..] {
            if t <= stop.offset {
                let span = stop.offset - prev.offset;
                let local = if span > 0.0 {
                    (t - prev.offset) / span
                } else {
                    1.0
                };
                let rgb = lerp_rgb(prev.rgb, stop.rgb, local);
                let alpha = prev.alpha + (stop.alpha - prev.alpha) * local;
                return composite(rgb, alpha);
            }
            prev = stop;
        }
        composite(prev.rgb, prev.alpha)
    }
}

fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f32) -> (u8, u8, u8) {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    (lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

fn composite(rgb: (u8, u8, u8), alpha: f32) -> Option<Color> {
    if alpha < MIN_ALPHA {
        return None;
    }
    let (r, g, b) = scale_rgb(rgb, alpha);
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_table() {
        let gradient = Gradient::meteor();
        let stops = gradient.stops();
        assert_eq!(stops[0].offset, 0.0);
        assert_eq!(stops[0].rgb, (255, 255, 255));
        assert_eq!(stops[1].offset, 0.025);
        assert_eq!(stops[1].rgb, (255, 178, 102));
        assert_eq!(stops[2].offset, 0.15);
        assert_eq!(stops[2].rgb, (204, 102, 0));
        assert_eq!(stops[3].offset, 0.55);
        assert_eq!(stops[3].rgb, (102, 51, 0));
        assert_eq!(stops[4].offset, 1.0);
        assert_eq!(stops[4].alpha, 0.0);
    }

    #[test]
    fn test_spark_dark_stop_sits_higher() {
        let gradient = Gradient::spark();
        assert_eq!(gradient.stops()[3].offset, 0.9);
        assert_eq!(gradient.stops()[3].rgb, (102, 51, 0));
    }

    #[test]
    fn test_sample_hits_stops_exactly() {
        let gradient = Gradient::meteor();
        assert_eq!(gradient.sample(0.0), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(gradient.sample(0.025), Some(Color::Rgb(255, 178, 102)));
        assert_eq!(gradient.sample(0.15), Some(Color::Rgb(204, 102, 0)));
        assert_eq!(gradient.sample(0.55), Some(Color::Rgb(102, 51, 0)));
        assert_eq!(gradient.sample(1.0), None);
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let gradient = Gradient::meteor();
        assert_eq!(gradient.sample(-2.0), gradient.sample(0.0));
        assert_eq!(gradient.sample(5.0), gradient.sample(1.0));
    }

    #[test]
    fn test_fade_scales_toward_black() {
        let gradient = Gradient::meteor();
        let Some(Color::Rgb(r, g, b)) = gradient.sample(0.775) else {
            panic!("midpoint of the fade should still be visible");
        };
        // Halfway through the fade the dark stop is at half strength
        assert_eq!((r, g, b), (51, 25, 0));
    }
}
