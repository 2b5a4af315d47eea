//! Braille-canvas rendering of the meteor.

use ratatui::style::Color;
use ratatui::widgets::canvas::{Painter, Shape};

use crate::color::hsl_to_rgb;
use crate::effect::MeteorEffect;
use crate::gradient::Gradient;

/// Halo reach outside a lit edge, in dots.
const SHADOW_BLUR: f32 = 3.0;
/// Peak halo dot density per hundred, right at the lit edge.
const GLOW_MAX_DENSITY: u32 = 60;

/// Canvas shape drawing one meteor: head, tail, then sparks.
pub struct MeteorShape<'a> {
    effect: &'a MeteorEffect,
}

impl<'a> MeteorShape<'a> {
    pub fn new(effect: &'a MeteorEffect) -> Self {
        Self { effect }
    }

    /// Glowing half-circle head, round side toward the canvas bottom,
    /// raised one radius above the midline.
    fn draw_head(&self, painter: &mut Painter<'_, '_>, surface: &Surface, glow: Color) {
        let radius = self.effect.head_radius();
        if radius <= 0.0 {
            return;
        }
        let cx = surface.width as f32 / 2.0;
        let cy = surface.mid_y() - radius;
        let fill = Fill::Gradient(self.effect.gradient());
        fill_circle(painter, surface, (cx, cy), radius, Arc::LowerHalf, &fill, glow);
    }

    /// Isosceles tail from the head's horizontal extremes up to the apex.
    fn draw_tail(&self, painter: &mut Painter<'_, '_>, surface: &Surface, glow: Color) {
        let radius = self.effect.head_radius();
        let mid = surface.mid_y();
        let base_y = mid - radius;
        let apex_y = mid - self.effect.tail_length();
        if radius <= 0.0 || apex_y >= base_y {
            return;
        }
        let height = base_y - apex_y;
        let cx = surface.width as f32 / 2.0;
        let fill = Fill::Gradient(self.effect.gradient());

        let y0 = (apex_y - SHADOW_BLUR).floor() as i32;
        let y1 = base_y.ceil() as i32;
        for y in y0..=y1 {
            let yf = y as f32;
            // Rows below the base belong to the head
            if yf > base_y {
                continue;
            }
            // Negative above the apex, so the halo narrows into the tip
            let half = radius * (yf - apex_y) / height;
            let span = half + SHADOW_BLUR;
            if span <= 0.0 {
                continue;
            }
            let x0 = (cx - span).floor() as i32;
            let x1 = (cx + span).ceil() as i32;
            for x in x0..=x1 {
                let excess = (x as f32 - cx).abs() - half;
                if excess <= 0.0 {
                    paint_fill(painter, surface, x, y, &fill);
                } else if excess < SHADOW_BLUR {
                    let falloff = 1.0 - excess / SHADOW_BLUR;
                    paint_glow(painter, surface, x, y, &fill, glow, falloff);
                }
            }
        }
    }

    /// One circle per spark; dead sparks keep their draw call but fill
    /// with nothing.
    fn draw_sparks(&self, painter: &mut Painter<'_, '_>, surface: &Surface, glow: Color) {
        for particle in self.effect.particles() {
            let fill = if particle.is_dead() {
                Fill::Transparent
            } else {
                Fill::Gradient(self.effect.spark_gradient())
            };
            let center = (particle.x, particle.y);
            fill_circle(
                painter,
                surface,
                center,
                particle.size / 2.0,
                Arc::Full,
                &fill,
                glow,
            );
        }
    }
}

impl Shape for MeteorShape<'_> {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let surface = Surface::of(self.effect);
        if surface.width == 0 || surface.height == 0 {
            return;
        }
        let (r, g, b) = hsl_to_rgb(30.0, 1.0, 0.4);
        let glow = Color::Rgb(r, g, b);
        self.draw_head(painter, &surface, glow);
        self.draw_tail(painter, &surface, glow);
        self.draw_sparks(painter, &surface, glow);
    }
}

/// Dot-space clip rectangle and gradient axis for one draw pass.
struct Surface {
    width: u16,
    height: u16,
}

impl Surface {
    fn of(effect: &MeteorEffect) -> Self {
        let (width, height) = effect.surface_size();
        Self { width, height }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < i32::from(self.width) && y < i32::from(self.height)
    }

    fn mid_y(&self) -> f32 {
        self.height as f32 / 2.0
    }

    /// Gradient position for a row: 0 at the midline, 1 at the top edge.
    fn axis(&self, y: f32) -> f32 {
        let mid = self.mid_y();
        if mid <= 0.0 { 0.0 } else { (mid - y) / mid }
    }
}

/// What a shape's dots are painted with.
enum Fill<'a> {
    Gradient(&'a Gradient),
    /// Paints nothing and casts no halo.
    Transparent,
}

/// Which part of the disc gets dots.
#[derive(Clone, Copy, PartialEq)]
enum Arc {
    Full,
    LowerHalf,
}

/// Fill a disc and its halo fringe in one bounding-box walk.
fn fill_circle(
    painter: &mut Painter<'_, '_>,
    surface: &Surface,
    center: (f32, f32),
    radius: f32,
    arc: Arc,
    fill: &Fill<'_>,
    glow: Color,
) {
    if radius <= 0.0 {
        return;
    }
    let (cx, cy) = center;
    let reach = radius + SHADOW_BLUR;
    let y0 = (cy - reach).floor() as i32;
    let y1 = (cy + reach).ceil() as i32;
    for y in y0..=y1 {
        let yf = y as f32;
        if arc == Arc::LowerHalf && yf < cy {
            continue;
        }
        let x0 = (cx - reach).floor() as i32;
        let x1 = (cx + reach).ceil() as i32;
        for x in x0..=x1 {
            let xf = x as f32;
            let d = ((xf - cx).powi(2) + (yf - cy).powi(2)).sqrt();
            if d <= radius {
                paint_fill(painter, surface, x, y, fill);
            } else if d < reach {
                let falloff = 1.0 - (d - radius) / SHADOW_BLUR;
                paint_glow(painter, surface, x, y, fill, glow, falloff);
            }
        }
    }
}

fn paint_fill(painter: &mut Painter<'_, '_>, surface: &Surface, x: i32, y: i32, fill: &Fill<'_>) {
    if !surface.contains(x, y) {
        return;
    }
    let Fill::Gradient(gradient) = fill else {
        return;
    };
    if let Some(color) = gradient.sample(surface.axis(y as f32)) {
        painter.paint(x as usize, y as usize, color);
    }
}

/// Dithered halo dot outside a lit edge. Skipped where the body itself
/// would be invisible on this row.
fn paint_glow(
    painter: &mut Painter<'_, '_>,
    surface: &Surface,
    x: i32,
    y: i32,
    fill: &Fill<'_>,
    glow: Color,
    falloff: f32,
) {
    if !surface.contains(x, y) {
        return;
    }
    let Fill::Gradient(gradient) = fill else {
        return;
    };
    if gradient.sample(surface.axis(y as f32)).is_none() {
        return;
    }
    let density = (falloff * falloff * GLOW_MAX_DENSITY as f32) as u32;
    let hash = (x as u32)
        .wrapping_mul(31)
        .wrapping_add((y as u32).wrapping_mul(17));
    if hash % 100 < density {
        painter.paint(x as usize, y as usize, glow);
    }
}
