//! Baked 1D gradients: a graph sampled once over a time window so renderers
//! can color per vertex without evaluating the graph every frame.

use wilson_api_core::Color;

use crate::colormap::ColorScale;
use crate::curve::GraphInterpolator;

#[derive(Clone, Debug, PartialEq)]
pub struct GradientTexture {
    samples: Vec<f32>,
    start_time: f64,
    end_time: f64,
}

impl GradientTexture {
    /// Sample `graph` at `resolution` uniform steps; texel `i` holds the value
    /// at `start + i / resolution * (end - start)`.
    pub fn bake(graph: &GraphInterpolator, start: f64, end: f64, resolution: usize) -> Self {
        let resolution = resolution.max(1);
        let period = end - start;
        let samples = (0..resolution)
            .map(|i| graph.interpolate(i as f64 / resolution as f64 * period + start) as f32)
            .collect();
        Self {
            samples,
            start_time: start,
            end_time: end,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn resolution(&self) -> usize {
        self.samples.len()
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Filtered scalar at normalized coordinate `u`: linear between texel
    /// centers `(i + 0.5) / resolution`, clamped to the edge texels.
    pub fn scalar_at(&self, u: f64) -> f64 {
        let n = self.samples.len();
        let x = (u.clamp(0.0, 1.0) * n as f64 - 0.5).clamp(0.0, (n - 1) as f64);
        let i0 = x.floor() as usize;
        let i1 = (i0 + 1).min(n - 1);
        let frac = x - i0 as f64;
        let a = self.samples[i0] as f64;
        let b = self.samples[i1] as f64;
        a + (b - a) * frac
    }

    pub fn color_at(&self, u: f64, scale: &ColorScale) -> Color {
        scale.map(self.scalar_at(u))
    }

    /// Every texel mapped through `scale`, for uploading as an RGBA texture.
    pub fn bake_colors(&self, scale: &ColorScale) -> Vec<Color> {
        self.samples.iter().map(|&s| scale.map(s as f64)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ControlPoint;
    use wilson_api_core::{ColorStop, Interpolation};

    fn ramp() -> GraphInterpolator {
        GraphInterpolator::new(
            vec![ControlPoint::new(0.0, 0.0), ControlPoint::new(10.0, 10.0)],
            Interpolation::Linear,
        )
        .expect("non-empty")
    }

    #[test]
    fn bakes_uniform_steps() {
        let tex = GradientTexture::bake(&ramp(), 0.0, 10.0, 10);
        assert_eq!(tex.resolution(), 10);
        assert_eq!(tex.samples()[0], 0.0);
        assert_eq!(tex.samples()[9], 9.0);
    }

    #[test]
    fn filters_between_texel_centers() {
        let tex = GradientTexture::bake(&ramp(), 0.0, 10.0, 10);
        assert_eq!(tex.scalar_at(0.0), 0.0);
        assert_eq!(tex.scalar_at(0.25), 2.0);
        assert_eq!(tex.scalar_at(1.0), 9.0);
        assert_eq!(tex.scalar_at(7.0), 9.0);
    }

    #[test]
    fn maps_through_color_scale() {
        let scale = ColorScale::new(vec![
            ColorStop::new(0.0, Color::rgba(0.0, 0.0, 0.0, 1.0)),
            ColorStop::new(10.0, Color::rgba(1.0, 1.0, 1.0, 1.0)),
        ]);
        let tex = GradientTexture::bake(&ramp(), 0.0, 10.0, 10);
        assert_eq!(tex.color_at(0.25, &scale), Color::rgba(0.2, 0.2, 0.2, 1.0));
        assert_eq!(tex.bake_colors(&scale).len(), 10);
    }
}
