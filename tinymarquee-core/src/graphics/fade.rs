use log::trace;

use crate::graphics::util::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// position along the gradient, 0 at the start point and 1 at the end point
    pub offset: f64,
    pub alpha: f64,
}

impl GradientStop {
    pub const fn new(offset: f64, alpha: f64) -> Self {
        Self { offset, alpha }
    }
}

/// Horizontal alpha gradient masking the widget: transparent at both edges,
/// opaque in between.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeMask {
    pub bounds: Size,
    /// start of the gradient line, in widget coordinates
    pub start: Point,
    /// end of the gradient line, in widget coordinates
    pub end: Point,
    pub stops: [GradientStop; 4],
}

impl FadeMask {
    /// `None` for a zero fade length or an empty widget
    pub fn new(fade_length: f64, bounds: Size) -> Option<Self> {
        if !(fade_length > 0.0 && bounds.width > 0.0) {
            return None;
        }
        let fade_point = (fade_length / bounds.width).min(0.5);
        let mid_y = bounds.height / 2.0;
        Some(Self {
            bounds,
            start: Point::new(0.0, mid_y),
            end: Point::new(bounds.width, mid_y),
            stops: [
                GradientStop::new(0.0, 0.0),
                GradientStop::new(fade_point, 1.0),
                GradientStop::new(1.0 - fade_point, 1.0),
                GradientStop::new(1.0, 0.0),
            ],
        })
    }

    pub fn fade_point(&self) -> f64 {
        self.stops[1].offset
    }

    /// mask alpha at widget x coordinate `x`
    pub fn alpha_at(&self, x: f64) -> f64 {
        let t = (x / self.bounds.width).clamp(0.0, 1.0);
        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.offset {
                let span = to.offset - from.offset;
                if span <= 0.0 {
                    return to.alpha;
                }
                let progress = (t - from.offset) / span;
                return from.alpha + (to.alpha - from.alpha) * progress;
            }
        }
        self.stops[3].alpha
    }
}

/// Owns the mask slot of the widget render layer.
///
/// Installing and removing the mask is immediate, the mask itself is never animated.
#[derive(Clone, Debug)]
pub struct FadeMaskRenderer {
    fade_length: f64,
    mask: Option<FadeMask>,
}

impl FadeMaskRenderer {
    pub fn new(fade_length: f64) -> Self {
        Self {
            fade_length,
            mask: None,
        }
    }

    pub fn apply_fade(&mut self, bounds: Size) {
        let mask = FadeMask::new(self.fade_length, bounds);
        if mask != self.mask {
            trace!("fade mask {mask:?}");
            self.mask = mask;
        }
    }

    pub fn clear_fade(&mut self) {
        self.mask = None;
    }

    pub fn mask(&self) -> Option<&FadeMask> {
        self.mask.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_stops_at_fade_length() {
        let mask = FadeMask::new(14.0, Size::new(200.0, 40.0)).unwrap();
        let expected = [0.0, 0.07, 0.93, 1.0];
        for (stop, offset) in mask.stops.iter().zip(expected) {
            assert!((stop.offset - offset).abs() < 1e-12, "{stop:?}");
        }
        let alphas: Vec<f64> = mask.stops.iter().map(|s| s.alpha).collect();
        assert_eq!(alphas, vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(mask.start, Point::new(0.0, 20.0));
        assert_eq!(mask.end, Point::new(200.0, 20.0));
    }

    #[test]
    fn alpha_ramps_at_both_edges() {
        let mask = FadeMask::new(20.0, Size::new(200.0, 40.0)).unwrap();
        assert_eq!(mask.alpha_at(0.0), 0.0);
        assert!((mask.alpha_at(10.0) - 0.5).abs() < 1e-9);
        assert_eq!(mask.alpha_at(20.0), 1.0);
        assert_eq!(mask.alpha_at(100.0), 1.0);
        assert!((mask.alpha_at(190.0) - 0.5).abs() < 1e-9);
        assert_eq!(mask.alpha_at(200.0), 0.0);
        assert_eq!(mask.alpha_at(-5.0), 0.0);
    }

    #[test]
    fn zero_fade_installs_nothing() {
        assert!(FadeMask::new(0.0, Size::new(200.0, 40.0)).is_none());
        assert!(FadeMask::new(14.0, Size::new(0.0, 40.0)).is_none());
    }

    #[test]
    fn narrow_widget_keeps_stops_ordered() {
        let mask = FadeMask::new(14.0, Size::new(20.0, 10.0)).unwrap();
        assert_eq!(mask.fade_point(), 0.5);
        assert!(mask.stops.windows(2).all(|p| p[0].offset <= p[1].offset));
    }

    #[test]
    fn renderer_apply_and_clear() {
        let mut renderer = FadeMaskRenderer::new(14.0);
        assert!(renderer.mask().is_none());
        renderer.apply_fade(Size::new(200.0, 40.0));
        assert!(renderer.mask().is_some());
        renderer.clear_fade();
        assert!(renderer.mask().is_none());
        // no-op when already clear
        renderer.clear_fade();
        assert!(renderer.mask().is_none());
    }
}
