use crate::{
    graphics::util::{Rect, Size},
    text::TextMeasurer,
    widgets::marquee_label::content_buffer::ScrollSegment,
};

/// Sizes label segments to their content and places the pair for scrolling
pub struct LayoutFitter<'a> {
    measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutFitter<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self { measurer }
    }

    /// Measures the segment content and applies the fitted frame, see [`fitted_frame`]
    pub fn fit(&self, segment: &mut ScrollSegment, bounds: Size) -> Rect {
        let natural = match segment.content() {
            Some(content) => self.measurer.natural_size(content, segment.style()),
            None => Size::default(),
        };
        let frame = fitted_frame(segment.frame(), natural, bounds);
        segment.set_natural(natural);
        segment.set_frame(frame);
        frame
    }
}

/// Frame of a label showing content of size `natural` inside `bounds`.
///
/// The width is the natural width, the measured height is discarded in favour
/// of the widget height. Content narrower than the widget fills the widget
/// so the label alignment applies.
pub fn fitted_frame(current: Rect, natural: Size, bounds: Size) -> Rect {
    let width = if natural.width.is_finite() {
        natural.width.max(0.0)
    } else {
        0.0
    };
    if width < bounds.width {
        Rect::from_size(bounds)
    } else {
        Rect::new(current.x, current.y, width, bounds.height)
    }
}

/// Moves `primary` to the left edge and `secondary` right after it, `gap` pixels apart
pub fn place_at_rest(primary: &mut ScrollSegment, secondary: &mut ScrollSegment, gap: f64) {
    let first = primary.frame();
    let first = Rect::new(0.0, first.y, first.width, first.height);
    primary.set_frame(first);

    let second = secondary.frame();
    secondary.set_frame(Rect::new(
        first.max_x() + gap,
        second.y,
        second.width,
        first.height,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Content, MonospaceMeasurer, TextStyle};

    const BOUNDS: Size = Size::new(200.0, 40.0);

    fn segment(text: &str) -> ScrollSegment {
        let mut segment = ScrollSegment::new(TextStyle::default(), BOUNDS);
        segment.set_content(Some(Content::plain(text)));
        segment
    }

    #[test]
    fn narrow_content_fills_the_widget() {
        let frame = fitted_frame(
            Rect::new(12.0, 3.0, 0.0, 0.0),
            Size::new(150.0, 22.0),
            BOUNDS,
        );
        assert_eq!(frame, Rect::new(0.0, 0.0, 200.0, 40.0));
    }

    #[test]
    fn wide_content_keeps_origin_and_natural_width() {
        let frame = fitted_frame(
            Rect::new(-30.0, 0.0, 10.0, 10.0),
            Size::new(400.0, 22.0),
            BOUNDS,
        );
        assert_eq!(frame, Rect::new(-30.0, 0.0, 400.0, 40.0));
    }

    #[test]
    fn exact_fit_keeps_natural_frame() {
        let frame = fitted_frame(Rect::default(), Size::new(200.0, 22.0), BOUNDS);
        assert_eq!(frame, Rect::new(0.0, 0.0, 200.0, 40.0));
    }

    #[test]
    fn degenerate_measurements_fit() {
        for width in [f64::NAN, f64::INFINITY, -5.0, 0.0] {
            let frame = fitted_frame(Rect::default(), Size::new(width, 22.0), BOUNDS);
            assert_eq!(frame, Rect::from_size(BOUNDS), "width {width}");
        }
    }

    #[test]
    fn fit_is_idempotent() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let fitter = LayoutFitter::new(&measurer);
        for text in ["short", "a much longer text than the widget can show"] {
            let mut segment = segment(text);
            let first = fitter.fit(&mut segment, BOUNDS);
            let second = fitter.fit(&mut segment, BOUNDS);
            assert_eq!(first, second);
            assert_eq!(first.height, BOUNDS.height);
        }
    }

    #[test]
    fn empty_segment_fills_the_widget() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let mut segment = ScrollSegment::new(TextStyle::default(), BOUNDS);
        let frame = LayoutFitter::new(&measurer).fit(&mut segment, BOUNDS);
        assert_eq!(frame, Rect::from_size(BOUNDS));
        assert_eq!(segment.natural(), Size::default());
    }

    #[test]
    fn rest_position_separates_the_pair_by_the_gap() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let fitter = LayoutFitter::new(&measurer);
        let text = "x".repeat(40);
        let mut primary = segment(&text);
        let mut secondary = segment(&text);
        fitter.fit(&mut primary, BOUNDS);
        fitter.fit(&mut secondary, BOUNDS);

        place_at_rest(&mut primary, &mut secondary, 50.0);
        assert_eq!(primary.frame(), Rect::new(0.0, 0.0, 400.0, 40.0));
        assert_eq!(secondary.frame(), Rect::new(450.0, 0.0, 400.0, 40.0));
    }
}
