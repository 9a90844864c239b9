use crate::{
    graphics::util::{Rect, Size},
    text::{Color, Content, TextStyle},
};

/// One of the two copies of the label text
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollSegment {
    content: Option<Content>,
    style: TextStyle,
    natural: Size,
    frame: Rect,
}

impl ScrollSegment {
    pub(crate) fn new(style: TextStyle, bounds: Size) -> Self {
        Self {
            content: None,
            style,
            natural: Size::default(),
            frame: Rect::from_size(bounds),
        }
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// measured size of the content, before fitting
    pub fn natural(&self) -> Size {
        self.natural
    }

    /// frame at rest, in widget coordinates
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub(crate) fn set_content(&mut self, content: Option<Content>) {
        self.content = content;
    }

    pub(crate) fn set_natural(&mut self, natural: Size) {
        self.natural = natural;
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

/// Keeps the two copies of the label text identical.
///
/// The primary copy is the source of truth for the content. The widget holding
/// the buffer draws nothing itself, only the two segments.
#[derive(Clone, Debug)]
pub struct ContentBuffer {
    primary: ScrollSegment,
    secondary: ScrollSegment,
}

impl ContentBuffer {
    /// both segments take a snapshot of `style`
    pub fn new(style: TextStyle, bounds: Size) -> Self {
        Self {
            primary: ScrollSegment::new(style.clone(), bounds),
            secondary: ScrollSegment::new(style, bounds),
        }
    }

    pub fn set_content(&mut self, content: Option<Content>) {
        self.secondary.set_content(content.clone());
        self.primary.set_content(content);
    }

    pub fn content(&self) -> Option<&Content> {
        self.primary.content()
    }

    pub fn set_color(&mut self, color: Color) {
        self.primary.style.color = color;
        self.secondary.style.color = color;
    }

    pub fn style(&self) -> &TextStyle {
        self.primary.style()
    }

    pub fn primary(&self) -> &ScrollSegment {
        &self.primary
    }

    pub fn secondary(&self) -> &ScrollSegment {
        &self.secondary
    }

    pub(crate) fn pair_mut(&mut self) -> (&mut ScrollSegment, &mut ScrollSegment) {
        (&mut self.primary, &mut self.secondary)
    }
}
