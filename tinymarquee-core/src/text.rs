//! Text content, the style snapshot the label pair renders with,
//! and the measurement primitive the host provides.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::graphics::util::Size;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Horizontal placement of text inside a frame wider than the text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// x offset of text `natural` pixels wide drawn in a frame `available` pixels wide
    pub fn offset(&self, natural: f64, available: f64) -> f64 {
        let free = (available - natural).max(0.0);
        match self {
            Alignment::Start => 0.0,
            Alignment::Center => free / 2.0,
            Alignment::End => free,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 17.0,
        }
    }
}

/// Style of the label pair.
///
/// The pair copies this once when the widget is built. Only the color is
/// propagated afterwards; font and alignment stay as they were captured.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub alignment: Alignment,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunAttributes {
    pub weight: Option<FontWeight>,
    /// relative to the font size of the style
    pub scale: Option<f64>,
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub attributes: RunAttributes,
}

/// Styled text, a sequence of runs with their own attributes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, text: impl Into<String>, attributes: RunAttributes) -> Self {
        self.runs.push(TextRun {
            text: text.into(),
            attributes,
        });
        self
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Plain(String),
    Rich(RichText),
}

impl Content {
    pub fn plain(text: impl Into<String>) -> Self {
        Content::Plain(text.into())
    }

    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            Content::Plain(text) => Cow::Borrowed(text),
            Content::Rich(rich) => Cow::Owned(rich.plain_text()),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::plain(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Plain(value)
    }
}

impl From<RichText> for Content {
    fn from(value: RichText) -> Self {
        Content::Rich(value)
    }
}

/// Text rendering primitive provided by the host.
pub trait TextMeasurer {
    /// Natural (single line, unwrapped) size of `content` drawn with `style`
    fn natural_size(&self, content: &Content, style: &TextStyle) -> Size;
}

/// Measures text as a grid of fixed-width columns using the unicode display width,
/// for hosts without a font engine (and for tests)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    column_width: f64,
    line_height: f64,
}

impl MonospaceMeasurer {
    pub fn new(column_width: f64, line_height: f64) -> Self {
        Self {
            column_width,
            line_height,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn natural_size(&self, content: &Content, _style: &TextStyle) -> Size {
        match content {
            Content::Plain(text) => Size::new(
                text.width() as f64 * self.column_width,
                self.line_height,
            ),
            Content::Rich(rich) => {
                let mut width = 0.0;
                let mut max_scale: f64 = 1.0;
                for run in rich.runs() {
                    let scale = run.attributes.scale.unwrap_or(1.0);
                    width += run.text.width() as f64 * self.column_width * scale;
                    max_scale = max_scale.max(scale);
                }
                Size::new(width, self.line_height * max_scale)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_plain_width() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let size = measurer.natural_size(&Content::plain("hello"), &TextStyle::default());
        assert_eq!(size, Size::new(50.0, 20.0));
    }

    #[test]
    fn monospace_counts_wide_chars_twice() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let size = measurer.natural_size(&Content::plain("日本"), &TextStyle::default());
        assert_eq!(size.width, 40.0);
    }

    #[test]
    fn monospace_rich_applies_run_scale() {
        let measurer = MonospaceMeasurer::new(10.0, 20.0);
        let rich = RichText::new()
            .push("ab", RunAttributes::default())
            .push(
                "cd",
                RunAttributes {
                    scale: Some(2.0),
                    ..Default::default()
                },
            );
        let size = measurer.natural_size(&rich.into(), &TextStyle::default());
        assert_eq!(size, Size::new(60.0, 40.0));
    }

    #[test]
    fn alignment_offsets() {
        assert_eq!(Alignment::Start.offset(50.0, 200.0), 0.0);
        assert_eq!(Alignment::Center.offset(50.0, 200.0), 75.0);
        assert_eq!(Alignment::End.offset(50.0, 200.0), 150.0);
        // wider than the frame: no negative offsets
        assert_eq!(Alignment::End.offset(300.0, 200.0), 0.0);
    }

    #[test]
    fn rich_plain_text_flattens_runs() {
        let rich = RichText::new()
            .push("Now playing: ", RunAttributes::default())
            .push(
                "Song",
                RunAttributes {
                    weight: Some(FontWeight::Bold),
                    ..Default::default()
                },
            );
        assert_eq!(Content::from(rich).plain_text(), "Now playing: Song");
    }
}
