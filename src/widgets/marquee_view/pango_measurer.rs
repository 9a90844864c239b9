use gtk::pango;
use tinymarquee_core::{
    graphics::util::Size,
    text::{Color, Content, FontWeight, TextMeasurer, TextStyle},
};

/// Measures text with the pango context of the widget that draws it
#[derive(Debug, Clone)]
pub struct PangoMeasurer {
    context: pango::Context,
}

impl PangoMeasurer {
    pub fn new(context: pango::Context) -> Self {
        Self { context }
    }

    pub fn layout(&self, content: &Content, style: &TextStyle) -> pango::Layout {
        layout_for(&self.context, content, style)
    }
}

impl TextMeasurer for PangoMeasurer {
    fn natural_size(&self, content: &Content, style: &TextStyle) -> Size {
        let (_, logical) = self.layout(content, style).extents();
        Size::new(
            logical.width() as f64 / pango::SCALE as f64,
            logical.height() as f64 / pango::SCALE as f64,
        )
    }
}

/// Single line layout of `content`, rich runs become an attribute list
pub fn layout_for(context: &pango::Context, content: &Content, style: &TextStyle) -> pango::Layout {
    let layout = pango::Layout::new(context);
    let mut font = pango::FontDescription::from_string(&style.font.family);
    font.set_absolute_size(style.font.size * pango::SCALE as f64);
    layout.set_font_description(Some(&font));
    layout.set_single_paragraph_mode(true);

    match content {
        Content::Plain(text) => layout.set_text(text),
        Content::Rich(rich) => {
            let attrs = pango::AttrList::new();
            let mut text = String::new();
            for run in rich.runs() {
                let start = text.len() as u32;
                text.push_str(&run.text);
                let end = text.len() as u32;
                let attributes = &run.attributes;
                if let Some(weight) = attributes.weight {
                    let weight = match weight {
                        FontWeight::Normal => pango::Weight::Normal,
                        FontWeight::Bold => pango::Weight::Bold,
                    };
                    attrs.insert(ranged(pango::AttrInt::new_weight(weight), start, end));
                }
                if let Some(scale) = attributes.scale {
                    attrs.insert(ranged(pango::AttrFloat::new_scale(scale), start, end));
                }
                if let Some(color) = attributes.color {
                    let [red, green, blue, alpha] = to_u16(color);
                    attrs.insert(ranged(
                        pango::AttrColor::new_foreground(red, green, blue),
                        start,
                        end,
                    ));
                    attrs.insert(ranged(
                        pango::AttrInt::new_foreground_alpha(alpha),
                        start,
                        end,
                    ));
                }
            }
            layout.set_text(&text);
            layout.set_attributes(Some(&attrs));
        }
    }
    layout
}

fn ranged(attr: impl Into<pango::Attribute>, start: u32, end: u32) -> pango::Attribute {
    let mut attr = attr.into();
    attr.set_start_index(start);
    attr.set_end_index(end);
    attr
}

fn to_u16(color: Color) -> [u16; 4] {
    [color.red, color.green, color.blue, color.alpha]
        .map(|channel| (channel.clamp(0.0, 1.0) * u16::MAX as f32).round() as u16)
}
