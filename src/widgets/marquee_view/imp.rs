use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gtk::{
    gdk::RGBA,
    glib,
    graphene::{Point, Rect},
    gsk::{self, ColorStop},
    prelude::*,
    subclass::prelude::*,
};
use tinymarquee_core::{
    graphics::util::Size,
    scheduler::{ScrollPhase, ScrollState},
    text::{Color, Content, TextMeasurer},
    widgets::MarqueeLabel,
};
use tokio::time::Instant;

use super::pango_measurer::PangoMeasurer;

#[derive(Default)]
pub struct MarqueeViewPriv {
    pub(super) label: RefCell<Option<MarqueeLabel>>,
    pub(super) measurer: RefCell<Option<Rc<PangoMeasurer>>>,
    moving: Cell<bool>,
    /// a tick callback is installed
    ticking: Cell<bool>,
}

#[glib::object_subclass]
impl ObjectSubclass for MarqueeViewPriv {
    const NAME: &'static str = "TinyMarqueeView";
    type Type = super::MarqueeView;
    type ParentType = gtk::Widget;

    fn class_init(klass: &mut Self::Class) {
        klass.set_css_name("marquee-view");
    }
}

impl MarqueeViewPriv {
    /// The engine only moves the frames: redraw once per state change, and on
    /// every frame while moving
    pub(super) fn state_changed(&self, state: ScrollState) {
        let obj = self.obj();
        obj.queue_draw();
        let moving = state.phase() == Some(ScrollPhase::Moving);
        self.moving.set(moving);
        if moving && !self.ticking.replace(true) {
            obj.add_tick_callback(|view, _clock| {
                let imp = view.imp();
                view.queue_draw();
                if imp.moving.get() {
                    glib::ControlFlow::Continue
                } else {
                    imp.ticking.set(false);
                    glib::ControlFlow::Break
                }
            });
        }
    }

    fn line_height(&self, label: &MarqueeLabel) -> f64 {
        self.measurer
            .borrow()
            .as_ref()
            .map(|measurer| {
                measurer
                    .natural_size(&Content::plain(""), &label.style())
                    .height
            })
            .unwrap_or(0.0)
    }
}

impl ObjectImpl for MarqueeViewPriv {
    fn constructed(&self) {
        self.parent_constructed();
        let obj = self.obj();
        obj.set_overflow(gtk::Overflow::Hidden);
    }

    fn dispose(&self) {
        self.label.take();
        self.measurer.take();
    }
}

impl WidgetImpl for MarqueeViewPriv {
    /// the minimum width is 0, the text scrolls when it gets less than its natural width
    fn measure(&self, orientation: gtk::Orientation, _for_size: i32) -> (i32, i32, i32, i32) {
        let label = self.label.borrow();
        let Some(label) = label.as_ref() else {
            return (0, 0, -1, -1);
        };
        let natural = label.segments()[0].natural();
        match orientation {
            gtk::Orientation::Horizontal => {
                let mut width = natural.width.ceil() as i32;
                if self.obj().width_request() > 0 {
                    width = width.clamp(0, self.obj().width_request());
                }
                (0, width, -1, -1)
            }
            _ => {
                let height = natural.height.max(self.line_height(label)).ceil() as i32;
                (height, height, -1, -1)
            }
        }
    }

    fn size_allocate(&self, width: i32, height: i32, _baseline: i32) {
        if let Some(label) = self.label.borrow().as_ref() {
            label.layout(Size::new(width as f64, height as f64));
        }
    }

    fn root(&self) {
        self.parent_root();
        if let Some(label) = self.label.borrow().as_ref() {
            label.set_attached(true);
        }
    }

    fn unroot(&self) {
        if let Some(label) = self.label.borrow().as_ref() {
            label.set_attached(false);
        }
        self.parent_unroot();
    }

    fn snapshot(&self, snapshot: &gtk::Snapshot) {
        let label = self.label.borrow();
        let measurer = self.measurer.borrow();
        let (Some(label), Some(measurer)) = (label.as_ref(), measurer.as_ref()) else {
            return;
        };

        let mask = label.fade_mask();
        if let Some(mask) = &mask {
            snapshot.push_mask(gsk::MaskMode::Alpha);
            let stops = mask.stops.map(|stop| {
                ColorStop::new(stop.offset as f32, RGBA::BLACK.with_alpha(stop.alpha as f32))
            });
            snapshot.append_linear_gradient(
                &Rect::new(
                    0.0,
                    0.0,
                    mask.bounds.width as f32,
                    mask.bounds.height as f32,
                ),
                &Point::new(mask.start.x as f32, mask.start.y as f32),
                &Point::new(mask.end.x as f32, mask.end.y as f32),
                &stops,
            );
            snapshot.pop();
        }

        // the second copy is only visible while scrolling
        let visible = if label.state().is_scrolling() { 2 } else { 1 };
        let frames = label.presentation(Instant::now());
        for (segment, frame) in label.segments().iter().zip(frames).take(visible) {
            let Some(content) = segment.content() else {
                continue;
            };
            let style = segment.style();
            let layout = measurer.layout(content, style);
            let x = frame.x + style.alignment.offset(segment.natural().width, frame.width);
            let y = frame.mid_y() - segment.natural().height / 2.0;
            snapshot.save();
            snapshot.translate(&Point::new(x as f32, y as f32));
            snapshot.append_layout(&layout, &to_rgba(style.color));
            snapshot.restore();
        }

        if mask.is_some() {
            snapshot.pop();
        }
    }
}

fn to_rgba(color: Color) -> RGBA {
    RGBA::new(color.red, color.green, color.blue, color.alpha)
}
