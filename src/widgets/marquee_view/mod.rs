pub mod imp;
pub mod pango_measurer;

use std::{rc::Rc, time::Duration};

use anyhow::Result;
use futures::future::LocalBoxFuture;
use gtk::{glib, prelude::*, subclass::prelude::*};
use tinymarquee_core::{
    config::MarqueeConfig,
    graphics::util::Size,
    runtime::Spawner,
    text::{Color, TextStyle},
    widgets::MarqueeLabel,
};

use self::pango_measurer::PangoMeasurer;

glib::wrapper! {
    pub struct MarqueeView(ObjectSubclass<imp::MarqueeViewPriv>)
        @extends gtk::Widget;
}

/// Runs the scroll loop on the GTK main context
#[derive(Debug, Clone, Copy, Default)]
pub struct GlibSpawner;

impl Spawner for GlibSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        glib::MainContext::default().spawn_local(task);
    }
}

impl MarqueeView {
    /// The scroll loop uses tokio timers: a tokio runtime must be entered on the GTK thread.
    pub fn new(config: &MarqueeConfig, style: TextStyle) -> Result<Self> {
        let view = glib::Object::new::<Self>();
        let measurer = Rc::new(PangoMeasurer::new(view.pango_context()));
        let label = MarqueeLabel::new(
            Size::default(),
            style,
            config,
            measurer.clone(),
            Rc::new(GlibSpawner),
        )?;
        let weak = view.downgrade();
        label.connect_state_changed(move |state| {
            if let Some(view) = weak.upgrade() {
                view.imp().state_changed(state);
            }
        });
        view.imp().measurer.replace(Some(measurer));
        view.imp().label.replace(Some(label));
        Ok(view)
    }

    fn with_label<R>(&self, f: impl FnOnce(&MarqueeLabel) -> R) -> Option<R> {
        self.imp().label.borrow().as_ref().map(f)
    }

    pub fn set_text(&self, text: &str) {
        self.with_label(|label| label.set_text(text));
        self.queue_resize();
    }

    pub fn set_text_color(&self, color: Color) {
        self.with_label(|label| label.set_text_color(color));
        self.queue_draw();
    }

    pub fn set_speed(&self, speed: f64) -> Result<()> {
        self.with_label(|label| label.set_speed(speed))
            .unwrap_or(Ok(()))
    }

    pub fn set_pause_interval(&self, pause_interval: Duration) {
        self.with_label(|label| label.set_pause_interval(pause_interval));
    }
}
