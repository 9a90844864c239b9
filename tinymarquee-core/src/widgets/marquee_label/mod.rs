pub mod content_buffer;
mod imp;

use std::{cell::RefCell, fmt::Debug, rc::Rc, time::Duration};

use anyhow::{Context, Result};
use log::{debug, trace, warn};
use tokio::time::Instant;

use crate::{
    config::{self, MarqueeConfig},
    graphics::{
        fade::{FadeMask, FadeMaskRenderer},
        util::{Rect, Size},
    },
    runtime::{self, Spawner},
    scheduler::{self, MarqueeScheduler, ScrollState, StateObserver, Translation},
    text::{Color, Content, RichText, TextMeasurer, TextStyle},
};

use self::{
    content_buffer::{ContentBuffer, ScrollSegment},
    imp::MarqueeLabelPriv,
};

/// A label that scrolls its text in a loop when it doesn't fit its bounds.
///
/// Scrolling is not controlled directly: every change of content, speed,
/// bounds or attachment cancels the current cycle and, after a short settle
/// delay, re-evaluates whether the content overflows.
///
/// The widget starts detached; the host calls [`MarqueeLabel::set_attached`]
/// when it becomes part of the visible tree. Nothing is scheduled while detached.
pub struct MarqueeLabel {
    imp: Rc<RefCell<MarqueeLabelPriv>>,
    spawner: Rc<dyn Spawner>,
}

impl MarqueeLabel {
    /// `style` is copied once into the label pair, later changes are limited to the color
    pub fn new(
        bounds: Size,
        style: TextStyle,
        config: &MarqueeConfig,
        measurer: Rc<dyn TextMeasurer>,
        spawner: Rc<dyn Spawner>,
    ) -> Result<Self> {
        config
            .validate()
            .with_context(|| "invalid marquee configuration")?;
        let mut imp = MarqueeLabelPriv {
            buffer: ContentBuffer::new(style, bounds),
            fade: FadeMaskRenderer::new(config.fade_length),
            scheduler: MarqueeScheduler::new(),
            bounds,
            speed: config.speed,
            pause_interval: config.pause_duration()?,
            gap_ratio: config.gap_ratio,
            settle_delay: config.settle_delay(),
            attached: false,
            measurer,
            observer: None,
        };
        imp.refit();
        Ok(Self {
            imp: Rc::new(RefCell::new(imp)),
            spawner,
        })
    }

    // CONTENT

    pub fn content(&self) -> Option<Content> {
        self.imp.borrow().buffer.content().cloned()
    }

    pub fn set_content(&self, content: Option<Content>) {
        trace!("content set to {:?}", content.as_ref().map(Content::plain_text));
        {
            let mut imp = self.imp.borrow_mut();
            imp.buffer.set_content(content);
            imp.refit();
        }
        self.reschedule();
    }

    pub fn set_text(&self, text: &str) {
        self.set_content(Some(Content::plain(text)));
    }

    pub fn set_rich_text(&self, text: RichText) {
        self.set_content(Some(Content::Rich(text)));
    }

    // STYLE

    pub fn style(&self) -> TextStyle {
        self.imp.borrow().buffer.style().clone()
    }

    pub fn text_color(&self) -> Color {
        self.imp.borrow().buffer.style().color
    }

    pub fn set_text_color(&self, color: Color) {
        self.imp.borrow_mut().buffer.set_color(color);
    }

    // SCROLL PARAMETERS

    pub fn pause_interval(&self) -> Duration {
        self.imp.borrow().pause_interval
    }

    /// Takes effect from the next cycle, the current one is not interrupted
    pub fn set_pause_interval(&self, pause_interval: Duration) {
        self.imp.borrow_mut().pause_interval = pause_interval;
    }

    /// pixels per second
    pub fn speed(&self) -> f64 {
        self.imp.borrow().speed
    }

    /// Restarts scrolling with the new speed.
    ///
    /// Speeds that are not a positive finite number are rejected, the previous
    /// speed is kept and the current cycle continues.
    pub fn set_speed(&self, speed: f64) -> Result<()> {
        if let Err(err) = config::validate_speed(speed) {
            warn!("{err}");
            return Err(err);
        }
        self.imp.borrow_mut().speed = speed;
        self.reschedule();
        Ok(())
    }

    // HOST HOOKS

    /// Layout pass of the host.
    ///
    /// Always re-fits the label pair. If the bounds changed the current cycle
    /// is cancelled and the overflow is evaluated again.
    pub fn layout(&self, bounds: Size) {
        let changed = {
            let mut imp = self.imp.borrow_mut();
            let changed = imp.bounds != bounds;
            imp.bounds = bounds;
            if changed {
                imp.scheduler.cancel();
            }
            imp.refit();
            changed
        };
        if changed {
            debug!("bounds changed to {bounds}");
            self.reschedule();
        }
    }

    /// The widget was added to (`true`) or removed from the visible tree.
    ///
    /// Removal cancels everything. Attaching evaluates from scratch, a cycle
    /// cancelled by a removal is never resumed.
    pub fn set_attached(&self, attached: bool) {
        let was_attached = {
            let mut imp = self.imp.borrow_mut();
            let was_attached = imp.attached;
            imp.attached = attached;
            was_attached
        };
        match (was_attached, attached) {
            (_, false) => {
                self.imp.borrow_mut().scheduler.cancel();
                self.notify_state();
            }
            (false, true) => self.reschedule(),
            (true, true) => {}
        }
    }

    /// Calls `observer` with every state the label enters, replacing the previous observer.
    ///
    /// The observer runs with the label unborrowed, but it must not call back into
    /// the label setters.
    pub fn connect_state_changed(&self, observer: impl Fn(ScrollState) + 'static) {
        let observer: StateObserver = Rc::new(observer);
        self.imp.borrow_mut().observer = Some(observer);
    }

    // STATE

    pub fn state(&self) -> ScrollState {
        self.imp.borrow().scheduler.state()
    }

    pub fn translation(&self) -> Option<Translation> {
        self.imp.borrow().scheduler.translation()
    }

    pub fn has_pending_work(&self) -> bool {
        self.imp.borrow().scheduler.has_pending_work()
    }

    pub fn fade_mask(&self) -> Option<FadeMask> {
        self.imp.borrow().fade.mask().cloned()
    }

    /// `[primary, secondary]` at rest
    pub fn segments(&self) -> [ScrollSegment; 2] {
        let imp = self.imp.borrow();
        [
            imp.buffer.primary().clone(),
            imp.buffer.secondary().clone(),
        ]
    }

    /// Frames of `[primary, secondary]` as they should be drawn at `now`
    pub fn presentation(&self, now: Instant) -> [Rect; 2] {
        let imp = self.imp.borrow();
        let offset = imp
            .scheduler
            .translation()
            .map(|translation| translation.offset_at(now))
            .unwrap_or(0.0);
        [
            imp.buffer.primary().frame().translated(-offset, 0.0),
            imp.buffer.secondary().frame().translated(-offset, 0.0),
        ]
    }

    /// cancel, then schedule a fresh evaluation if attached
    fn reschedule(&self) {
        {
            let mut imp = self.imp.borrow_mut();
            imp.scheduler.cancel();
            if imp.attached {
                let task = scheduler::run(Rc::downgrade(&self.imp), imp.settle_delay);
                let handle = runtime::spawn_abortable(self.spawner.as_ref(), task);
                imp.scheduler.schedule(handle);
            } else {
                debug!("detached, evaluation deferred");
            }
        }
        self.notify_state();
    }

    fn notify_state(&self) {
        let (state, observer) = {
            let imp = self.imp.borrow();
            (imp.scheduler.state(), imp.observer.clone())
        };
        if let Some(observer) = observer {
            observer(state);
        }
    }
}

impl Drop for MarqueeLabel {
    fn drop(&mut self) {
        if let Ok(mut imp) = self.imp.try_borrow_mut() {
            imp.scheduler.cancel();
        }
    }
}

impl Debug for MarqueeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let imp = self.imp.borrow();
        f.debug_struct("MarqueeLabel")
            .field("bounds", &imp.bounds)
            .field("content", &imp.buffer.content())
            .field("speed", &imp.speed)
            .field("pause_interval", &imp.pause_interval)
            .field("attached", &imp.attached)
            .field("state", &imp.scheduler.state())
            .finish_non_exhaustive()
    }
}
