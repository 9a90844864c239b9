use std::{rc::Rc, time::Duration};

use crate::{
    graphics::{
        fade::FadeMaskRenderer,
        fitter::{self, LayoutFitter},
        util::Size,
    },
    scheduler::{MarqueeScheduler, ScrollCycle, ScrollDriver, StateObserver},
    text::TextMeasurer,
};

use super::content_buffer::ContentBuffer;

pub struct MarqueeLabelPriv {
    pub(super) buffer: ContentBuffer,
    pub(super) fade: FadeMaskRenderer,
    pub(super) scheduler: MarqueeScheduler,
    pub(super) bounds: Size,
    pub(super) speed: f64,
    pub(super) pause_interval: Duration,
    pub(super) gap_ratio: f64,
    pub(super) settle_delay: Duration,
    pub(super) attached: bool,
    pub(super) measurer: Rc<dyn TextMeasurer>,
    pub(super) observer: Option<StateObserver>,
}

impl MarqueeLabelPriv {
    pub(super) fn refit(&mut self) {
        let fitter = LayoutFitter::new(self.measurer.as_ref());
        let (primary, secondary) = self.buffer.pair_mut();
        fitter.fit(primary, self.bounds);
        fitter.fit(secondary, self.bounds);
    }
}

impl ScrollDriver for MarqueeLabelPriv {
    fn scheduler(&mut self) -> &mut MarqueeScheduler {
        &mut self.scheduler
    }

    fn plan(&self) -> Option<ScrollCycle> {
        let primary_width = self.buffer.primary().frame().width;
        if primary_width <= self.bounds.width {
            return None;
        }
        MarqueeScheduler::plan_cycle(
            primary_width,
            self.bounds.width,
            self.speed,
            self.pause_interval,
            self.gap_ratio,
        )
    }

    fn set_fade(&mut self, active: bool) {
        if active {
            self.fade.apply_fade(self.bounds);
        } else {
            self.fade.clear_fade();
        }
    }

    fn rest(&mut self, cycle: &ScrollCycle) {
        let (primary, secondary) = self.buffer.pair_mut();
        fitter::place_at_rest(primary, secondary, cycle.gap);
    }

    fn observer(&self) -> Option<StateObserver> {
        self.observer.clone()
    }
}
