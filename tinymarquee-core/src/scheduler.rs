//! The scroll loop of a marquee label.
//!
//! A label is either [`ScrollState::Idle`] or [`ScrollState::Scrolling`].
//! Scrolling is a repeating cycle: the label pair rests at the start position
//! for the pause interval, then both copies translate left by
//! `primary width + gap` at constant speed, then the pair snaps back to the
//! start position. Since the second copy ends exactly where the first one
//! started, the snap is invisible.
//!
//! The loop is a single abortable task ([`run`]); cancelling it is the only way
//! to leave `Scrolling`.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
    time::Duration,
};

use log::{debug, trace};
use tokio::time::{sleep, Instant};

use crate::runtime::TaskHandle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCycle {
    /// space between the end of the primary copy and the start of the secondary one
    pub gap: f64,
    /// how far both copies move during the cycle
    pub distance: f64,
    /// how long the movement takes
    pub duration: Duration,
    /// rest time at the start position before moving
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPhase {
    /// resting at the start position
    Paused,
    /// translating
    Moving,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ScrollState {
    #[default]
    Idle,
    Scrolling {
        cycle: ScrollCycle,
        phase: ScrollPhase,
    },
}

impl ScrollState {
    pub fn is_scrolling(&self) -> bool {
        matches!(self, ScrollState::Scrolling { .. })
    }

    pub fn cycle(&self) -> Option<&ScrollCycle> {
        match self {
            ScrollState::Idle => None,
            ScrollState::Scrolling { cycle, .. } => Some(cycle),
        }
    }

    pub fn phase(&self) -> Option<ScrollPhase> {
        match self {
            ScrollState::Idle => None,
            ScrollState::Scrolling { phase, .. } => Some(*phase),
        }
    }
}

/// Linear translation of the label pair that is currently in flight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translation {
    pub starts_at: Instant,
    pub duration: Duration,
    pub distance: f64,
}

impl Translation {
    /// distance travelled at `now`, between 0 and `distance`
    pub fn offset_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.distance;
        }
        let elapsed = now.saturating_duration_since(self.starts_at);
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.distance * progress
    }

    pub fn ends_at(&self) -> Instant {
        self.starts_at + self.duration
    }
}

/// The widget side of the scroll loop
pub trait ScrollDriver {
    fn scheduler(&mut self) -> &mut MarqueeScheduler;

    /// Cycle that starts from the current geometry, `None` when the content fits
    /// (or cannot be scrolled, e.g. with an invalid speed)
    fn plan(&self) -> Option<ScrollCycle>;

    /// Installs (`true`) or removes the edge fade
    fn set_fade(&mut self, active: bool);

    /// Moves the label pair to the start position of `cycle`
    fn rest(&mut self, cycle: &ScrollCycle);

    /// Told about every state the loop enters, called with no borrow of the driver held
    fn observer(&self) -> Option<StateObserver>;
}

pub type StateObserver = Rc<dyn Fn(ScrollState)>;

/// Scroll state and the pending work of one label
#[derive(Debug, Default)]
pub struct MarqueeScheduler {
    state: ScrollState,
    translation: Option<Translation>,
    task: Option<TaskHandle>,
}

impl MarqueeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timing of one scroll cycle.
    ///
    /// `None` when the inputs would give a zero, infinite or undefined duration.
    pub fn plan_cycle(
        primary_width: f64,
        widget_width: f64,
        speed: f64,
        pause: Duration,
        gap_ratio: f64,
    ) -> Option<ScrollCycle> {
        if !(speed.is_finite() && speed > 0.0) {
            return None;
        }
        if !(widget_width.is_finite() && widget_width > 0.0) {
            return None;
        }
        if !(primary_width.is_finite() && primary_width > 0.0) {
            return None;
        }
        if !(gap_ratio.is_finite() && gap_ratio > 0.0) {
            return None;
        }
        let gap = widget_width / gap_ratio;
        let distance = primary_width + gap;
        let duration = Duration::try_from_secs_f64(distance / speed).ok()?;
        if duration.is_zero() {
            return None;
        }
        Some(ScrollCycle {
            gap,
            distance,
            duration,
            delay: pause,
        })
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn translation(&self) -> Option<Translation> {
        self.translation
    }

    /// true while an evaluation or a scroll cycle is scheduled
    pub fn has_pending_work(&self) -> bool {
        self.task.is_some()
    }

    /// Voids the scheduled work, removes the in-flight translation and goes back to Idle.
    /// No-op when already idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("scroll cancelled ({:?})", self.state.phase());
        }
        self.translation = None;
        self.state = ScrollState::Idle;
    }

    /// Tracks `task` as the pending work, cancelling whatever was scheduled before
    pub fn schedule(&mut self, task: TaskHandle) {
        self.cancel();
        self.task = Some(task);
    }

    fn enter_pause(&mut self, cycle: ScrollCycle) {
        if !self.state.is_scrolling() {
            debug!("scroll started: {cycle:?}");
        }
        trace!("cycle paused for {:?}", cycle.delay);
        self.translation = None;
        self.state = ScrollState::Scrolling {
            cycle,
            phase: ScrollPhase::Paused,
        };
    }

    fn enter_motion(&mut self, cycle: ScrollCycle, now: Instant) {
        trace!("cycle moving {}px in {:?}", cycle.distance, cycle.duration);
        self.translation = Some(Translation {
            starts_at: now,
            duration: cycle.duration,
            distance: cycle.distance,
        });
        self.state = ScrollState::Scrolling {
            cycle,
            phase: ScrollPhase::Moving,
        };
    }

    /// The loop decided not to scroll: nothing is left scheduled
    fn settle_idle(&mut self) {
        self.task = None;
        self.translation = None;
        self.state = ScrollState::Idle;
    }
}

/// The scroll loop.
///
/// Waits `settle`, then applies the overflow policy and, while the content
/// overflows, repeats the pause / translate cycle. Each `sleep` is a point
/// where the task may be aborted; after an abort nothing below it runs.
/// Ends on its own only when the content fits or the driver is gone.
pub async fn run<D: ScrollDriver>(driver: Weak<RefCell<D>>, settle: Duration) {
    sleep(settle).await;
    loop {
        let planned = transition(&driver, |driver| {
            let Some(cycle) = driver.plan() else {
                driver.set_fade(false);
                driver.scheduler().settle_idle();
                debug!("content fits, not scrolling");
                return None;
            };
            driver.set_fade(true);
            driver.rest(&cycle);
            driver.scheduler().enter_pause(cycle);
            Some(cycle)
        });
        let Some(Some(cycle)) = planned else {
            return;
        };

        sleep(cycle.delay).await;
        let moved = transition(&driver, |driver| {
            driver.scheduler().enter_motion(cycle, Instant::now())
        });
        if moved.is_none() {
            return;
        }

        sleep(cycle.duration).await;
    }
}

/// Runs `step` on the driver, then reports the resulting state to its observer.
/// `None` when the driver is gone.
fn transition<D: ScrollDriver, R>(
    driver: &Weak<RefCell<D>>,
    step: impl FnOnce(&mut D) -> R,
) -> Option<R> {
    let driver = driver.upgrade()?;
    let (result, state, observer) = {
        let mut driver = driver.borrow_mut();
        let result = step(&mut driver);
        let state = driver.scheduler().state();
        (result, state, driver.observer())
    };
    if let Some(observer) = observer {
        observer(state);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_timing() {
        let cycle =
            MarqueeScheduler::plan_cycle(400.0, 200.0, 100.0, Duration::from_secs(3), 3.5)
                .unwrap();
        assert!((cycle.gap - 57.142857).abs() < 1e-5);
        assert!((cycle.distance - 457.142857).abs() < 1e-5);
        assert!((cycle.duration.as_secs_f64() - 4.571428).abs() < 1e-5);
        assert_eq!(cycle.delay, Duration::from_secs(3));
    }

    #[test]
    fn invalid_speed_never_plans() {
        for speed in [0.0, -70.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                MarqueeScheduler::plan_cycle(400.0, 200.0, speed, Duration::ZERO, 3.5),
                None,
                "speed {speed}"
            );
        }
    }

    #[test]
    fn degenerate_geometry_never_plans() {
        let pause = Duration::ZERO;
        assert_eq!(MarqueeScheduler::plan_cycle(400.0, 0.0, 70.0, pause, 3.5), None);
        assert_eq!(MarqueeScheduler::plan_cycle(0.0, 200.0, 70.0, pause, 3.5), None);
        assert_eq!(
            MarqueeScheduler::plan_cycle(f64::NAN, 200.0, 70.0, pause, 3.5),
            None
        );
        assert_eq!(MarqueeScheduler::plan_cycle(400.0, 200.0, 70.0, pause, 0.0), None);
    }

    #[test]
    fn translation_is_linear_and_clamped() {
        let start = Instant::now();
        let translation = Translation {
            starts_at: start,
            duration: Duration::from_secs(4),
            distance: 400.0,
        };
        assert_eq!(translation.offset_at(start), 0.0);
        assert_eq!(translation.offset_at(start + Duration::from_secs(1)), 100.0);
        assert_eq!(translation.offset_at(start + Duration::from_secs(2)), 200.0);
        assert_eq!(translation.offset_at(start + Duration::from_secs(9)), 400.0);
        assert_eq!(translation.ends_at(), start + Duration::from_secs(4));
    }

    #[test]
    fn cancel_on_idle_is_a_noop() {
        let mut scheduler = MarqueeScheduler::new();
        scheduler.cancel();
        assert_eq!(scheduler.state(), ScrollState::Idle);
        assert!(!scheduler.has_pending_work());
        assert!(scheduler.translation().is_none());
    }

    #[test]
    fn motion_records_translation() {
        let mut scheduler = MarqueeScheduler::new();
        let cycle =
            MarqueeScheduler::plan_cycle(400.0, 200.0, 100.0, Duration::ZERO, 3.5).unwrap();
        scheduler.enter_pause(cycle);
        assert_eq!(scheduler.state().phase(), Some(ScrollPhase::Paused));
        assert!(scheduler.translation().is_none());

        let now = Instant::now();
        scheduler.enter_motion(cycle, now);
        assert_eq!(scheduler.state().phase(), Some(ScrollPhase::Moving));
        assert_eq!(scheduler.translation().unwrap().starts_at, now);

        scheduler.cancel();
        assert_eq!(scheduler.state(), ScrollState::Idle);
        assert!(scheduler.translation().is_none());
    }
}
