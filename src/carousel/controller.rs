//! Auto-advance state machine for the image carousel.
//!
//! The controller owns the current slide index and at most one repeating timer.
//! Pointer hover, keyboard focus, direct interaction and a hidden page each hold
//! the timer off; when the last of them goes away the timer is armed again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::config::CarouselConfig;
use crate::timer::{Scheduler, TimerHandle};

/// Something that can show one slide out of a fixed set.
pub trait SlideView {
    fn slide_count(&self) -> usize;
    /// Marks `active` as the visible slide and indicator, every other one inactive.
    fn render(&self, active: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Kinds of user attention that pause the carousel while they last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attention {
    Pointer,
    Focus,
}

#[derive(Debug, Default)]
struct CarouselState {
    current: usize,
    timer: Option<TimerHandle>,
    startup: Option<TimerHandle>,
    resume: Option<TimerHandle>,
    grace: Option<TimerHandle>,
    pointer: bool,
    focus: bool,
    interacting: bool,
    hidden: bool,
    torn_down: bool,
}

impl CarouselState {
    fn suppressed(&self) -> bool {
        self.pointer || self.focus || self.interacting
    }
}

struct Inner {
    config: CarouselConfig,
    scheduler: Rc<dyn Scheduler>,
    view: Box<dyn SlideView>,
    slide_count: usize,
    state: RefCell<CarouselState>,
}

/// Handle to a running carousel. Clones share the same state.
#[derive(Clone)]
pub struct Carousel {
    inner: Rc<Inner>,
}

impl Carousel {
    /// Shows the first slide and schedules the first arm after the startup delay.
    ///
    /// Returns `None` when the view has no slides.
    pub fn initialize(
        config: CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
        view: Box<dyn SlideView>,
    ) -> Option<Self> {
        let slide_count = view.slide_count();
        if slide_count == 0 {
            debug!("Carousel has no slides, not starting");
            return None;
        }

        let carousel = Self {
            inner: Rc::new(Inner {
                config,
                scheduler,
                view,
                slide_count,
                state: RefCell::new(CarouselState::default()),
            }),
        };
        carousel.show_slide(0);

        let weak = carousel.downgrade();
        let startup = carousel.inner.scheduler.schedule_once(
            carousel.inner.config.startup_delay_ms,
            Box::new(move || {
                if let Some(carousel) = Self::upgrade(&weak) {
                    carousel.inner.state.borrow_mut().startup = None;
                    carousel.arm_timer();
                }
            }),
        );
        carousel.inner.state.borrow_mut().startup = Some(startup);

        debug!("Carousel initialized with {} slides", slide_count);
        Some(carousel)
    }

    fn downgrade(&self) -> Weak<Inner> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Inner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn current_index(&self) -> usize {
        self.inner.state.borrow().current
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.inner.state.borrow().timer.is_some()
    }

    #[cfg(test)]
    pub fn is_suppressed(&self) -> bool {
        self.inner.state.borrow().suppressed()
    }

    /// Shows `index`, wrapped into range. Negative indices count from the end.
    pub fn show_slide(&self, index: isize) {
        let current = {
            let mut state = self.inner.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.current = wrap_index(index, self.inner.slide_count);
            state.current
        };
        self.inner.view.render(current);
    }

    pub fn advance(&self, direction: Direction) {
        let current = self.current_index() as isize;
        self.show_slide(current + direction.offset());
    }

    /// Starts the auto-advance timer, replacing any running one. Does nothing while
    /// suppressed or while the page is hidden.
    pub fn arm_timer(&self) {
        if self.inner.state.borrow().torn_down {
            return;
        }
        self.disarm_timer();

        let mut state = self.inner.state.borrow_mut();
        if let Some(startup) = state.startup.take() {
            self.inner.scheduler.cancel(startup);
        }
        if state.suppressed() || state.hidden {
            trace!("Carousel timer held off");
            return;
        }
        if state.timer.is_none() {
            let weak = self.downgrade();
            let handle = self.inner.scheduler.schedule_repeating(
                self.inner.config.slide_period_ms,
                Box::new(move || {
                    if let Some(carousel) = Self::upgrade(&weak) {
                        carousel.advance(Direction::Next);
                    }
                }),
            );
            state.timer = Some(handle);
            trace!("Carousel timer armed");
        }
    }

    pub fn disarm_timer(&self) {
        let handle = self.inner.state.borrow_mut().timer.take();
        if let Some(handle) = handle {
            self.inner.scheduler.cancel(handle);
            trace!("Carousel timer disarmed");
        }
    }

    /// Pauses auto-advance, runs `action`, and resumes after the cooldown. A newer
    /// interaction replaces the pending resume of an older one.
    pub fn on_user_interaction(&self, action: impl FnOnce(&Carousel)) {
        if self.inner.state.borrow().torn_down {
            return;
        }
        self.inner.state.borrow_mut().interacting = true;
        self.disarm_timer();

        action(self);

        let weak = self.downgrade();
        let resume = self.inner.scheduler.schedule_once(
            self.inner.config.interaction_cooldown_ms,
            Box::new(move || {
                if let Some(carousel) = Self::upgrade(&weak) {
                    {
                        let mut state = carousel.inner.state.borrow_mut();
                        state.resume = None;
                        state.interacting = false;
                    }
                    carousel.arm_timer();
                }
            }),
        );
        let previous = self.inner.state.borrow_mut().resume.replace(resume);
        if let Some(previous) = previous {
            self.inner.scheduler.cancel(previous);
        }
    }

    pub fn on_hover_or_focus_enter(&self, source: Attention) {
        let grace = {
            let mut state = self.inner.state.borrow_mut();
            if state.torn_down {
                return;
            }
            match source {
                Attention::Pointer => state.pointer = true,
                Attention::Focus => state.focus = true,
            }
            state.grace.take()
        };
        if let Some(grace) = grace {
            self.inner.scheduler.cancel(grace);
        }
        self.disarm_timer();
    }

    pub fn on_hover_or_focus_exit(&self, source: Attention) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.torn_down {
                return;
            }
            match source {
                // Leaving with the pointer also ends any focus the pointer left behind
                // on a clicked control.
                Attention::Pointer => {
                    state.pointer = false;
                    state.focus = false;
                }
                Attention::Focus => state.focus = false,
            }
        }

        let grace_ms = self.inner.config.hover_grace_ms;
        if grace_ms == 0 {
            self.arm_timer();
            return;
        }

        let weak = self.downgrade();
        let grace = self.inner.scheduler.schedule_once(
            grace_ms,
            Box::new(move || {
                if let Some(carousel) = Self::upgrade(&weak) {
                    carousel.inner.state.borrow_mut().grace = None;
                    carousel.arm_timer();
                }
            }),
        );
        let previous = self.inner.state.borrow_mut().grace.replace(grace);
        if let Some(previous) = previous {
            self.inner.scheduler.cancel(previous);
        }
    }

    pub fn on_visibility_change(&self, hidden: bool) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.hidden = hidden;
        }
        if hidden {
            self.disarm_timer();
        } else {
            self.arm_timer();
        }
    }

    /// Cancels the timer and every pending callback. The carousel ignores all
    /// later calls.
    pub fn teardown(&self) {
        let handles = {
            let mut state = self.inner.state.borrow_mut();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            [
                state.timer.take(),
                state.startup.take(),
                state.resume.take(),
                state.grace.take(),
            ]
        };
        for handle in handles.into_iter().flatten() {
            self.inner.scheduler.cancel(handle);
        }
        debug!("Carousel torn down");
    }
}

/// Wraps any index into `0..len`. `len` must be non-zero.
pub fn wrap_index(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}
