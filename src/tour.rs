use kurbo::Rect;

use crate::{
    core::{Millis, Viewport},
    layout::{self, Placement, TooltipLayout},
    timer::TimerSet,
};

/// First positioning waits this long after construction so the host layout
/// can settle.
pub const SETTLE_DELAY_MS: u64 = 100;
/// Gap between hiding a step and showing the next, covering the exit
/// transition.
pub const ADVANCE_DELAY_MS: u64 = 300;

/// Read-only access to the host's rendered layout.
///
/// `anchor_box` returns the viewport-relative bounding box of a rendered,
/// visible anchor. `None` covers every inapplicable case at once: unknown id,
/// no layout box, `display: none`. Anchors that exist only at certain
/// viewport sizes surface here as `None`, which is what makes steps
/// responsive rather than erroneous.
pub trait LayoutProbe {
    fn anchor_box(&self, anchor_id: &str) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
}

/// One step of the guided tour, fixed at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStep {
    pub anchor_id: String,
    pub title: String,
    pub message: String,
    pub placement: Placement,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TourEvent {
    StepShown { index: usize, layout: TooltipLayout },
    StepSkipped { index: usize },
    /// Fired exactly once: after the last step, or on explicit dismissal.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TourPhase {
    /// Waiting for the settle delay before the first positioning.
    Settling,
    /// A tooltip is visible for the current step.
    Shown,
    /// Hidden for the exit transition, advance timer pending.
    Leaving,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TourTimer {
    Settle,
    Advance,
}

/// The guided-tour controller: an ordered list of steps, a current index,
/// and a recomputed-on-demand tooltip layout.
///
/// The tour owns no layout state of its own; every positioning queries the
/// probe fresh, so a late trigger always positions the current step. All
/// pending timers die with the tour (or at completion), never after.
pub struct GuideTour {
    steps: Vec<GuideStep>,
    index: usize,
    phase: TourPhase,
    layout: Option<TooltipLayout>,
    timers: TimerSet<TourTimer>,
}

impl GuideTour {
    pub fn new(steps: Vec<GuideStep>, now: Millis) -> Self {
        let mut timers = TimerSet::new();
        timers.schedule(now.after(SETTLE_DELAY_MS), TourTimer::Settle);
        Self {
            steps,
            index: 0,
            phase: TourPhase::Settling,
            layout: None,
            timers,
        }
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> Option<&GuideStep> {
        if self.phase == TourPhase::Done {
            return None;
        }
        self.steps.get(self.index)
    }

    /// Layout for the visible tooltip. `None` until a position has been
    /// computed, which prevents a flash at a stale position.
    pub fn layout(&self) -> Option<&TooltipLayout> {
        if self.phase == TourPhase::Shown {
            self.layout.as_ref()
        } else {
            None
        }
    }

    pub fn is_visible(&self) -> bool {
        self.layout().is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TourPhase::Done
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Drains due timers: the settle delay triggers the first positioning,
    /// an advance delay moves to the next step and positions it.
    pub fn tick(&mut self, now: Millis, probe: &dyn LayoutProbe) -> Vec<TourEvent> {
        let mut events = Vec::new();
        for timer in self.timers.due(now) {
            match (timer, self.phase) {
                (TourTimer::Settle, TourPhase::Settling) => {
                    events.extend(self.reposition(probe));
                }
                (TourTimer::Advance, TourPhase::Leaving) => {
                    self.index += 1;
                    events.extend(self.reposition(probe));
                }
                // A stale timer for a phase we already left. Ignore.
                _ => {}
            }
        }
        events
    }

    /// Recompute on viewport resize or scroll. While a tooltip is shown this
    /// repositions it (or skips forward if its anchor vanished); before the
    /// settle delay it simply positions early. During the exit gap the
    /// pending advance will position the next step anyway, so it is ignored.
    pub fn notify_viewport_changed(&mut self, probe: &dyn LayoutProbe) -> Vec<TourEvent> {
        match self.phase {
            TourPhase::Shown | TourPhase::Settling => self.reposition(probe),
            TourPhase::Leaving | TourPhase::Done => Vec::new(),
        }
    }

    /// Advances past the current step: hides the tooltip, waits out the exit
    /// transition, then positions the next step. Completes when the current
    /// step is the last.
    pub fn next(&mut self, now: Millis) -> Vec<TourEvent> {
        if self.phase != TourPhase::Shown {
            return Vec::new();
        }
        if self.index + 1 >= self.steps.len() {
            return vec![self.complete()];
        }
        self.layout = None;
        self.phase = TourPhase::Leaving;
        self.timers.schedule(now.after(ADVANCE_DELAY_MS), TourTimer::Advance);
        Vec::new()
    }

    /// Explicit close: completes immediately without advancing.
    pub fn dismiss(&mut self) -> Vec<TourEvent> {
        if self.phase == TourPhase::Done {
            return Vec::new();
        }
        vec![self.complete()]
    }

    /// Positions the step at the current index, skipping forward past every
    /// step whose anchor is not currently visible. Reaching the end of the
    /// list completes the tour, even when no anchor was ever found.
    #[tracing::instrument(skip(self, probe))]
    fn reposition(&mut self, probe: &dyn LayoutProbe) -> Vec<TourEvent> {
        let mut events = Vec::new();
        if self.phase == TourPhase::Done {
            return events;
        }
        loop {
            let Some(step) = self.steps.get(self.index) else {
                events.push(self.complete());
                break;
            };
            match probe.anchor_box(&step.anchor_id) {
                None => {
                    tracing::debug!(
                        anchor = %step.anchor_id,
                        index = self.index,
                        "anchor not visible, skipping step"
                    );
                    events.push(TourEvent::StepSkipped { index: self.index });
                    self.index += 1;
                }
                Some(anchor) => {
                    let computed = layout::position_tooltip(anchor, probe.viewport(), step.placement);
                    self.layout = Some(computed);
                    self.phase = TourPhase::Shown;
                    events.push(TourEvent::StepShown {
                        index: self.index,
                        layout: computed,
                    });
                    break;
                }
            }
        }
        events
    }

    fn complete(&mut self) -> TourEvent {
        self.phase = TourPhase::Done;
        self.layout = None;
        self.timers.clear();
        TourEvent::Completed
    }
}
