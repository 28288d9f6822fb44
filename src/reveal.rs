use crate::{core::Millis, countdown, timer::TimerSet};

/// Discrete phases of the envelope reveal, in the order they occur.
///
/// Transitions are strictly monotonic for the lifetime of a sequencer; only
/// constructing a new one returns to `Closed`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RevealStage {
    Closed,
    Opening,
    Extracting,
    Zooming,
    Revealing,
    Finished,
}

impl RevealStage {
    pub fn past_open(self) -> bool {
        self != Self::Closed
    }

    pub fn past_extract(self) -> bool {
        self >= Self::Extracting
    }

    pub fn past_zoom(self) -> bool {
        self >= Self::Zooming
    }

    pub fn is_revealing(self) -> bool {
        self == Self::Revealing
    }

    /// Which of the two overlapping layers is on top. The swap happens
    /// exactly at the `past_extract` boundary so the card rises above the
    /// flap while it slides out, then the flap recedes behind it.
    pub fn flap_layer(self) -> FlapLayer {
        if self.past_extract() {
            FlapLayer::BehindCard
        } else {
            FlapLayer::AboveCard
        }
    }

    /// The card leaves its nested in-envelope placement exactly at the
    /// `past_zoom` boundary and pins to the full viewport.
    pub fn card_placement(self) -> CardPlacement {
        if self.past_zoom() {
            CardPlacement::Fullscreen
        } else {
            CardPlacement::Nested
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlapLayer {
    AboveCard,
    BehindCard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPlacement {
    Nested,
    Fullscreen,
}

/// Host gestures routed to the sequencer while the overlay is mounted.
///
/// Delivery must not depend on stage; the sequencer itself no-ops everything
/// once the latch has fired, which keeps the host's listener teardown on a
/// single path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    Press,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealEvent {
    StageChanged(RevealStage),
    /// Fired exactly once, synchronously with the `Revealing` transition, so
    /// the host can begin its own content transitions in sync.
    Opened,
}

/// Best-effort audio playback. Implementations must swallow playback
/// failure; nothing about the sequence depends on the cue being heard.
pub trait AudioCue {
    fn play(&mut self);
}

/// No-op cue for hosts without audio.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&mut self) {}
}

/// Page scroll lock held while the envelope is closed.
///
/// The sequencer acquires on construction and releases at the `Opening`
/// transition or on drop, whichever comes first; release is never called
/// twice. Hosts should hand the lock to at most one live sequencer.
pub trait ScrollLock {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// No-op lock for hosts that do not lock scrolling.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScrollLock;

impl ScrollLock for NoScrollLock {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Read-only display payload for the card face.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealDisplay {
    pub primary_name: String,
    pub secondary_name: String,
    pub event_date: String,
}

impl RevealDisplay {
    /// Human-readable event date, or `None` when the raw value does not
    /// parse. The card renders a blank date rather than failing.
    pub fn display_date(&self) -> Option<String> {
        countdown::format_display_date(&self.event_date)
    }
}

const WHEEL_THRESHOLD: f64 = 5.0;
const TOUCH_THRESHOLD: f64 = 10.0;

const EXTRACT_AT_MS: u64 = 400;
const ZOOM_AT_MS: u64 = 1_400;
const REVEAL_AT_MS: u64 = 2_400;
const FINISH_AT_MS: u64 = 3_500;

/// The envelope-opening state machine.
///
/// A qualifying gesture fires `start` once (gesture latch); the remaining
/// stages run off scheduled deadlines that the host drains with `tick`.
/// Dropping the sequencer cancels everything still pending and releases the
/// scroll lock if it is still held.
pub struct RevealSequencer {
    stage: RevealStage,
    display: RevealDisplay,
    audio: Box<dyn AudioCue>,
    scroll: Box<dyn ScrollLock>,
    lock_held: bool,
    touch_origin_y: Option<f64>,
    opened_emitted: bool,
    timers: TimerSet<RevealStage>,
}

impl RevealSequencer {
    pub fn new(
        display: RevealDisplay,
        audio: Box<dyn AudioCue>,
        mut scroll: Box<dyn ScrollLock>,
    ) -> Self {
        scroll.acquire();
        Self {
            stage: RevealStage::Closed,
            display,
            audio,
            scroll,
            lock_held: true,
            touch_origin_y: None,
            opened_emitted: false,
            timers: TimerSet::new(),
        }
    }

    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    pub fn display(&self) -> &RevealDisplay {
        &self.display
    }

    /// Once `Finished` the overlay renders nothing and ignores everything.
    pub fn is_finished(&self) -> bool {
        self.stage == RevealStage::Finished
    }

    /// Earliest pending stage deadline; hosts use it to schedule the next
    /// `tick` without polling.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn handle_gesture(&mut self, gesture: Gesture, now: Millis) -> Vec<RevealEvent> {
        match gesture {
            Gesture::TouchStart { y } => {
                self.touch_origin_y = Some(y);
                Vec::new()
            }
            Gesture::TouchMove { y } => match self.touch_origin_y {
                Some(origin) if (origin - y).abs() > TOUCH_THRESHOLD => self.start(now),
                _ => Vec::new(),
            },
            Gesture::Wheel { delta_y } if delta_y.abs() > WHEEL_THRESHOLD => self.start(now),
            Gesture::Wheel { .. } => Vec::new(),
            Gesture::Press => self.start(now),
        }
    }

    /// Begins the staged sequence. Idempotent: only the first call while
    /// `Closed` has any effect.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self, now: Millis) -> Vec<RevealEvent> {
        if self.stage != RevealStage::Closed {
            return Vec::new();
        }

        self.audio.play();

        self.stage = RevealStage::Opening;
        self.release_lock();

        self.timers.schedule(now.after(EXTRACT_AT_MS), RevealStage::Extracting);
        self.timers.schedule(now.after(ZOOM_AT_MS), RevealStage::Zooming);
        self.timers.schedule(now.after(REVEAL_AT_MS), RevealStage::Revealing);
        self.timers.schedule(now.after(FINISH_AT_MS), RevealStage::Finished);

        vec![RevealEvent::StageChanged(RevealStage::Opening)]
    }

    /// Drains every stage deadline at or before `now`, in order. Each stage
    /// fires at most once per mount.
    pub fn tick(&mut self, now: Millis) -> Vec<RevealEvent> {
        let mut events = Vec::new();
        for stage in self.timers.due(now) {
            if stage <= self.stage {
                continue;
            }
            self.stage = stage;
            events.push(RevealEvent::StageChanged(stage));
            if stage == RevealStage::Revealing && !self.opened_emitted {
                self.opened_emitted = true;
                events.push(RevealEvent::Opened);
            }
        }
        events
    }

    fn release_lock(&mut self) {
        if self.lock_held {
            self.lock_held = false;
            self.scroll.release();
        }
    }
}

impl Drop for RevealSequencer {
    fn drop(&mut self) {
        self.timers.clear();
        self.release_lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Recorder {
        fn take(&self) -> Vec<&'static str> {
            std::mem::take(&mut *self.log.borrow_mut())
        }
    }

    impl AudioCue for Recorder {
        fn play(&mut self) {
            self.log.borrow_mut().push("play");
        }
    }

    impl ScrollLock for Recorder {
        fn acquire(&mut self) {
            self.log.borrow_mut().push("acquire");
        }

        fn release(&mut self) {
            self.log.borrow_mut().push("release");
        }
    }

    fn sequencer(recorder: &Recorder) -> RevealSequencer {
        RevealSequencer::new(
            RevealDisplay {
                primary_name: "Kenji".to_string(),
                secondary_name: "Mio".to_string(),
                event_date: "2026-10-10".to_string(),
            },
            Box::new(recorder.clone()),
            Box::new(recorder.clone()),
        )
    }

    #[test]
    fn start_is_latched_to_one_sequence() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);
        rec.take();

        assert_eq!(seq.start(Millis(0)).len(), 1);
        assert!(seq.start(Millis(10)).is_empty());
        assert!(seq.start(Millis(20)).is_empty());
        assert_eq!(seq.timers.len(), 4);
    }

    #[test]
    fn gesture_thresholds_gate_start() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);

        // 5 units of wheel delta is not enough; 6 is.
        assert!(seq.handle_gesture(Gesture::Wheel { delta_y: 5.0 }, Millis(0)).is_empty());
        assert_eq!(seq.stage(), RevealStage::Closed);
        assert!(!seq.handle_gesture(Gesture::Wheel { delta_y: -6.0 }, Millis(0)).is_empty());
        assert_eq!(seq.stage(), RevealStage::Opening);
    }

    #[test]
    fn touch_displacement_measured_from_touch_start() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);

        assert!(seq.handle_gesture(Gesture::TouchMove { y: 100.0 }, Millis(0)).is_empty());
        assert!(seq.handle_gesture(Gesture::TouchStart { y: 100.0 }, Millis(0)).is_empty());
        assert!(seq.handle_gesture(Gesture::TouchMove { y: 92.0 }, Millis(5)).is_empty());
        assert!(!seq.handle_gesture(Gesture::TouchMove { y: 89.0 }, Millis(10)).is_empty());
        assert_eq!(seq.stage(), RevealStage::Opening);
    }

    #[test]
    fn stages_fire_at_documented_offsets() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);
        seq.start(Millis(1_000));

        assert!(seq.tick(Millis(1_399)).is_empty());
        assert_eq!(
            seq.tick(Millis(1_400)),
            vec![RevealEvent::StageChanged(RevealStage::Extracting)]
        );
        assert_eq!(
            seq.tick(Millis(2_400)),
            vec![RevealEvent::StageChanged(RevealStage::Zooming)]
        );
        assert_eq!(
            seq.tick(Millis(3_400)),
            vec![
                RevealEvent::StageChanged(RevealStage::Revealing),
                RevealEvent::Opened,
            ]
        );
        assert_eq!(
            seq.tick(Millis(4_500)),
            vec![RevealEvent::StageChanged(RevealStage::Finished)]
        );
        assert!(seq.is_finished());
        assert_eq!(seq.next_deadline(), None);
    }

    #[test]
    fn late_tick_drains_all_stages_in_order() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);
        seq.start(Millis(0));

        let events = seq.tick(Millis(10_000));
        assert_eq!(
            events,
            vec![
                RevealEvent::StageChanged(RevealStage::Extracting),
                RevealEvent::StageChanged(RevealStage::Zooming),
                RevealEvent::StageChanged(RevealStage::Revealing),
                RevealEvent::Opened,
                RevealEvent::StageChanged(RevealStage::Finished),
            ]
        );
    }

    #[test]
    fn finished_ignores_further_gestures_and_ticks() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);
        seq.start(Millis(0));
        seq.tick(Millis(4_000));
        assert!(seq.is_finished());

        assert!(seq.handle_gesture(Gesture::Press, Millis(5_000)).is_empty());
        assert!(seq.tick(Millis(6_000)).is_empty());
        assert!(seq.is_finished());
    }

    #[test]
    fn scroll_lock_held_while_closed_released_on_opening() {
        let rec = Recorder::default();
        let mut seq = sequencer(&rec);
        assert_eq!(rec.take(), vec!["acquire"]);

        seq.start(Millis(0));
        assert_eq!(rec.take(), vec!["play", "release"]);

        // Release must not repeat, not even on drop.
        drop(seq);
        assert!(rec.take().is_empty());
    }

    #[test]
    fn drop_before_start_releases_lock_once() {
        let rec = Recorder::default();
        let seq = sequencer(&rec);
        assert_eq!(rec.take(), vec!["acquire"]);
        drop(seq);
        assert_eq!(rec.take(), vec!["release"]);
    }

    #[test]
    fn derived_flags_follow_stage_boundaries() {
        use RevealStage::*;

        assert!(!Closed.past_open());
        assert!(Opening.past_open());
        assert!(!Opening.past_extract());
        assert!(Extracting.past_extract());
        assert!(!Extracting.past_zoom());
        assert!(Zooming.past_zoom());
        assert!(Revealing.is_revealing());
        assert!(!Finished.is_revealing());

        assert_eq!(Opening.flap_layer(), FlapLayer::AboveCard);
        assert_eq!(Extracting.flap_layer(), FlapLayer::BehindCard);
        assert_eq!(Extracting.card_placement(), CardPlacement::Nested);
        assert_eq!(Zooming.card_placement(), CardPlacement::Fullscreen);
    }

    #[test]
    fn display_date_is_blank_on_malformed_input() {
        let display = RevealDisplay {
            primary_name: String::new(),
            secondary_name: String::new(),
            event_date: "not a date".to_string(),
        };
        assert_eq!(display.display_date(), None);
    }
}
