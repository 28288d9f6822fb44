//! # Unveil guide (v0.1.0)
//!
//! This module is a standalone, end-to-end walkthrough of Unveil's architecture and public API.
//! It is intentionally detailed so hosts (and future features) can build on a shared mental
//! model of what the library does and, just as importantly, what it refuses to do.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`RevealSequencer`](crate::RevealSequencer): the envelope-opening state machine
//! - [`RevealStage`](crate::RevealStage): the ordered phases of the reveal, `Closed` through `Finished`
//! - [`GuideTour`](crate::GuideTour): the first-visit guided tour controller
//! - [`LayoutProbe`](crate::LayoutProbe): the only way the tour sees the host's rendered layout
//! - [`TooltipLayout`](crate::TooltipLayout): a computed, clamped tooltip rectangle plus arrow offset
//! - [`TimerSet`](crate::TimerSet): cancellable deadlines both machines schedule against
//! - [`WeddingData`](crate::WeddingData): the admin-configurable invitation document
//!
//! Both controllers are *headless*: they own state, timing and geometry, and emit typed events
//! ([`RevealEvent`](crate::RevealEvent), [`TourEvent`](crate::TourEvent)) plus render-ready
//! snapshots. They never touch a DOM, a screen, or an audio device.
//!
//! ---
//!
//! ## "No ambient time, no ambient layout" (and why)
//!
//! Unveil wants sequencing and positioning to be deterministic and testable. To do that:
//!
//! - no controller ever reads a clock; the host passes a monotonic [`Millis`](crate::Millis)
//!   into every time-sensitive call, and pending work lives in a [`TimerSet`](crate::TimerSet)
//!   the host drains with `tick(now)`;
//! - no controller ever queries layout globally; the tour reads anchor boxes and viewport
//!   metrics through a [`LayoutProbe`](crate::LayoutProbe) the host implements;
//! - side effects at the page boundary (audio cue, scroll lock) are injected capabilities
//!   ([`AudioCue`](crate::AudioCue), [`ScrollLock`](crate::ScrollLock)) owned by the sequencer
//!   instance, acquired at construction and released on a single guaranteed path.
//!
//! The payoff is the teardown story: dropping a controller drops its timer set, so nothing can
//! fire or mutate state after the host unmounts it. There is no cancellation token to remember.
//!
//! ---
//!
//! ## The reveal, stage by stage
//!
//! A qualifying gesture (wheel past a small threshold, touch drag past a slightly larger one, or
//! an explicit press) latches the sequence exactly once. From the latch instant `t0`:
//!
//! 1. `Opening` immediately; the scroll lock is released and the audio cue fires (best-effort)
//! 2. `Extracting` at `t0 + 400ms`: the card starts sliding out; the flap drops behind it
//! 3. `Zooming` at `t0 + 1400ms`: the card pins to the full viewport
//! 4. `Revealing` at `t0 + 2400ms`: [`RevealEvent::Opened`](crate::RevealEvent) fires, once
//! 5. `Finished` at `t0 + 3500ms`: the overlay reports nothing left to render
//!
//! Rendering reads pure stage predicates (`past_open`, `past_extract`, `past_zoom`,
//! `is_revealing`) and the two derived placements ([`FlapLayer`](crate::FlapLayer),
//! [`CardPlacement`](crate::CardPlacement)); none of these are stored state, so they can never
//! disagree with the stage.
//!
//! ---
//!
//! ## The tour, step by step
//!
//! The tour holds an immutable step list and a current index. Every positioning (the settle
//! delay after construction, a viewport change, an advance) queries the probe fresh and runs
//! the same routine: skip forward past steps whose anchor is not visible, then center, clamp,
//! and attach the arrow for the first step that is. A step whose anchor only exists at some
//! viewport sizes is thereby *responsive*, not broken, and a tour whose anchors are all hidden
//! completes without showing anything.
//!
//! The geometry lives in [`position_tooltip`](crate::position_tooltip) as a pure function; see
//! its documentation for the exact clamping rules.
//!
//! ---
//!
//! ## Driving both from a host
//!
//! ```rust
//! use unveil::{
//!     Gesture, GuideTour, LayoutProbe, Millis, NoScrollLock, RevealEvent, RevealSequencer,
//!     Rect, SilentCue, TourEvent, Viewport, WeddingData, Language,
//! };
//!
//! struct Snapshot;
//!
//! impl LayoutProbe for Snapshot {
//!     fn anchor_box(&self, anchor_id: &str) -> Option<Rect> {
//!         (anchor_id == "lang-switch").then(|| Rect::new(140.0, 10.0, 180.0, 40.0))
//!     }
//!
//!     fn viewport(&self) -> Viewport {
//!         Viewport { width: 320.0, scroll_y: 0.0 }
//!     }
//! }
//!
//! let data = WeddingData::sample();
//!
//! // Reveal: a wheel gesture latches the sequence; deadlines drive the rest.
//! let mut seq = RevealSequencer::new(
//!     data.reveal_display(Language::En),
//!     Box::new(SilentCue),
//!     Box::new(NoScrollLock),
//! );
//! seq.handle_gesture(Gesture::Wheel { delta_y: -12.0 }, Millis::ZERO);
//! let mut opened = false;
//! while let Some(deadline) = seq.next_deadline() {
//!     opened |= seq.tick(deadline).contains(&RevealEvent::Opened);
//! }
//! assert!(opened && seq.is_finished());
//!
//! // Tour: the settle delay fires the first positioning; hidden anchors skip.
//! let mut tour = GuideTour::new(data.resolve_guide(Language::En), Millis::ZERO);
//! let events = tour.tick(Millis(100), &Snapshot);
//! assert!(matches!(events[0], TourEvent::StepShown { index: 0, .. }));
//! let events = tour.next(Millis(200));
//! assert_eq!(events, vec![]);
//! let events = tour.tick(Millis(500), &Snapshot);
//! assert!(events.contains(&TourEvent::Completed));
//! ```
//!
//! Notes:
//!
//! - `next_deadline()` on either controller tells the host when to call back; there is no
//!   polling requirement.
//! - the second sample step anchors to `mobile-nav`, which the snapshot hides, so advancing
//!   skips it and completes the tour.
//!
//! ---
//!
//! ## The data document
//!
//! [`WeddingData`](crate::WeddingData) is the whole admin-editable document: names, date,
//! greeting, schedule, FAQ, venue, theme, feature toggles, and the localized guide-step text.
//! Its JSON form is camelCase for compatibility with documents exported by the admin surface.
//! Edits go through the closed [`DataUpdate`](crate::DataUpdate) set (there is deliberately no
//! generic path/value setter), and [`WeddingData::validate`](crate::WeddingData::validate)
//! gates what the admin may save, while renderers stay defensive (an unparseable date shows as
//! blank, see [`countdown`](crate::countdown)).
