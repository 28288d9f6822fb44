#![forbid(unsafe_code)]

pub mod core;
pub mod countdown;
pub mod ease;
pub mod error;
pub mod guide;
pub mod layout;
pub mod model;
pub mod reveal;
pub mod timer;
pub mod tour;

pub use self::core::{Millis, Point, Rect, Vec2, Viewport};
pub use countdown::TimeLeft;
pub use ease::Ease;
pub use error::{UnveilError, UnveilResult};
pub use layout::{ArrowEdge, Placement, TooltipLayout, position_tooltip};
pub use model::{
    DataUpdate, FaqItem, GuideStepText, Language, LocalizedString, Location, ScheduleIcon,
    ScheduleItem, Theme, Visuals, WeddingData,
};
pub use reveal::{
    AudioCue, CardPlacement, FlapLayer, Gesture, NoScrollLock, RevealDisplay, RevealEvent,
    RevealSequencer, RevealStage, ScrollLock, SilentCue,
};
pub use timer::TimerSet;
pub use tour::{GuideStep, GuideTour, LayoutProbe, TourEvent};
