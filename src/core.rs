use crate::error::{UnveilError, UnveilResult};

pub use kurbo::{Point, Rect, Vec2};

/// Milliseconds on the host's monotonic clock.
///
/// The library never reads wall-clock time for sequencing; hosts deliver a
/// `Millis` into every time-sensitive call and the state machines schedule
/// against it. Tests drive it directly.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub const ZERO: Self = Self(0);

    pub fn after(self, delta_ms: u64) -> Self {
        Self(self.0.saturating_add(delta_ms))
    }

    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Live viewport metrics, as sampled by the host at a reposition trigger.
///
/// `width` is the visual viewport width; `scroll_y` is the document scroll
/// offset used to convert viewport-relative anchor boxes into
/// document-relative tooltip positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f64,
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, scroll_y: f64) -> UnveilResult<Self> {
        if !width.is_finite() || width < 0.0 {
            return Err(UnveilError::layout("viewport width must be finite and >= 0"));
        }
        if !scroll_y.is_finite() {
            return Err(UnveilError::layout("viewport scroll_y must be finite"));
        }
        Ok(Self { width, scroll_y })
    }
}
