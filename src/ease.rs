/// Unit easing curves for driving stage transition visuals.
///
/// `Bezier` is the CSS `cubic-bezier(x1, y1, x2, y2)` family with implicit
/// endpoints (0,0) and (1,1); control x coordinates are clamped into [0,1] so
/// the curve stays invertible.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InOutCubic,
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Ease {
    /// CSS `cubic-bezier(0.4, 0, 0.2, 1)`, the curve the reveal overlay and
    /// card zoom run on.
    pub const fn standard() -> Self {
        Self::Bezier {
            x1: 0.4,
            y1: 0.0,
            x2: 0.2,
            y2: 1.0,
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Bezier { x1, y1, x2, y2 } => bezier_apply(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_coord(c1: f64, c2: f64, u: f64) -> f64 {
    let v = 1.0 - u;
    3.0 * v * v * u * c1 + 3.0 * v * u * u * c2 + u * u * u
}

fn bezier_apply(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let x1 = x1.clamp(0.0, 1.0);
    let x2 = x2.clamp(0.0, 1.0);

    // Invert x(u) = t by bisection; x is monotonic once x1/x2 are in [0,1].
    let mut lo = 0.0;
    let mut hi = 1.0;
    let mut u = t;
    for _ in 0..32 {
        let x = bezier_coord(x1, x2, u);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    bezier_coord(y1, y2, u)
}
