use core::sync::atomic::{AtomicU8, Ordering};

use crate::types::{ElementBounds, SurfaceGeometry};

/// An edge-triggered crossing event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossing {
    /// The observed value crossed the threshold upward (below → above, or
    /// outside → inside).
    Enter,
    /// The observed value crossed the threshold downward.
    Exit,
}

const UNSET: u8 = 0;
const BELOW: u8 = 1;
const ABOVE: u8 = 2;

/// Two-sided edge-trigger state machine.
///
/// It enforces the trigger contract:
/// - The first update only establishes the initial side; it never fires.
/// - `Below → Above` fires [`Crossing::Enter`], `Above → Below` fires
///   [`Crossing::Exit`].
/// - Updates that keep the same side fire nothing, no matter how many arrive.
///
/// State lives in an atomic so a trigger can sit behind a shared `Fn`
/// observer; the coordinator serializes deliveries, so `Relaxed` ordering is
/// sufficient.
#[derive(Debug, Default)]
pub struct EdgeTrigger {
    side: AtomicU8,
}

impl EdgeTrigger {
    pub const fn new() -> Self {
        Self {
            side: AtomicU8::new(UNSET),
        }
    }

    /// Feeds the current side (`true` = above/inside) and returns the
    /// crossing event, if any.
    pub fn update(&self, above: bool) -> Option<Crossing> {
        let next = if above { ABOVE } else { BELOW };
        let prev = self.side.swap(next, Ordering::Relaxed);
        match (prev, next) {
            (BELOW, ABOVE) => Some(Crossing::Enter),
            (ABOVE, BELOW) => Some(Crossing::Exit),
            _ => None,
        }
    }

    /// Current side: `None` before the first update, otherwise `Some(above)`.
    pub fn side(&self) -> Option<bool> {
        match self.side.load(Ordering::Relaxed) {
            UNSET => None,
            BELOW => Some(false),
            _ => Some(true),
        }
    }

    /// Forgets the current side; the next update re-establishes it without
    /// firing.
    pub fn reset(&self) {
        self.side.store(UNSET, Ordering::Relaxed);
    }
}

/// Fraction of `bounds` that overlaps the surface's visible extent, in
/// `[0, 1]`.
///
/// `bounds` is expressed relative to the visible extent (viewport origin at
/// `(0, 0)`). A degenerate zero-area box counts as fully overlapping when it
/// lies inside the visible extent, and not overlapping otherwise.
pub fn overlap_ratio(bounds: ElementBounds, geometry: &SurfaceGeometry) -> f32 {
    let vw = geometry.viewport_width as i128;
    let vh = geometry.viewport_height as i128;
    let x0 = (bounds.x as i128).max(0);
    let y0 = (bounds.y as i128).max(0);
    let x1 = (bounds.x as i128 + bounds.width as i128).min(vw);
    let y1 = (bounds.y as i128 + bounds.height as i128).min(vh);
    if x1 < x0 || y1 < y0 {
        return 0.0;
    }

    let area = bounds.width as u128 * bounds.height as u128;
    if area == 0 {
        return 1.0;
    }

    let overlap = (x1 - x0) as u128 * (y1 - y0) as u128;
    ((overlap as f64 / area as f64) as f32).clamp(0.0, 1.0)
}
