//! Derived-observer constructors.
//!
//! Each constructor wraps a plain callback into a [`ScrollObserver`] that can
//! be passed to [`crate::WatchOptions::new`]. The wrappers keep their private
//! state in atomics, so one constructed observer belongs to one watch; the
//! terminal [`WatchEvent::Detached`] event is ignored; observers that need
//! it implement the callback directly.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::options::ScrollObserver;
use crate::trigger::{Crossing, EdgeTrigger, overlap_ratio};
use crate::types::{Axis, Direction, ElementBounds, ScrollSample, SurfaceId, WatchEvent};

const fn direction_code(direction: Direction) -> u8 {
    match direction {
        Direction::None => 0,
        Direction::Up => 1,
        Direction::Down => 2,
        Direction::Left => 3,
        Direction::Right => 4,
    }
}

/// Invokes `f` whenever the delivered direction differs from the previously
/// delivered one, including changes back to [`Direction::None`].
pub fn on_direction(
    f: impl Fn(Direction, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    let last = AtomicU8::new(direction_code(Direction::None));
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, direction } = event else {
            return;
        };
        let code = direction_code(*direction);
        if last.swap(code, Ordering::Relaxed) != code {
            f(*direction, sample);
        }
    })
}

/// Invokes `f` with the progress on `axis` for every delivered sample.
pub fn on_progress(
    axis: Axis,
    f: impl Fn(f32, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, .. } = event else {
            return;
        };
        f(sample.progress(axis), sample);
    })
}

/// Edge-triggered offset threshold (the back-to-top pattern).
///
/// Fires [`Crossing::Enter`] exactly once when the offset on `axis` reaches
/// `threshold` after being below it, and [`Crossing::Exit`] once when it
/// drops back below; samples that stay on one side fire nothing.
pub fn on_threshold(
    axis: Axis,
    threshold: u64,
    f: impl Fn(Crossing, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    let trigger = EdgeTrigger::new();
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, .. } = event else {
            return;
        };
        if let Some(crossing) = trigger.update(sample.offset(axis) >= threshold) {
            f(crossing, sample);
        }
    })
}

/// Edge-triggered element visibility.
///
/// `bounds` is queried per sample (delegate it to your layout collaborator)
/// and must return the element's box relative to the surface's visible
/// extent; samples for which it returns `None` leave the trigger untouched.
/// Fires [`Crossing::Enter`] when the overlap ratio reaches
/// `threshold_ratio` and [`Crossing::Exit`] when it drops back below.
pub fn on_intersection(
    threshold_ratio: f32,
    bounds: impl Fn(SurfaceId) -> Option<ElementBounds> + Send + Sync + 'static,
    f: impl Fn(Crossing, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    let trigger = EdgeTrigger::new();
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, .. } = event else {
            return;
        };
        let Some(bounds) = bounds(sample.surface) else {
            return;
        };
        let ratio = overlap_ratio(bounds, &sample.geometry);
        if let Some(crossing) = trigger.update(ratio >= threshold_ratio) {
            f(crossing, sample);
        }
    })
}

/// Edge-triggered near-end trigger (the infinite-load pattern).
///
/// Fires [`Crossing::Enter`] when the remaining scrollable distance on `axis`
/// drops to `distance` or below, and [`Crossing::Exit`] when it rises back
/// above, so a paginated host kicks off at most one fetch per approach to
/// the end.
pub fn on_remaining(
    axis: Axis,
    distance: u64,
    f: impl Fn(Crossing, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    let trigger = EdgeTrigger::new();
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, .. } = event else {
            return;
        };
        if let Some(crossing) = trigger.update(sample.remaining(axis) <= distance) {
            f(crossing, sample);
        }
    })
}

/// Invokes `f` with the offset on `axis` scaled by `factor` for every sample
/// (the parallax pattern).
pub fn on_parallax(
    axis: Axis,
    factor: f32,
    f: impl Fn(f32, &ScrollSample) + Send + Sync + 'static,
) -> ScrollObserver {
    Arc::new(move |event| {
        let WatchEvent::Sample { sample, .. } = event else {
            return;
        };
        f(sample.offset(axis) as f32 * factor, sample);
    })
}
