//! A headless scroll observation coordinator.
//!
//! This crate multiplexes scroll observation for one or more scrollable
//! surfaces: throttled callbacks, direction detection, progress computation,
//! and edge-triggered viewport thresholds, with each surface polled at most
//! once per rendering frame no matter how many native notifications fired,
//! and with strictly ordered per-watch sequence numbers.
//!
//! It is host-agnostic. A UI/adapter layer is expected to provide:
//! - surface geometry (offsets + extents), read on demand through a provider
//! - native scroll notifications, forwarded to [`ScrollCoordinator::notify_scroll`]
//! - frame and timer callbacks, driving [`ScrollCoordinator::on_frame`] and
//!   [`ScrollCoordinator::tick`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod error;
mod observers;
mod options;
mod trigger;
mod types;


pub use coordinator::ScrollCoordinator;
pub use error::{DeliveryError, RegisterError};
pub use observers::{
    on_direction, on_intersection, on_parallax, on_progress, on_remaining, on_threshold,
};
pub use options::{
    CoordinatorOptions, DeliveryPolicy, ErrorSink, GeometryProvider, ScrollObserver, SurfaceHook,
    WatchOptions,
};
pub use trigger::{Crossing, EdgeTrigger, overlap_ratio};
pub use types::{
    Axis, Direction, ElementBounds, ScrollSample, SurfaceGeometry, SurfaceId, WatchEvent, WatchId,
};
