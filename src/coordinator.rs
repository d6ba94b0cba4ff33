use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::RegisterError;
use crate::options::{CoordinatorOptions, DeliveryPolicy, ScrollObserver, WatchOptions};
use crate::types::{Axis, Direction, ScrollSample, SurfaceId, WatchEvent, WatchId};

struct WatchState {
    surface: SurfaceId,
    policy: DeliveryPolicy,
    axis: Axis,
    sticky_direction: bool,
    observer: ScrollObserver,
    paused: bool,
    /// Sequence number assigned to the next delivery.
    sequence: u64,
    /// Offset of the last delivered sample on the configured axis.
    last_offset: Option<u64>,
    /// Last non-`None` delivered direction.
    last_direction: Direction,
    /// One pending frame-coalesced delivery slot.
    frame_pending: bool,
    /// Open trailing-edge interval window, if any.
    interval_deadline: Option<u64>,
}

/// A headless scroll observation coordinator.
///
/// This type is intentionally host-agnostic:
/// - It holds no UI objects and never reads a clock; every time-sensitive
///   entry point takes a host-supplied monotonic `now_ms`.
/// - The host forwards native scroll notifications via [`Self::notify_scroll`]
///   and drives scheduling via [`Self::on_frame`] / [`Self::tick`], guided by
///   [`Self::needs_frame`] and [`Self::next_interval_deadline`].
/// - Offsets are always re-read from the geometry provider at delivery time;
///   notification payloads are never trusted.
///
/// Deliveries are strictly serialized: the coordinator runs on the host's
/// single event loop and takes `&mut self`, so one observer can never run
/// concurrently with (or reentrantly inside) another.
pub struct ScrollCoordinator {
    options: CoordinatorOptions,
    watches: BTreeMap<WatchId, WatchState>,
    next_watch: u64,
}

impl ScrollCoordinator {
    pub fn new(options: CoordinatorOptions) -> Self {
        Self {
            options,
            watches: BTreeMap::new(),
            next_watch: 0,
        }
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    /// Registers a watch and returns its handle.
    ///
    /// Fails synchronously with [`RegisterError::InvalidPolicy`] on a
    /// non-positive interval window; policy errors are never raised
    /// mid-stream. Fires the `on_surface_active` hook when this is the
    /// surface's first watch.
    pub fn register(&mut self, options: WatchOptions) -> Result<WatchId, RegisterError> {
        if let DeliveryPolicy::Interval { ms } = options.policy {
            if ms == 0 {
                return Err(RegisterError::InvalidPolicy { ms });
            }
        }

        let surface = options.surface;
        let policy = options.policy;
        let id = WatchId(self.next_watch);
        self.next_watch += 1;

        let first_on_surface = !self.has_watches(surface);
        self.watches.insert(
            id,
            WatchState {
                surface,
                policy,
                axis: options.axis,
                sticky_direction: options.sticky_direction,
                observer: options.observer,
                paused: false,
                sequence: 0,
                last_offset: None,
                last_direction: Direction::None,
                frame_pending: false,
                interval_deadline: None,
            },
        );
        swdebug!(
            watch = id.0,
            surface = surface.0,
            policy = ?policy,
            "register"
        );

        if first_on_surface {
            if let Some(hook) = &self.options.on_surface_active {
                hook(surface);
            }
        }
        Ok(id)
    }

    /// Cancels a watch. Idempotent: unknown or already-cancelled handles are
    /// ignored.
    ///
    /// Takes effect before any already-scheduled-but-not-yet-executed
    /// coalesced delivery fires. Fires the `on_surface_idle` hook when this
    /// was the surface's last watch.
    pub fn cancel(&mut self, watch: WatchId) {
        let Some(state) = self.watches.remove(&watch) else {
            return;
        };
        swdebug!(watch = watch.0, surface = state.surface.0, "cancel");
        if !self.has_watches(state.surface) {
            if let Some(hook) = &self.options.on_surface_idle {
                hook(state.surface);
            }
        }
    }

    /// Suspends deliveries for a watch. Returns `false` for unknown handles.
    ///
    /// Suppressed deliveries still consume sequence numbers, so a later
    /// resume is observable as a gap; direction history is not advanced.
    pub fn pause(&mut self, watch: WatchId) -> bool {
        match self.watches.get_mut(&watch) {
            Some(state) => {
                state.paused = true;
                true
            }
            None => false,
        }
    }

    /// Resumes deliveries for a paused watch. Returns `false` for unknown
    /// handles.
    pub fn resume(&mut self, watch: WatchId) -> bool {
        match self.watches.get_mut(&watch) {
            Some(state) => {
                state.paused = false;
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, watch: WatchId) -> bool {
        self.watches.contains_key(&watch)
    }

    pub fn is_paused(&self, watch: WatchId) -> bool {
        self.watches.get(&watch).is_some_and(|state| state.paused)
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    pub fn has_watches(&self, surface: SurfaceId) -> bool {
        self.watches.values().any(|state| state.surface == surface)
    }

    /// Host entry point for a native scroll notification on `surface`.
    ///
    /// The notification carries no trusted payload; offsets are re-read from
    /// the geometry provider when the resulting delivery executes. Immediate
    /// watches deliver synchronously; frame-coalesced watches mark (at most)
    /// one pending slot for the next [`Self::on_frame`]; interval watches
    /// open their trailing-edge window.
    pub fn notify_scroll(&mut self, surface: SurfaceId, now_ms: u64) {
        swtrace!(surface = surface.0, now_ms, "notify_scroll");
        let mut immediate = Vec::new();
        for (id, state) in self.watches.iter_mut() {
            if state.surface != surface {
                continue;
            }
            match state.policy {
                DeliveryPolicy::Immediate => immediate.push(*id),
                DeliveryPolicy::FrameCoalesced => state.frame_pending = true,
                DeliveryPolicy::Interval { ms } => {
                    if state.interval_deadline.is_none() {
                        state.interval_deadline = Some(now_ms.saturating_add(ms));
                    }
                }
            }
        }
        for id in immediate {
            self.deliver(id, now_ms);
        }
    }

    /// Host's animation-frame callback.
    ///
    /// Flushes every pending frame-coalesced delivery (each one reads its
    /// surface's *current* geometry, so all notifications since the previous
    /// frame collapse into one sample carrying latest state), then fires any
    /// interval windows that have closed.
    pub fn on_frame(&mut self, now_ms: u64) {
        let due: Vec<WatchId> = self
            .watches
            .iter_mut()
            .filter_map(|(id, state)| {
                if state.frame_pending {
                    state.frame_pending = false;
                    Some(*id)
                } else {
                    None
                }
            })
            .collect();
        for id in due {
            self.deliver(id, now_ms);
        }
        self.flush_intervals(now_ms);
    }

    /// Timer entry point for hosts without a frame loop: fires closed
    /// interval windows only.
    pub fn tick(&mut self, now_ms: u64) {
        self.flush_intervals(now_ms);
    }

    /// True when a frame-coalesced delivery is pending, i.e. the host should
    /// request an animation-frame callback and call [`Self::on_frame`] from
    /// it.
    ///
    /// There is nothing to cancel if the watch goes away first: the
    /// delivery-time liveness check skips cancelled watches.
    pub fn needs_frame(&self) -> bool {
        self.watches.values().any(|state| state.frame_pending)
    }

    /// Earliest open interval deadline, for hosts that arm a timer instead of
    /// polling [`Self::tick`].
    pub fn next_interval_deadline(&self) -> Option<u64> {
        self.watches
            .values()
            .filter_map(|state| state.interval_deadline)
            .min()
    }

    /// Host-initiated surface disposal: every watch on `surface` receives the
    /// terminal [`WatchEvent::Detached`] and is cancelled.
    pub fn detach_surface(&mut self, surface: SurfaceId) {
        let ids: Vec<WatchId> = self
            .watches
            .iter()
            .filter(|(_, state)| state.surface == surface)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            self.finish_detached(id);
        }
    }

    fn flush_intervals(&mut self, now_ms: u64) {
        let due: Vec<WatchId> = self
            .watches
            .iter_mut()
            .filter_map(|(id, state)| match state.interval_deadline {
                Some(deadline) if deadline <= now_ms => {
                    state.interval_deadline = None;
                    Some(*id)
                }
                _ => None,
            })
            .collect();
        for id in due {
            self.deliver(id, now_ms);
        }
    }

    fn deliver(&mut self, watch: WatchId, now_ms: u64) {
        // Liveness check: the watch may have been cancelled between
        // scheduling and execution.
        let Some(state) = self.watches.get(&watch) else {
            return;
        };
        let surface = state.surface;

        let Some(geometry) = (self.options.geometry)(surface) else {
            self.finish_detached(watch);
            return;
        };

        let Some(state) = self.watches.get_mut(&watch) else {
            return;
        };
        let sequence = state.sequence;
        state.sequence += 1;
        if state.paused {
            swtrace!(watch = watch.0, sequence, "suppressed while paused");
            return;
        }

        let offset = geometry.offset(state.axis);
        let raw = match state.last_offset {
            None => Direction::None,
            Some(prev) => Direction::from_delta(state.axis, prev, offset),
        };
        if raw != Direction::None {
            state.last_direction = raw;
        }
        let direction = if raw == Direction::None && state.sticky_direction {
            state.last_direction
        } else {
            raw
        };
        state.last_offset = Some(offset);
        let observer = Arc::clone(&state.observer);

        let sample = ScrollSample {
            surface,
            geometry,
            timestamp_ms: now_ms,
            sequence,
        };
        swtrace!(
            watch = watch.0,
            sequence,
            offset,
            direction = ?direction,
            "deliver"
        );
        self.invoke(watch, &observer, &WatchEvent::Sample { sample, direction });
    }

    fn finish_detached(&mut self, watch: WatchId) {
        let Some(state) = self.watches.remove(&watch) else {
            return;
        };
        let surface = state.surface;
        swdebug!(watch = watch.0, surface = surface.0, "surface detached");
        self.invoke(watch, &state.observer, &WatchEvent::Detached { surface });
        if !self.has_watches(surface) {
            if let Some(hook) = &self.options.on_surface_idle {
                hook(surface);
            }
        }
    }

    /// Runs one observer callback, isolating its failure from the rest of the
    /// batch.
    #[cfg(feature = "std")]
    fn invoke(&self, watch: WatchId, observer: &ScrollObserver, event: &WatchEvent) {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| observer(event))) {
            let error = crate::DeliveryError::ObserverPanic {
                message: panic_message(payload.as_ref()),
            };
            swwarn!(watch = watch.0, %error, "observer failed");
            if let Some(sink) = &self.options.error_sink {
                sink(watch, &error);
            }
        }
    }

    /// Without `std` there is no unwinding machinery to lean on; an observer
    /// panic propagates to the host.
    #[cfg(not(feature = "std"))]
    fn invoke(&self, _watch: WatchId, observer: &ScrollObserver, event: &WatchEvent) {
        observer(event);
    }
}

impl core::fmt::Debug for ScrollCoordinator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("options", &self.options)
            .field("watch_count", &self.watches.len())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "std")]
fn panic_message(payload: &(dyn core::any::Any + Send)) -> alloc::string::String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).into()
    } else if let Some(s) = payload.downcast_ref::<alloc::string::String>() {
        s.clone()
    } else {
        "non-string panic payload".into()
    }
}
