use alloc::sync::Arc;

use crate::error::DeliveryError;
use crate::types::{Axis, SurfaceGeometry, SurfaceId, WatchEvent, WatchId};

/// A callback receiving watch deliveries (samples and the terminal detach).
///
/// Observers run inline with the host's rendering pipeline and must not
/// block; a slow observer delays every other watch sharing the frame slot.
pub type ScrollObserver = Arc<dyn Fn(&WatchEvent) + Send + Sync>;

/// Reads a surface's current geometry on demand.
///
/// The coordinator queries this at delivery time and never caches the result
/// across calls; freshness is the provider's responsibility. Returning `None`
/// means the surface no longer exists: affected watches receive a terminal
/// [`WatchEvent::Detached`] and are auto-cancelled.
pub type GeometryProvider = Arc<dyn Fn(SurfaceId) -> Option<SurfaceGeometry> + Send + Sync>;

/// Receives failures isolated to a single watch during delivery.
pub type ErrorSink = Arc<dyn Fn(WatchId, &DeliveryError) + Send + Sync>;

/// Invoked when a surface gains its first watch or loses its last one.
///
/// This is where the host attaches/detaches its native scroll listener.
pub type SurfaceHook = Arc<dyn Fn(SurfaceId) + Send + Sync>;

/// How deliveries are scheduled relative to native scroll notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeliveryPolicy {
    /// Deliver synchronously on every notification. No coalescing; for
    /// observers needing per-event fidelity only.
    Immediate,
    /// At most one delivery per rendering frame. Notifications arriving while
    /// a delivery is already scheduled are absorbed; the delivery reads the
    /// surface's offset at frame-callback time, not at notification time.
    FrameCoalesced,
    /// Trailing-edge throttle: the first notification opens a window of `ms`
    /// milliseconds, further notifications inside it are absorbed, and the
    /// delivery fires once when the window closes, carrying latest state.
    /// Never leading-edge, so the final position is always reported.
    Interval { ms: u64 },
}

/// Configuration for one watch registration.
pub struct WatchOptions {
    pub surface: SurfaceId,
    pub policy: DeliveryPolicy,
    /// Axis used for direction computation.
    pub axis: Axis,
    /// When `true`, ties (`delta == 0`) report the watch's last non-`None`
    /// direction instead of the raw `None`.
    pub sticky_direction: bool,
    pub observer: ScrollObserver,
}

impl WatchOptions {
    pub fn new(
        surface: SurfaceId,
        policy: DeliveryPolicy,
        observer: impl Fn(&WatchEvent) + Send + Sync + 'static,
    ) -> Self {
        Self {
            surface,
            policy,
            axis: Axis::Y,
            sticky_direction: false,
            observer: Arc::new(observer),
        }
    }

    /// Creates options from an already-built observer, e.g. one returned by
    /// the derived-observer constructors ([`crate::on_threshold`] and
    /// friends).
    pub fn from_observer(
        surface: SurfaceId,
        policy: DeliveryPolicy,
        observer: ScrollObserver,
    ) -> Self {
        Self {
            surface,
            policy,
            axis: Axis::Y,
            sticky_direction: false,
            observer,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_sticky_direction(mut self, sticky_direction: bool) -> Self {
        self.sticky_direction = sticky_direction;
        self
    }
}

impl Clone for WatchOptions {
    fn clone(&self) -> Self {
        Self {
            surface: self.surface,
            policy: self.policy,
            axis: self.axis,
            sticky_direction: self.sticky_direction,
            observer: Arc::clone(&self.observer),
        }
    }
}

impl core::fmt::Debug for WatchOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchOptions")
            .field("surface", &self.surface)
            .field("policy", &self.policy)
            .field("axis", &self.axis)
            .field("sticky_direction", &self.sticky_direction)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::ScrollCoordinator`].
///
/// Cheap to clone: all callbacks are stored in `Arc`s.
pub struct CoordinatorOptions {
    /// Required geometry provider; see [`GeometryProvider`].
    pub geometry: GeometryProvider,
    /// Optional sink for isolated observer failures.
    pub error_sink: Option<ErrorSink>,
    /// Fired when a surface gains its first watch.
    pub on_surface_active: Option<SurfaceHook>,
    /// Fired when a surface loses its last watch.
    pub on_surface_idle: Option<SurfaceHook>,
}

impl CoordinatorOptions {
    pub fn new(
        geometry: impl Fn(SurfaceId) -> Option<SurfaceGeometry> + Send + Sync + 'static,
    ) -> Self {
        Self {
            geometry: Arc::new(geometry),
            error_sink: None,
            on_surface_active: None,
            on_surface_idle: None,
        }
    }

    pub fn with_error_sink(
        mut self,
        error_sink: impl Fn(WatchId, &DeliveryError) + Send + Sync + 'static,
    ) -> Self {
        self.error_sink = Some(Arc::new(error_sink));
        self
    }

    pub fn with_on_surface_active(
        mut self,
        on_surface_active: impl Fn(SurfaceId) + Send + Sync + 'static,
    ) -> Self {
        self.on_surface_active = Some(Arc::new(on_surface_active));
        self
    }

    pub fn with_on_surface_idle(
        mut self,
        on_surface_idle: impl Fn(SurfaceId) + Send + Sync + 'static,
    ) -> Self {
        self.on_surface_idle = Some(Arc::new(on_surface_idle));
        self
    }
}

impl Clone for CoordinatorOptions {
    fn clone(&self) -> Self {
        Self {
            geometry: Arc::clone(&self.geometry),
            error_sink: self.error_sink.clone(),
            on_surface_active: self.on_surface_active.clone(),
            on_surface_idle: self.on_surface_idle.clone(),
        }
    }
}

impl core::fmt::Debug for CoordinatorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CoordinatorOptions")
            .field("error_sink", &self.error_sink.is_some())
            .field("on_surface_active", &self.on_surface_active.is_some())
            .field("on_surface_idle", &self.on_surface_idle.is_some())
            .finish_non_exhaustive()
    }
}
