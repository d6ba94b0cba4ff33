/// Opaque identifier for a scrollable surface (viewport or container).
///
/// Ids are minted by the host; the coordinator only uses them to group
/// watches and to query the geometry provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u64);

/// Handle for an active watch registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatchId(pub(crate) u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    X,
    #[default]
    Y,
}

/// Scroll direction derived from consecutive delivered samples.
///
/// `None` means the offset on the configured axis did not move between the
/// two most recent deliveries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Direction of the move from `prev` to `next` on `axis`.
    pub fn from_delta(axis: Axis, prev: u64, next: u64) -> Self {
        use core::cmp::Ordering;
        match (axis, next.cmp(&prev)) {
            (_, Ordering::Equal) => Self::None,
            (Axis::Y, Ordering::Greater) => Self::Down,
            (Axis::Y, Ordering::Less) => Self::Up,
            (Axis::X, Ordering::Greater) => Self::Right,
            (Axis::X, Ordering::Less) => Self::Left,
        }
    }
}

/// A read-on-demand snapshot of a surface's scroll geometry.
///
/// Offsets are measured from the content origin; the scrollable range on an
/// axis is `[0, max_offset(axis)]`. All derived values saturate, so a content
/// extent smaller than the visible extent yields `max_offset == 0` rather
/// than wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceGeometry {
    pub offset_x: u64,
    pub offset_y: u64,
    /// Scrollable content extent.
    pub content_width: u64,
    pub content_height: u64,
    /// Visible (client) extent.
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl SurfaceGeometry {
    pub fn offset(&self, axis: Axis) -> u64 {
        match axis {
            Axis::X => self.offset_x,
            Axis::Y => self.offset_y,
        }
    }

    pub fn content(&self, axis: Axis) -> u64 {
        match axis {
            Axis::X => self.content_width,
            Axis::Y => self.content_height,
        }
    }

    pub fn viewport(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.viewport_width,
            Axis::Y => self.viewport_height,
        }
    }

    /// Maximum scroll offset on `axis` (minimum is always zero).
    pub fn max_offset(&self, axis: Axis) -> u64 {
        self.content(axis).saturating_sub(self.viewport(axis) as u64)
    }

    /// Remaining scrollable distance on `axis`.
    pub fn remaining(&self, axis: Axis) -> u64 {
        self.max_offset(axis).saturating_sub(self.offset(axis))
    }

    /// True when the offset is within `epsilon` of the start bound.
    ///
    /// When content fits inside the viewport (`max_offset == 0`), both
    /// bounds are reached simultaneously.
    pub fn at_start(&self, axis: Axis, epsilon: u64) -> bool {
        self.offset(axis) <= epsilon
    }

    /// True when the offset is within `epsilon` of the end bound.
    pub fn at_end(&self, axis: Axis, epsilon: u64) -> bool {
        self.remaining(axis) <= epsilon
    }

    /// Scroll progress on `axis` in `[0, 1]`.
    ///
    /// When `max_offset == 0` the content is fully visible and counts as
    /// fully scrolled (`1.0`).
    pub fn progress(&self, axis: Axis) -> f32 {
        let max = self.max_offset(axis);
        if max == 0 {
            return 1.0;
        }
        (self.offset(axis) as f64 / max as f64).clamp(0.0, 1.0) as f32
    }
}

/// An element's bounding box in coordinates relative to a surface's visible
/// extent (the viewport origin is `(0, 0)`).
///
/// Coordinates are signed: an element scrolled past the viewport start has a
/// negative position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementBounds {
    pub x: i64,
    pub y: i64,
    pub width: u64,
    pub height: u64,
}

/// An immutable snapshot delivered to observers.
///
/// `sequence` increases by exactly 1 per delivered sample per watch; it never
/// decreases and never skips, except across a pause/resume cycle (suppressed
/// deliveries consume sequence numbers, so the gap is observable).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSample {
    pub surface: SurfaceId,
    /// Geometry read from the provider at delivery time.
    pub geometry: SurfaceGeometry,
    /// Host-supplied monotonic timestamp of the delivery.
    pub timestamp_ms: u64,
    pub sequence: u64,
}

impl ScrollSample {
    pub fn offset_x(&self) -> u64 {
        self.geometry.offset_x
    }

    pub fn offset_y(&self) -> u64 {
        self.geometry.offset_y
    }

    pub fn offset(&self, axis: Axis) -> u64 {
        self.geometry.offset(axis)
    }

    pub fn max_offset(&self, axis: Axis) -> u64 {
        self.geometry.max_offset(axis)
    }

    pub fn remaining(&self, axis: Axis) -> u64 {
        self.geometry.remaining(axis)
    }

    pub fn progress(&self, axis: Axis) -> f32 {
        self.geometry.progress(axis)
    }

    pub fn at_start(&self, axis: Axis, epsilon: u64) -> bool {
        self.geometry.at_start(axis, epsilon)
    }

    pub fn at_end(&self, axis: Axis, epsilon: u64) -> bool {
        self.geometry.at_end(axis, epsilon)
    }
}

/// What an observer receives: a sample with its derived direction, or the
/// terminal notification that the watched surface no longer exists.
///
/// `Detached` is always the last event a watch sees; the coordinator cancels
/// the watch immediately after delivering it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchEvent {
    Sample {
        sample: ScrollSample,
        direction: Direction,
    },
    Detached {
        surface: SurfaceId,
    },
}
