use alloc::string::String;

/// Rejected watch configuration, reported synchronously at `register` time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// `Interval` delivery requires a window strictly greater than zero.
    #[error("interval delivery window must be positive (got {ms} ms)")]
    InvalidPolicy { ms: u64 },
}

/// A failure isolated to a single watch during delivery.
///
/// These are reported through the coordinator's error sink; they never stop
/// delivery to other watches in the same batch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The observer callback panicked while handling an event.
    #[error("observer panicked: {message}")]
    ObserverPanic { message: String },
}
