#[cfg(feature = "tracing")]
macro_rules! swtrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "scrollwatch", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! swtrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! swdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "scrollwatch", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! swdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! swwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "scrollwatch", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! swwarn {
    ($($tt:tt)*) => {};
}
