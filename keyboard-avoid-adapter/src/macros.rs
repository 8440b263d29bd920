#[cfg(feature = "tracing")]
macro_rules! ktrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "keyboard_avoid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ktrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! kwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "keyboard_avoid_adapter", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! kwarn {
    ($($tt:tt)*) => {};
}
