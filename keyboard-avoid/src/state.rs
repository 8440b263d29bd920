/// A lightweight, serializable snapshot of the engine's scroll state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub keyboard_visible: bool,
    /// Absolute position of the container in the window, measured once on mount.
    pub top_offset: f32,
    /// Extra bottom padding keeping a growing multi-line input reachable above the keyboard.
    pub content_bottom_offset: f32,
}
