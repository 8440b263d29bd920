/// Platform keyboard notifications.
///
/// Hosts differ in which of these they deliver (some only send the `Will*` pair, others only the
/// `Did*` pair); the engine treats both members of a pair the same way and ignores repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyboardEvent {
    WillShow,
    DidShow,
    WillHide,
    DidHide,
}

impl KeyboardEvent {
    pub fn is_show(self) -> bool {
        matches!(self, Self::WillShow | Self::DidShow)
    }
}

/// Measured content size of a text input, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentSize {
    pub width: f32,
    pub height: f32,
}

impl ContentSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Scroll metrics reported when momentum scrolling settles.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMetrics {
    /// Current scroll offset along the scroll axis.
    pub offset: f32,
    /// Visible extent of the container (aka layout measurement).
    pub viewport: f32,
    /// Total content extent, including any bottom padding already applied.
    pub content: f32,
}

impl ScrollMetrics {
    /// How far the visible bottom edge sits past the end of the content. Zero when it does not.
    pub fn overscroll(&self) -> f32 {
        (self.offset + self.viewport - self.content).max(0.0)
    }
}

/// Correlates an asynchronous host answer with the request that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token(pub u64);
