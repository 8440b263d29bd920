use crate::{MeasurementRequest, Token};

/// Work the engine asks the host to perform.
///
/// The engine never touches UI objects. Hosts drain commands after feeding events (and after
/// each `tick`) and execute them against the real keyboard, scroll container and focus system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command<K> {
    /// Start delivering keyboard show/hide notifications.
    SubscribeKeyboard,
    UnsubscribeKeyboard,
    /// Measure the container's absolute position in the window and answer with
    /// `on_container_measured`.
    MeasureContainer,
    /// Ask whether `input` descends from the scroll container; answer with
    /// `on_ancestry_result(token, ..)`.
    QueryAncestry { input: K, token: Token },
    /// Render the request in the hidden measurement surface and report its content height with
    /// `on_measurement_content_size(request.token, ..)`.
    ShowMeasurement(MeasurementRequest),
    HideMeasurement,
    /// Scroll so that `input` sits above the keyboard.
    ///
    /// `keyboard_offset` is the additional offset handed to the host's scroll-to-keyboard
    /// primitive (`top_offset + keyboard_clearance_margin - caret_offset`); `caret_offset` is the
    /// distance from the caret's line to the input's bottom edge.
    ScrollToKeyboard {
        input: K,
        caret_offset: f32,
        keyboard_offset: f32,
        animated: bool,
    },
    ScrollTo { x: f32, y: f32, animated: bool },
    ScrollToEnd { animated: bool },
    /// Apply this bottom padding to the container's content.
    SetBottomPadding(f32),
    /// Move focus to `input` through the host focus registry.
    Focus(K),
}
