use alloc::string::String;

/// Default gap between the focused input's bottom edge and the keyboard's top edge.
pub const DEFAULT_KEYBOARD_CLEARANCE_MARGIN: f32 = 40.0;

/// Turns a selection change waits before it is applied, so the platform's selection and text
/// state agree. A settling heuristic, not a correctness guarantee.
pub const DEFAULT_SELECTION_SETTLE_TURNS: u32 = 1;

/// Turns content-size reports are debounced for; multi-line inputs emit several per edit.
pub const DEFAULT_CONTENT_SIZE_SETTLE_TURNS: u32 = 2;

/// Turns the measurement surface is given to finish its layout passes.
pub const DEFAULT_MEASURE_SETTLE_TURNS: u32 = 3;

/// Style applied to the hidden measurement surface.
///
/// It has to match the style of the multi-line inputs being measured, otherwise the
/// width-for-height computation drifts from what the user sees.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub padding_horizontal: f32,
    pub padding_vertical: f32,
}

/// Which container primitive the host should render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerKind {
    pub animated: bool,
    pub keyboard_avoiding: bool,
}

/// Configuration for [`crate::KeyboardAvoider`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeyboardAvoidOptions {
    /// Pixel gap kept between the focused input's bottom and the keyboard's top.
    pub keyboard_clearance_margin: f32,
    pub measurement_input_style: Option<TextStyle>,
    pub use_animated_container: bool,
    pub use_keyboard_avoiding_container: bool,
    /// Claim touches that land on an unfocused text input during the capture phase.
    ///
    /// Only meaningful on hosts with capture-phase touch routing.
    pub capture_touches: bool,
    pub selection_settle_turns: u32,
    pub content_size_settle_turns: u32,
    pub measure_settle_turns: u32,
}

impl Default for KeyboardAvoidOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardAvoidOptions {
    pub fn new() -> Self {
        Self {
            keyboard_clearance_margin: DEFAULT_KEYBOARD_CLEARANCE_MARGIN,
            measurement_input_style: None,
            use_animated_container: false,
            use_keyboard_avoiding_container: false,
            capture_touches: true,
            selection_settle_turns: DEFAULT_SELECTION_SETTLE_TURNS,
            content_size_settle_turns: DEFAULT_CONTENT_SIZE_SETTLE_TURNS,
            measure_settle_turns: DEFAULT_MEASURE_SETTLE_TURNS,
        }
    }

    pub fn container(&self) -> ContainerKind {
        ContainerKind {
            animated: self.use_animated_container,
            keyboard_avoiding: self.use_keyboard_avoiding_container,
        }
    }

    pub fn with_keyboard_clearance_margin(mut self, margin: f32) -> Self {
        self.keyboard_clearance_margin = margin;
        self
    }

    pub fn with_measurement_input_style(mut self, style: Option<TextStyle>) -> Self {
        self.measurement_input_style = style;
        self
    }

    pub fn with_use_animated_container(mut self, animated: bool) -> Self {
        self.use_animated_container = animated;
        self
    }

    pub fn with_use_keyboard_avoiding_container(mut self, keyboard_avoiding: bool) -> Self {
        self.use_keyboard_avoiding_container = keyboard_avoiding;
        self
    }

    pub fn with_capture_touches(mut self, capture_touches: bool) -> Self {
        self.capture_touches = capture_touches;
        self
    }

    /// Overrides the settling heuristics (selection deferral, content-size debounce,
    /// measurement debounce), all counted in scheduling turns.
    pub fn with_settle_turns(mut self, selection: u32, content_size: u32, measure: u32) -> Self {
        self.selection_settle_turns = selection;
        self.content_size_settle_turns = content_size;
        self.measure_settle_turns = measure;
        self
    }
}
