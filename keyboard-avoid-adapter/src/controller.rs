use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};

use keyboard_avoid::{
    Command, ContainerKind, InputKey, KeyboardAvoidOptions, KeyboardAvoider, MeasurementRequest,
    TextStyle,
};

use crate::{InputEventSink, Node, claims_touch_start, instrument};

/// The hidden measurement surface the host should draw this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementSurface {
    pub request: MeasurementRequest,
    pub style: Option<TextStyle>,
}

/// Everything the host needs to draw the scroll view for one frame.
#[derive(Clone, Debug)]
pub struct Rendered<K> {
    pub container: ContainerKind,
    /// The content with multi-line inputs instrumented.
    pub content: Rc<Node<K>>,
    /// Bottom padding to apply to the content wrapper.
    pub bottom_padding: f32,
    pub measurement: Option<MeasurementSurface>,
}

/// A framework-neutral keyboard-aware scroll view.
///
/// Wraps a [`KeyboardAvoider`] and adds the adapter workflows around it: instrumenting the
/// rendered children, capture-phase touch handling, and the scroll commands re-exposed to the
/// embedding application.
///
/// This type does not hold any UI objects. Hosts drive it by:
/// - calling `render` with their content each time they render the scroll view
/// - feeding keyboard/focus/scroll events and query answers through `engine_mut`
/// - calling `tick()` once per frame and executing `drain_commands()`
pub struct KeyboardAwareScrollView<K> {
    engine: Rc<RefCell<KeyboardAvoider<K>>>,
    sink: Rc<dyn InputEventSink<K>>,
    claimed: Option<K>,
}

impl<K: InputKey + 'static> KeyboardAwareScrollView<K> {
    pub fn new(options: KeyboardAvoidOptions) -> Self {
        let engine = Rc::new(RefCell::new(KeyboardAvoider::new(options)));
        let sink: Rc<dyn InputEventSink<K>> = engine.clone();
        Self {
            engine,
            sink,
            claimed: None,
        }
    }

    pub fn engine(&self) -> Ref<'_, KeyboardAvoider<K>> {
        self.engine.borrow()
    }

    pub fn engine_mut(&self) -> RefMut<'_, KeyboardAvoider<K>> {
        self.engine.borrow_mut()
    }

    pub fn mount(&self) {
        self.engine_mut().mount();
    }

    pub fn unmount(&mut self) {
        self.claimed = None;
        self.engine_mut().unmount();
    }

    /// Instruments `content` and snapshots the render state for this frame.
    pub fn render(&self, content: &Rc<Node<K>>) -> Rendered<K> {
        let content = instrument(content, &self.sink);
        let engine = self.engine();
        let options = engine.options();
        Rendered {
            container: options.container(),
            content,
            bottom_padding: engine.content_bottom_offset(),
            measurement: engine.measurement_request().map(|request| MeasurementSurface {
                request: request.clone(),
                style: options.measurement_input_style.clone(),
            }),
        }
    }

    /// Capture-phase touch start. Returns whether the scroll view claims the gesture.
    pub fn on_touch_start_capture(&mut self, target: &Node<K>) -> bool {
        let claims = {
            let engine = self.engine();
            engine.options().capture_touches && claims_touch_start(target, engine.focused())
        };
        self.claimed = if claims {
            target.input_id().cloned()
        } else {
            None
        };
        ktrace!(claims, "on_touch_start_capture");
        claims
    }

    /// The claimed gesture ended on `target` without turning into a scroll; a tap on the claimed
    /// input moves focus to it.
    pub fn on_touch_end(&mut self, target: &Node<K>) {
        let Some(claimed) = self.claimed.take() else {
            return;
        };
        if target.input_id() == Some(&claimed) {
            self.engine_mut().focus_input(claimed);
        }
    }

    /// The claimed gesture turned into a scroll or was cancelled.
    pub fn on_touch_cancel(&mut self) {
        self.claimed = None;
    }

    pub fn tick(&self) {
        self.engine_mut().tick();
    }

    pub fn drain_commands(&self) -> Vec<Command<K>> {
        self.engine_mut().drain_commands().collect()
    }

    pub fn scroll_to(&self, x: f32, y: f32, animated: bool) {
        self.engine_mut().scroll_to(x, y, animated);
    }

    pub fn scroll_to_end(&self, animated: bool) {
        self.engine_mut().scroll_to_end(animated);
    }
}
