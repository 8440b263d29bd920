use alloc::string::String;
use alloc::vec::{Drain, Vec};

use crate::debounce::Debounce;
use crate::key::{InputKey, InputMap};
use crate::measure::CaretMeasurer;
use crate::{
    Command, ContentSize, InputInfo, InputRegistry, KeyboardAvoidOptions, KeyboardEvent,
    MeasurementRequest, ScrollMetrics, ScrollState, Token,
};

/// Distance from the caret's line to the input's bottom edge.
///
/// Never negative: a caret measured below the input's known height (stale height) counts as
/// being on the last line.
pub fn caret_offset(input_height: f32, caret_height: f32) -> f32 {
    (input_height - caret_height).max(0.0)
}

/// Keeps the focused text input of one scroll container visible above the virtual keyboard.
///
/// This type is UI-agnostic:
/// - It does not hold any UI objects.
/// - The host feeds it events (keyboard, focus, selection, content size, scroll) and answers to
///   the asynchronous queries it asks for.
/// - Everything it wants done is queued as a [`Command`]; drain them with
///   [`KeyboardAvoider::drain_commands`].
/// - Deferred work (settling debounces, scroll-to-end after a padding reset) only advances when
///   the host calls [`KeyboardAvoider::tick`], once per scheduling turn.
///
/// All state is per container and is dropped on [`KeyboardAvoider::unmount`].
#[derive(Clone, Debug)]
pub struct KeyboardAvoider<K> {
    options: KeyboardAvoidOptions,
    mounted: bool,
    keyboard_visible: bool,
    top_offset: f32,
    content_bottom_offset: f32,
    awaiting_container: bool,
    focused: Option<K>,

    registry: InputRegistry<K>,
    measurer: CaretMeasurer<K>,
    selection_settle: InputMap<K, Debounce<usize>>,
    size_settle: InputMap<K, Debounce<ContentSize>>,
    scroll_to_end: Debounce<()>,

    next_token: u64,
    ancestry_query: Option<(Token, K)>,
    commands: Vec<Command<K>>,
}

impl<K: InputKey> KeyboardAvoider<K> {
    pub fn new(options: KeyboardAvoidOptions) -> Self {
        kdebug!(
            keyboard_clearance_margin = options.keyboard_clearance_margin,
            measure_settle_turns = options.measure_settle_turns,
            "KeyboardAvoider::new"
        );
        Self {
            measurer: CaretMeasurer::new(options.measure_settle_turns),
            options,
            mounted: false,
            keyboard_visible: false,
            top_offset: 0.0,
            content_bottom_offset: 0.0,
            awaiting_container: false,
            focused: None,
            registry: InputRegistry::new(),
            selection_settle: InputMap::new(),
            size_settle: InputMap::new(),
            scroll_to_end: Debounce::new(1),
            next_token: 0,
            ancestry_query: None,
            commands: Vec::new(),
        }
    }

    pub fn options(&self) -> &KeyboardAvoidOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// New settle-turn counts apply to the next event of each kind; values already waiting keep
    /// the countdown they started with.
    pub fn set_options(&mut self, options: KeyboardAvoidOptions) {
        self.measurer.set_settle_turns(options.measure_settle_turns);
        self.options = options;
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut KeyboardAvoidOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    pub fn top_offset(&self) -> f32 {
        self.top_offset
    }

    pub fn content_bottom_offset(&self) -> f32 {
        self.content_bottom_offset
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            keyboard_visible: self.keyboard_visible,
            top_offset: self.top_offset,
            content_bottom_offset: self.content_bottom_offset,
        }
    }

    pub fn focused(&self) -> Option<&K> {
        self.focused.as_ref()
    }

    pub fn input_info(&self, id: &K) -> Option<&InputInfo> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &InputRegistry<K> {
        &self.registry
    }

    /// What the hidden measurement surface should render right now, if anything.
    pub fn measurement_request(&self) -> Option<&MeasurementRequest> {
        self.measurer.request()
    }

    /// Whether any turn-driven work is waiting for [`Self::tick`].
    pub fn has_pending_turns(&self) -> bool {
        self.scroll_to_end.is_pending()
            || self.measurer.is_settling()
            || self.selection_settle.values().any(Debounce::is_pending)
            || self.size_settle.values().any(Debounce::is_pending)
    }

    /// Drains the queued commands in emission order.
    pub fn drain_commands(&mut self) -> Drain<'_, Command<K>> {
        self.commands.drain(..)
    }

    /// Starts the engine: subscribes to keyboard notifications and asks for the container's
    /// position in the window.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        kdebug!("KeyboardAvoider::mount");
        self.mounted = true;
        self.awaiting_container = true;
        self.commands.push(Command::SubscribeKeyboard);
        self.commands.push(Command::MeasureContainer);
    }

    /// Tears the engine down. Per-input state, the live measurement and every deferral are
    /// dropped; answers arriving afterwards are ignored.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        kdebug!(inputs = self.registry.len(), "KeyboardAvoider::unmount");
        self.mounted = false;
        self.awaiting_container = false;
        self.keyboard_visible = false;
        self.content_bottom_offset = 0.0;
        self.focused = None;
        self.ancestry_query = None;
        self.registry.clear();
        self.selection_settle.clear();
        self.size_settle.clear();
        self.scroll_to_end.cancel();
        if self.measurer.cancel().is_some() {
            self.commands.push(Command::HideMeasurement);
        }
        self.commands.push(Command::UnsubscribeKeyboard);
    }

    /// Answer to [`Command::MeasureContainer`]. Only the first answer after mount is used.
    pub fn on_container_measured(&mut self, top_offset: f32) {
        if !self.mounted || !self.awaiting_container {
            kwarn!(top_offset, "KeyboardAvoider: unexpected container measurement");
            return;
        }
        self.awaiting_container = false;
        self.top_offset = top_offset;
    }

    pub fn on_keyboard(&mut self, event: KeyboardEvent) {
        if !self.mounted {
            return;
        }
        if event.is_show() {
            if self.keyboard_visible {
                return;
            }
            kdebug!(?event, "keyboard shown");
            self.keyboard_visible = true;
            self.scroll_to_end.cancel();
            self.request_scroll_to_focused_input();
            return;
        }

        if !self.keyboard_visible {
            return;
        }
        kdebug!(
            ?event,
            content_bottom_offset = self.content_bottom_offset,
            "keyboard hidden"
        );
        self.keyboard_visible = false;
        self.ancestry_query = None;
        self.cancel_measurement();
        if self.content_bottom_offset != 0.0 {
            self.content_bottom_offset = 0.0;
            self.commands.push(Command::SetBottomPadding(0.0));
            // Scroll to the end once the padding removal has committed.
            self.scroll_to_end.call(());
        }
    }

    /// An input gained focus. `text` is its current value, used when none is cached yet.
    pub fn on_focus(&mut self, id: K, text: Option<&str>) {
        let info = self.registry.get_or_create(id.clone());
        info.init_text(text);
        info.focus_pending_scroll = true;
        self.focused = Some(id);
        self.request_scroll_to_focused_input();
    }

    pub fn on_blur(&mut self, id: &K) {
        if self.focused.as_ref() == Some(id) {
            self.focused = None;
        }
    }

    pub fn on_text_change(&mut self, id: K, text: &str) {
        self.registry.get_or_create(id).text = Some(String::from(text));
    }

    /// The caret of `id` moved. Applied after the selection settle turns.
    pub fn on_selection_change(&mut self, id: K, selection_end: usize, text: Option<&str>) {
        self.registry.get_or_create(id.clone()).init_text(text);
        let turns = self.options.selection_settle_turns;
        let settle = self
            .selection_settle
            .entry(id.clone())
            .or_insert_with(|| Debounce::new(turns));
        if settle.turns() != turns && !settle.is_pending() {
            *settle = Debounce::new(turns);
        }
        if let Some(selection_end) = settle.call(selection_end) {
            self.apply_selection(id, selection_end);
        }
    }

    /// The content size of `id` changed. Debounced by the content-size settle turns.
    pub fn on_content_size_change(&mut self, id: K, size: ContentSize, text: Option<&str>) {
        self.registry.get_or_create(id.clone()).init_text(text);
        let turns = self.options.content_size_settle_turns;
        let settle = self
            .size_settle
            .entry(id.clone())
            .or_insert_with(|| Debounce::new(turns));
        if settle.turns() != turns && !settle.is_pending() {
            *settle = Debounce::new(turns);
        }
        if let Some(size) = settle.call(size) {
            self.apply_content_size(id, size);
        }
    }

    /// Momentum scrolling settled. Grows the bottom padding when the container scrolled past
    /// its real content, so later scroll targets stay reachable.
    ///
    /// The padding only grows while the keyboard is up; it is reset to 0 on keyboard hide.
    pub fn on_momentum_scroll_end(&mut self, metrics: ScrollMetrics) {
        if !self.mounted || !self.keyboard_visible {
            return;
        }
        let shortfall = metrics.overscroll();
        if shortfall <= 0.0 {
            return;
        }
        self.content_bottom_offset = (self.content_bottom_offset + shortfall).max(0.0);
        ktrace!(
            shortfall,
            content_bottom_offset = self.content_bottom_offset,
            "on_momentum_scroll_end"
        );
        self.commands
            .push(Command::SetBottomPadding(self.content_bottom_offset));
    }

    /// Scrolls the focused input above the keyboard, if the keyboard is up and an input has
    /// focus. Continues once the host answers the ancestry query it queues.
    pub fn request_scroll_to_focused_input(&mut self) {
        if !self.mounted || !self.keyboard_visible {
            return;
        }
        let Some(input) = self.focused.clone() else {
            return;
        };
        let token = self.next_token();
        ktrace!(token = token.0, "request_scroll_to_focused_input");
        self.ancestry_query = Some((token, input.clone()));
        self.commands.push(Command::QueryAncestry { input, token });
    }

    /// Answer to [`Command::QueryAncestry`].
    pub fn on_ancestry_result(&mut self, token: Token, is_descendant: bool) {
        let Some((pending, _)) = &self.ancestry_query else {
            ktrace!(token = token.0, "ancestry result with no query pending");
            return;
        };
        if *pending != token {
            ktrace!(
                token = token.0,
                pending = pending.0,
                "stale ancestry result"
            );
            return;
        }
        let Some((_, input)) = self.ancestry_query.take() else {
            return;
        };
        if !is_descendant || !self.is_active_for(&input) {
            return;
        }
        self.scroll_input(input);
    }

    /// Content height reported by the hidden measurement surface for `token`.
    pub fn on_measurement_content_size(&mut self, token: Token, height: f32) {
        if !self.mounted {
            return;
        }
        if let Some((input, caret_height)) = self.measurer.on_content_size(token, height) {
            self.finish_measurement(input, caret_height);
        }
    }

    pub fn scroll_to(&mut self, x: f32, y: f32, animated: bool) {
        self.commands.push(Command::ScrollTo { x, y, animated });
    }

    pub fn scroll_to_end(&mut self, animated: bool) {
        self.commands.push(Command::ScrollToEnd { animated });
    }

    pub fn focus_input(&mut self, id: K) {
        self.commands.push(Command::Focus(id));
    }

    /// Advances one scheduling turn.
    pub fn tick(&mut self) {
        if !self.mounted {
            return;
        }
        if self.scroll_to_end.tick().is_some() {
            self.commands.push(Command::ScrollToEnd { animated: true });
        }

        let mut selections = Vec::new();
        for (id, settle) in self.selection_settle.iter_mut() {
            if let Some(selection_end) = settle.tick() {
                selections.push((id.clone(), selection_end));
            }
        }
        for (id, selection_end) in selections {
            self.apply_selection(id, selection_end);
        }

        let mut sizes = Vec::new();
        for (id, settle) in self.size_settle.iter_mut() {
            if let Some(size) = settle.tick() {
                sizes.push((id.clone(), size));
            }
        }
        for (id, size) in sizes {
            self.apply_content_size(id, size);
        }

        if let Some((input, caret_height)) = self.measurer.tick() {
            self.finish_measurement(input, caret_height);
        }
    }

    fn next_token(&mut self) -> Token {
        self.next_token = self.next_token.wrapping_add(1);
        Token(self.next_token)
    }

    fn is_active_for(&self, input: &K) -> bool {
        self.mounted && self.keyboard_visible && self.focused.as_ref() == Some(input)
    }

    fn apply_selection(&mut self, id: K, selection_end: usize) {
        let info = self.registry.get_or_create(id.clone());
        let changed = info.selection_end != Some(selection_end);
        info.selection_end = Some(selection_end);
        if (changed || info.focus_pending_scroll) && self.focused.as_ref() == Some(&id) {
            self.request_scroll_to_focused_input();
        }
    }

    fn apply_content_size(&mut self, id: K, size: ContentSize) {
        let info = self.registry.get_or_create(id.clone());
        let changed = info.width != Some(size.width) || info.height != Some(size.height);
        info.width = Some(size.width);
        info.height = Some(size.height);
        if (changed || info.focus_pending_scroll) && self.focused.as_ref() == Some(&id) {
            self.request_scroll_to_focused_input();
        }
    }

    fn scroll_input(&mut self, input: K) {
        let plan = {
            let info = self.registry.get_or_create(input.clone());
            let width = info.width;
            info.text_before_caret()
                .map(|before| (String::from(before), width))
        };
        let Some((before_caret, width)) = plan else {
            self.cancel_measurement();
            self.scroll_to_keyboard(input, 0.0);
            return;
        };
        let Some(width) = width else {
            kdebug!("caret inside text but no content width known; not scrolling");
            self.cancel_measurement();
            return;
        };
        self.measurer.measure(&before_caret, width, input);
        if let Some(request) = self.measurer.request() {
            self.commands.push(Command::ShowMeasurement(request.clone()));
        }
    }

    fn cancel_measurement(&mut self) {
        if self.measurer.cancel().is_some() {
            self.commands.push(Command::HideMeasurement);
        }
    }

    fn finish_measurement(&mut self, input: K, caret_height: f32) {
        self.commands.push(Command::HideMeasurement);
        if !self.is_active_for(&input) {
            return;
        }
        let Some(height) = self.registry.get(&input).and_then(|info| info.height) else {
            kdebug!(caret_height, "measured caret but input height unknown; not scrolling");
            return;
        };
        self.scroll_to_keyboard(input, caret_offset(height, caret_height));
    }

    fn scroll_to_keyboard(&mut self, input: K, caret_offset: f32) {
        let keyboard_offset =
            self.top_offset + self.options.keyboard_clearance_margin - caret_offset;
        if let Some(info) = self.registry.get_mut(&input) {
            info.focus_pending_scroll = false;
        }
        ktrace!(caret_offset, keyboard_offset, "scroll to keyboard");
        self.commands.push(Command::ScrollToKeyboard {
            input,
            caret_offset,
            keyboard_offset,
            animated: true,
        });
    }
}
