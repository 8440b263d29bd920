use crate::*;

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use keyboard_avoid::{Command, ContentSize, KeyboardAvoidOptions, KeyboardEvent, TextStyle};

#[derive(Default)]
struct Recorder {
    log: RefCell<Vec<String>>,
}

impl Recorder {
    fn push(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }

    fn take(&self) -> Vec<String> {
        self.log.take()
    }
}

impl InputEventSink<u32> for Recorder {
    fn selection_changed(&self, id: &u32, selection: SelectionChange, text: Option<&str>) {
        self.push(format!("sink:selection:{id}:{}:{text:?}", selection.end));
    }

    fn content_size_changed(&self, id: &u32, size: ContentSize, _text: Option<&str>) {
        self.push(format!("sink:size:{id}:{}", size.height));
    }

    fn text_changed(&self, id: &u32, text: &str) {
        self.push(format!("sink:text:{id}:{text}"));
    }
}

fn sink_of(recorder: &Rc<Recorder>) -> Rc<dyn InputEventSink<u32>> {
    recorder.clone()
}

fn sample_tree() -> Rc<Node<u32>> {
    Node::container(
        "root",
        [
            Node::other("header"),
            Node::container(
                "form",
                [Node::single_line(InputProps::new(1).with_value("name"))],
            ),
            Node::container(
                "notes",
                [
                    Node::other("label"),
                    Node::multi_line(InputProps::new(2).with_value("a\nb")),
                ],
            ),
        ],
    )
}

#[test]
fn instrument_rebuilds_only_branches_with_multiline_inputs() {
    let recorder = Rc::new(Recorder::default());
    let tree = sample_tree();
    let out = instrument(&tree, &sink_of(&recorder));

    assert!(!Rc::ptr_eq(&tree, &out));
    let (before, after) = (tree.children(), out.children());
    assert_eq!(after.len(), 3);
    assert!(Rc::ptr_eq(&before[0], &after[0]));
    assert!(Rc::ptr_eq(&before[1], &after[1]));
    assert!(!Rc::ptr_eq(&before[2], &after[2]));
    assert!(Rc::ptr_eq(&before[2].children()[0], &after[2].children()[0]));

    let input = &after[2].children()[1];
    assert_eq!(input.kind(), Kind::MultiLineInput);
    assert!(input.input().unwrap().is_instrumented());
    assert!(!tree.find_input(&2).unwrap().is_instrumented());
    assert!(!out.find_input(&1).unwrap().is_instrumented());
}

#[test]
fn tree_without_multiline_inputs_is_returned_as_is() {
    let recorder = Rc::new(Recorder::default());
    let tree = Node::container(
        "root",
        [
            Node::other("text"),
            Node::single_line(InputProps::new(1)),
        ],
    );
    let out = instrument(&tree, &sink_of(&recorder));
    assert!(Rc::ptr_eq(&tree, &out));
}

#[test]
fn instrumenting_twice_does_not_wrap_twice() {
    let recorder = Rc::new(Recorder::default());
    let sink = sink_of(&recorder);
    let once = instrument(&sample_tree(), &sink);
    let twice = instrument(&once, &sink);
    assert!(Rc::ptr_eq(&once, &twice));

    twice
        .find_input(&2)
        .unwrap()
        .emit_change_text("x");
    assert_eq!(recorder.take(), vec!["sink:text:2:x".to_string()]);
}

#[test]
fn wrapped_handlers_forward_to_sink_then_user_handler() {
    let recorder = Rc::new(Recorder::default());
    let props = InputProps::new(5)
        .with_value("hello\nworld")
        .with_on_selection_change({
            let recorder = recorder.clone();
            move |sel| recorder.push(format!("user:selection:{}", sel.end))
        })
        .with_on_content_size_change({
            let recorder = recorder.clone();
            move |size| recorder.push(format!("user:size:{}", size.height))
        })
        .with_on_change_text({
            let recorder = recorder.clone();
            move |text| recorder.push(format!("user:text:{text}"))
        });
    let out = instrument(&Node::multi_line(props), &sink_of(&recorder));
    let input = out.input().unwrap();

    input.emit_selection_change(SelectionChange { start: 6, end: 6 });
    input.emit_content_size_change(ContentSize::new(300.0, 48.0));
    input.emit_change_text("hello\nworld!");
    assert_eq!(
        recorder.take(),
        vec![
            "sink:selection:5:6:Some(\"hello\\nworld\")".to_string(),
            "user:selection:6".to_string(),
            "sink:size:5:48".to_string(),
            "user:size:48".to_string(),
            "sink:text:5:hello\nworld!".to_string(),
            "user:text:hello\nworld!".to_string(),
        ]
    );
}

#[test]
fn wrapped_handlers_work_without_user_handlers() {
    let recorder = Rc::new(Recorder::default());
    let out = instrument(
        &Node::multi_line(InputProps::new(8)),
        &sink_of(&recorder),
    );
    out.input()
        .unwrap()
        .emit_selection_change(SelectionChange { start: 0, end: 2 });
    assert_eq!(recorder.take(), vec!["sink:selection:8:2:None".to_string()]);
}

#[test]
fn touch_is_claimed_only_for_unfocused_inputs() {
    let single = Node::SingleLineInput(InputProps::new(1));
    let multi = Node::MultiLineInput(InputProps::new(2));
    let other = Node::<u32>::Other {
        name: "button".to_string(),
    };

    assert!(claims_touch_start(&single, None));
    assert!(claims_touch_start(&multi, Some(&1)));
    assert!(!claims_touch_start(&single, Some(&1)));
    assert!(!claims_touch_start(&other, None));
    assert!(!claims_touch_start(&*sample_tree(), None));
}

// Answers ancestry queries (everything is inside the container) and returns the rest.
fn answer(view: &KeyboardAwareScrollView<u32>) -> Vec<Command<u32>> {
    let mut rest = Vec::new();
    for cmd in view.drain_commands() {
        match cmd {
            Command::QueryAncestry { token, .. } => {
                view.engine_mut().on_ancestry_result(token, true)
            }
            other => rest.push(other),
        }
    }
    rest.extend(view.drain_commands());
    rest
}

#[test]
fn scroll_view_keeps_mid_text_caret_above_keyboard() {
    let style = TextStyle {
        font_size: Some(16.0),
        ..TextStyle::default()
    };
    let view = KeyboardAwareScrollView::new(
        KeyboardAvoidOptions::new().with_measurement_input_style(Some(style.clone())),
    );
    view.mount();
    assert_eq!(
        view.drain_commands(),
        vec![Command::SubscribeKeyboard, Command::MeasureContainer]
    );
    view.engine_mut().on_container_measured(60.0);
    view.engine_mut().on_keyboard(KeyboardEvent::WillShow);

    let rendered = view.render(&sample_tree());
    assert!(rendered.measurement.is_none());
    let notes = rendered.content.find_input(&2).unwrap();

    view.engine_mut().on_focus(2, notes.value.as_deref());
    answer(&view);
    notes.emit_content_size_change(ContentSize::new(280.0, 90.0));
    view.tick();
    view.tick();
    answer(&view);
    notes.emit_selection_change(SelectionChange { start: 2, end: 2 });
    view.tick();
    let cmds = answer(&view);
    let token = match cmds.as_slice() {
        [Command::ShowMeasurement(req)] => {
            assert_eq!(req.text, "a\n");
            assert_eq!(req.width, 280.0);
            req.token
        }
        other => panic!("unexpected commands: {other:?}"),
    };

    let rendered = view.render(&sample_tree());
    let surface = rendered.measurement.expect("measurement surface drawn");
    assert_eq!(surface.request.token, token);
    assert_eq!(surface.style, Some(style));

    view.engine_mut().on_measurement_content_size(token, 45.0);
    view.tick();
    view.tick();
    view.tick();
    assert_eq!(
        view.drain_commands(),
        vec![
            Command::HideMeasurement,
            Command::ScrollToKeyboard {
                input: 2,
                caret_offset: 45.0,
                keyboard_offset: 60.0 + 40.0 - 45.0,
                animated: true,
            },
        ]
    );
    assert!(view.render(&sample_tree()).measurement.is_none());
}

#[test]
fn scroll_view_reports_padding_and_container_kind() {
    let view = KeyboardAwareScrollView::<u32>::new(
        KeyboardAvoidOptions::new().with_use_animated_container(true),
    );
    view.mount();
    view.engine_mut().on_keyboard(KeyboardEvent::DidShow);
    view.engine_mut()
        .on_momentum_scroll_end(keyboard_avoid::ScrollMetrics {
            offset: 300.0,
            viewport: 500.0,
            content: 780.0,
        });

    let rendered = view.render(&Node::other("empty"));
    assert!(rendered.container.animated);
    assert!(!rendered.container.keyboard_avoiding);
    assert_eq!(rendered.bottom_padding, 20.0);

    view.scroll_to(0.0, 10.0, true);
    view.scroll_to_end(false);
    let cmds = view.drain_commands();
    assert_eq!(
        &cmds[cmds.len() - 2..],
        &[
            Command::ScrollTo {
                x: 0.0,
                y: 10.0,
                animated: true,
            },
            Command::ScrollToEnd { animated: false },
        ]
    );
}

#[test]
fn tapping_an_unfocused_input_moves_focus_to_it() {
    let mut view = KeyboardAwareScrollView::new(KeyboardAvoidOptions::new());
    view.mount();
    view.drain_commands();
    let tree = view.render(&sample_tree()).content;
    let name = tree.children()[1].children()[0].clone();
    let notes = tree.children()[2].children()[1].clone();

    view.engine_mut().on_focus(2, None);
    assert!(!view.on_touch_start_capture(&notes));
    assert!(view.on_touch_start_capture(&name));
    view.on_touch_end(&name);
    assert_eq!(view.drain_commands(), vec![Command::Focus(1)]);

    // A claimed gesture that turns into a scroll does not move focus.
    assert!(view.on_touch_start_capture(&name));
    view.on_touch_cancel();
    view.on_touch_end(&name);
    assert!(view.drain_commands().is_empty());
}

#[test]
fn touch_capture_can_be_disabled() {
    let mut view =
        KeyboardAwareScrollView::<u32>::new(KeyboardAvoidOptions::new().with_capture_touches(false));
    let name = Node::SingleLineInput(InputProps::new(1));
    assert!(!view.on_touch_start_capture(&name));
    view.on_touch_end(&name);
    assert!(view.drain_commands().is_empty());
}

#[test]
fn unmount_drops_engine_state() {
    let mut view = KeyboardAwareScrollView::new(KeyboardAvoidOptions::new());
    view.mount();
    let tree = view.render(&sample_tree()).content;
    tree.find_input(&2).unwrap().emit_change_text("typed");
    assert!(view.engine().input_info(&2).is_some());

    view.unmount();
    assert!(view.engine().registry().is_empty());
    assert!(!view.engine().is_mounted());
    assert!(view.drain_commands().contains(&Command::UnsubscribeKeyboard));
}
