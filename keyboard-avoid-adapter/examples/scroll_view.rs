use keyboard_avoid::{Command, ContentSize, KeyboardAvoidOptions, KeyboardEvent};
use keyboard_avoid_adapter::{InputProps, KeyboardAwareScrollView, Node, SelectionChange};

fn main() {
    // Example: a host binding driving the scroll view for one form.
    //
    // A binding would:
    // - render its children through `render` and draw the returned tree
    // - feed keyboard/focus events into the engine
    // - call tick() every frame and execute the drained commands
    let mut view = KeyboardAwareScrollView::new(KeyboardAvoidOptions::new());
    view.mount();

    let content = Node::container(
        "form",
        [
            Node::single_line(InputProps::new(1u32).with_value("Ada")),
            Node::multi_line(
                InputProps::new(2u32)
                    .with_value("line one\nline two\nline three")
                    .with_on_change_text(|text| println!("user saw text: {text:?}")),
            ),
        ],
    );
    let rendered = view.render(&content);
    let notes = rendered.content.children()[1].clone();

    view.engine_mut().on_keyboard(KeyboardEvent::DidShow);
    view.engine_mut()
        .on_focus(2, notes.input().and_then(|p| p.value.as_deref()));

    if let Some(props) = notes.input() {
        props.emit_content_size_change(ContentSize::new(300.0, 60.0));
        props.emit_selection_change(SelectionChange { start: 9, end: 9 });
        props.emit_change_text("line one\nline two\nline three!");
    }

    for frame in 0..8 {
        view.tick();
        for command in view.drain_commands() {
            println!("frame {frame}: {command:?}");
            match command {
                Command::MeasureContainer => view.engine_mut().on_container_measured(80.0),
                Command::QueryAncestry { token, .. } => {
                    view.engine_mut().on_ancestry_result(token, true)
                }
                Command::ShowMeasurement(request) => view
                    .engine_mut()
                    .on_measurement_content_size(request.token, 20.0),
                _ => {}
            }
        }
    }

    // Tapping the first input while the second has focus.
    let name = rendered.content.children()[0].clone();
    if view.on_touch_start_capture(&name) {
        view.on_touch_end(&name);
    }
    println!("after tap: {:?}", view.drain_commands());
    view.unmount();
}
