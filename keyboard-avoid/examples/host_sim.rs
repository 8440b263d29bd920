use keyboard_avoid::{
    Command, ContentSize, KeyboardAvoidOptions, KeyboardAvoider, KeyboardEvent, ScrollMetrics,
};

// A pretend line height for the hidden measurement surface.
const LINE_HEIGHT: f32 = 20.0;

fn main() {
    // Simulate a host that owns the real keyboard, scroll view and text inputs.
    let mut engine = KeyboardAvoider::<&'static str>::new(KeyboardAvoidOptions::new());
    engine.mount();

    let text = "first line\nsecond line\nthird line";
    engine.on_focus("notes", Some(text));
    engine.on_keyboard(KeyboardEvent::WillShow);
    engine.on_content_size_change("notes", ContentSize::new(320.0, 3.0 * LINE_HEIGHT), None);
    // Caret at the start of "second line".
    engine.on_selection_change("notes", 11, None);

    for frame in 0..8 {
        engine.tick();
        let commands: Vec<_> = engine.drain_commands().collect();
        for command in commands {
            println!("frame {frame}: {command:?}");
            match command {
                Command::MeasureContainer => engine.on_container_measured(64.0),
                Command::QueryAncestry { token, .. } => engine.on_ancestry_result(token, true),
                Command::ShowMeasurement(request) => {
                    let lines = request.text.split('\n').count() as f32;
                    engine.on_measurement_content_size(request.token, lines * LINE_HEIGHT);
                }
                _ => {}
            }
        }
    }

    engine.on_momentum_scroll_end(ScrollMetrics {
        offset: 900.0,
        viewport: 400.0,
        content: 1260.0,
    });
    engine.on_keyboard(KeyboardEvent::DidHide);
    engine.tick();
    let commands: Vec<_> = engine.drain_commands().collect();
    println!("after hide: {commands:?}");
    println!("state: {:?}", engine.scroll_state());
}
