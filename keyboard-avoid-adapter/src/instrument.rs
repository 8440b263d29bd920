use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use keyboard_avoid::{ContentSize, InputKey, KeyboardAvoider};

use crate::{InputProps, Node, SelectionChange};

/// Receives the events the instrumentation pass intercepts on multi-line inputs.
///
/// `text` is the input's declared value, passed along so the receiver can initialise its cache
/// lazily when the input was never focused through it.
pub trait InputEventSink<K> {
    fn selection_changed(&self, id: &K, selection: SelectionChange, text: Option<&str>);
    fn content_size_changed(&self, id: &K, size: ContentSize, text: Option<&str>);
    fn text_changed(&self, id: &K, text: &str);
}

impl<K: InputKey> InputEventSink<K> for RefCell<KeyboardAvoider<K>> {
    fn selection_changed(&self, id: &K, selection: SelectionChange, text: Option<&str>) {
        let Ok(mut engine) = self.try_borrow_mut() else {
            kwarn!("selection change re-entered the engine; dropped");
            return;
        };
        engine.on_selection_change(id.clone(), selection.end, text);
    }

    fn content_size_changed(&self, id: &K, size: ContentSize, text: Option<&str>) {
        let Ok(mut engine) = self.try_borrow_mut() else {
            kwarn!("content size change re-entered the engine; dropped");
            return;
        };
        engine.on_content_size_change(id.clone(), size, text);
    }

    fn text_changed(&self, id: &K, text: &str) {
        let Ok(mut engine) = self.try_borrow_mut() else {
            kwarn!("text change re-entered the engine; dropped");
            return;
        };
        engine.on_text_change(id.clone(), text);
    }
}

/// Returns `node` with every multi-line input's handlers routed through `sink`.
///
/// Wrapped handlers forward to the sink first, then to the handler the input declared (if
/// any), unchanged. Containers are rebuilt only when one of their descendants changed;
/// everything else is returned by reference, so an untouched tree comes back `Rc::ptr_eq` to
/// the input. Inputs that were already instrumented are left alone.
pub fn instrument<K: Clone + 'static>(
    node: &Rc<Node<K>>,
    sink: &Rc<dyn InputEventSink<K>>,
) -> Rc<Node<K>> {
    match &**node {
        Node::MultiLineInput(props) if !props.is_instrumented() => {
            Rc::new(Node::MultiLineInput(wrap_input(props, sink)))
        }
        Node::Container { name, children } => {
            let mut changed = false;
            let next: Vec<_> = children
                .iter()
                .map(|child| {
                    let out = instrument(child, sink);
                    changed |= !Rc::ptr_eq(child, &out);
                    out
                })
                .collect();
            if !changed {
                return Rc::clone(node);
            }
            Rc::new(Node::Container {
                name: name.clone(),
                children: next,
            })
        }
        _ => Rc::clone(node),
    }
}

fn wrap_input<K: Clone + 'static>(
    props: &InputProps<K>,
    sink: &Rc<dyn InputEventSink<K>>,
) -> InputProps<K> {
    let value: Option<Rc<str>> = props.value.as_deref().map(Rc::from);
    let mut out = props.clone().mark_instrumented();

    out.on_selection_change = Some({
        let (sink, id, value) = (Rc::clone(sink), props.id.clone(), value.clone());
        let user = props.on_selection_change.clone();
        Rc::new(move |selection: &SelectionChange| {
            sink.selection_changed(&id, *selection, value.as_deref());
            if let Some(user) = &user {
                user(selection);
            }
        })
    });

    out.on_content_size_change = Some({
        let (sink, id, value) = (Rc::clone(sink), props.id.clone(), value);
        let user = props.on_content_size_change.clone();
        Rc::new(move |size: &ContentSize| {
            sink.content_size_changed(&id, *size, value.as_deref());
            if let Some(user) = &user {
                user(size);
            }
        })
    });

    out.on_change_text = Some({
        let (sink, id) = (Rc::clone(sink), props.id.clone());
        let user = props.on_change_text.clone();
        Rc::new(move |text: &str| {
            sink.text_changed(&id, text);
            if let Some(user) = &user {
                user(text);
            }
        })
    });

    out
}
