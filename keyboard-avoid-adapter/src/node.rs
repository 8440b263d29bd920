use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use keyboard_avoid::ContentSize;

/// An event handler attached to a node. Handlers run on the UI thread only.
pub type Handler<E> = Rc<dyn Fn(&E)>;

/// A text change handler.
pub type TextHandler = Rc<dyn Fn(&str)>;

/// Selection reported by a text input, in `char`s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionChange {
    pub start: usize,
    pub end: usize,
}

/// Classification of a node, computed once when the node is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    SingleLineInput,
    MultiLineInput,
    Container,
    Other,
}

/// Declared props of a text input.
///
/// The host supplies the input's identity and current value explicitly; nothing is recovered
/// from event payloads.
#[derive(Clone)]
pub struct InputProps<K> {
    pub id: K,
    pub value: Option<String>,
    pub on_selection_change: Option<Handler<SelectionChange>>,
    pub on_content_size_change: Option<Handler<ContentSize>>,
    pub on_change_text: Option<TextHandler>,
    instrumented: bool,
}

impl<K> InputProps<K> {
    pub fn new(id: K) -> Self {
        Self {
            id,
            value: None,
            on_selection_change: None,
            on_content_size_change: None,
            on_change_text: None,
            instrumented: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_on_selection_change(mut self, f: impl Fn(&SelectionChange) + 'static) -> Self {
        self.on_selection_change = Some(Rc::new(f));
        self
    }

    pub fn with_on_content_size_change(mut self, f: impl Fn(&ContentSize) + 'static) -> Self {
        self.on_content_size_change = Some(Rc::new(f));
        self
    }

    pub fn with_on_change_text(mut self, f: impl Fn(&str) + 'static) -> Self {
        self.on_change_text = Some(Rc::new(f));
        self
    }

    /// Whether the handlers already forward to a keyboard-avoid engine.
    pub fn is_instrumented(&self) -> bool {
        self.instrumented
    }

    pub(crate) fn mark_instrumented(mut self) -> Self {
        self.instrumented = true;
        self
    }

    /// Fires the selection handler, if any.
    pub fn emit_selection_change(&self, selection: SelectionChange) {
        if let Some(f) = &self.on_selection_change {
            f(&selection);
        }
    }

    /// Fires the content size handler, if any.
    pub fn emit_content_size_change(&self, size: ContentSize) {
        if let Some(f) = &self.on_content_size_change {
            f(&size);
        }
    }

    /// Fires the text change handler, if any.
    pub fn emit_change_text(&self, text: &str) {
        if let Some(f) = &self.on_change_text {
            f(text);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for InputProps<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputProps")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("on_selection_change", &self.on_selection_change.is_some())
            .field("on_content_size_change", &self.on_content_size_change.is_some())
            .field("on_change_text", &self.on_change_text.is_some())
            .field("instrumented", &self.instrumented)
            .finish()
    }
}

/// A rendered child tree, as handed to the scroll container.
///
/// Subtrees are shared through `Rc`, so rebuilding a tree can keep untouched branches as-is.
#[derive(Clone, Debug)]
pub enum Node<K> {
    SingleLineInput(InputProps<K>),
    MultiLineInput(InputProps<K>),
    Container {
        name: String,
        children: Vec<Rc<Node<K>>>,
    },
    Other {
        name: String,
    },
}

impl<K> Node<K> {
    pub fn single_line(props: InputProps<K>) -> Rc<Self> {
        Rc::new(Self::SingleLineInput(props))
    }

    pub fn multi_line(props: InputProps<K>) -> Rc<Self> {
        Rc::new(Self::MultiLineInput(props))
    }

    pub fn container(
        name: impl Into<String>,
        children: impl IntoIterator<Item = Rc<Self>>,
    ) -> Rc<Self> {
        Rc::new(Self::Container {
            name: name.into(),
            children: children.into_iter().collect(),
        })
    }

    pub fn other(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self::Other { name: name.into() })
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::SingleLineInput(_) => Kind::SingleLineInput,
            Self::MultiLineInput(_) => Kind::MultiLineInput,
            Self::Container { .. } => Kind::Container,
            Self::Other { .. } => Kind::Other,
        }
    }

    pub fn input(&self) -> Option<&InputProps<K>> {
        match self {
            Self::SingleLineInput(props) | Self::MultiLineInput(props) => Some(props),
            _ => None,
        }
    }

    pub fn input_id(&self) -> Option<&K> {
        self.input().map(|props| &props.id)
    }

    pub fn children(&self) -> &[Rc<Self>] {
        match self {
            Self::Container { children, .. } => children,
            _ => &[],
        }
    }
}

impl<K: PartialEq> Node<K> {
    /// Depth-first search for the input with identity `id`.
    pub fn find_input(&self, id: &K) -> Option<&InputProps<K>> {
        if let Some(props) = self.input() {
            return (&props.id == id).then_some(props);
        }
        self.children().iter().find_map(|child| child.find_input(id))
    }
}
