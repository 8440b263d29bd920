use crate::Node;

/// Capture-phase touch-start decision.
///
/// Returns `true` when the touch lands on a text input (single- or multi-line) that does not
/// currently hold focus: the container then claims the gesture and decides itself whether the
/// tap moves focus, instead of letting the touch fall through to the input.
pub fn claims_touch_start<K: PartialEq>(target: &Node<K>, focused: Option<&K>) -> bool {
    match target.input_id() {
        Some(id) => focused != Some(id),
        None => false,
    }
}
