/// A turn-counting debounce.
///
/// The host advances it once per scheduling turn (typically once per animation frame) via
/// [`Debounce::tick`]. A burst of [`Debounce::call`]s collapses into a single firing that carries
/// the value of the *last* call, `turns` turns after that last call.
///
/// With `turns == 0` there is nothing to wait for and `call` hands the value straight back.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    turns: u32,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug)]
struct Pending<T> {
    value: T,
    remaining: u32,
}

impl<T> Debounce<T> {
    pub const fn new(turns: u32) -> Self {
        Self {
            turns,
            pending: None,
        }
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules `value`, replacing any pending one and restarting the countdown.
    ///
    /// Returns `Some(value)` only when `turns == 0` (fire immediately).
    pub fn call(&mut self, value: T) -> Option<T> {
        if self.turns == 0 {
            self.pending = None;
            return Some(value);
        }
        self.pending = Some(Pending {
            value,
            remaining: self.turns,
        });
        None
    }

    /// Advances one scheduling turn. Returns the pending value when its countdown ends.
    pub fn tick(&mut self) -> Option<T> {
        let pending = self.pending.as_mut()?;
        pending.remaining = pending.remaining.saturating_sub(1);
        if pending.remaining > 0 {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// Drops the pending value (if any) without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }
}
