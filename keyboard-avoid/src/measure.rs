use alloc::string::String;

use crate::Token;
use crate::debounce::Debounce;

/// What the hidden measurement surface should render.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeasurementRequest {
    pub token: Token,
    /// Text up to (excluding) the caret.
    pub text: String,
    /// Width the text is laid out in, usually the input's last known content width.
    pub width: f32,
}

/// Computes the height of text up to the caret with an off-screen text surface.
///
/// The measurer owns the surface's render state: while a request is live the host renders
/// [`CaretMeasurer::request`] in a hidden multi-line text surface constrained to its width and
/// reports content size changes back through [`CaretMeasurer::on_content_size`]. Those reports
/// are debounced so that several intermediate layout passes settle into one height.
///
/// Only one request is ever live. `C` is the continuation handed back once the height settles;
/// a superseded request's continuation is dropped and never returned.
#[derive(Clone, Debug)]
pub struct CaretMeasurer<C> {
    next_token: u64,
    live: Option<Live<C>>,
    settle: Debounce<f32>,
}

#[derive(Clone, Debug)]
struct Live<C> {
    request: MeasurementRequest,
    continuation: C,
}

impl<C> CaretMeasurer<C> {
    pub fn new(settle_turns: u32) -> Self {
        Self {
            next_token: 0,
            live: None,
            settle: Debounce::new(settle_turns),
        }
    }

    /// Starts a measurement, superseding any live one.
    pub fn measure(&mut self, text_up_to_caret: &str, width: f32, continuation: C) -> Token {
        self.next_token = self.next_token.wrapping_add(1);
        let token = Token(self.next_token);
        if self.live.is_some() {
            kdebug!(token = token.0, "CaretMeasurer: superseding live measurement");
        }
        self.settle.cancel();
        self.live = Some(Live {
            request: MeasurementRequest {
                token,
                text: String::from(text_up_to_caret),
                width,
            },
            continuation,
        });
        token
    }

    /// The request the hidden surface should currently render, if any.
    pub fn request(&self) -> Option<&MeasurementRequest> {
        self.live.as_ref().map(|l| &l.request)
    }

    pub fn is_visible(&self) -> bool {
        self.live.is_some()
    }

    /// Whether a reported height is waiting out its settle turns.
    pub fn is_settling(&self) -> bool {
        self.settle.is_pending()
    }

    /// Changes the settle turn count. Ignored while a height is settling.
    pub fn set_settle_turns(&mut self, turns: u32) {
        if self.settle.turns() != turns && !self.settle.is_pending() {
            self.settle = Debounce::new(turns);
        }
    }

    /// Feeds a content height reported by the hidden surface.
    ///
    /// Reports for a superseded token are ignored. Returns the resolved continuation only when
    /// the measurer is configured with zero settle turns.
    pub fn on_content_size(&mut self, token: Token, height: f32) -> Option<(C, f32)> {
        let live = self.live.as_ref()?;
        if live.request.token != token {
            ktrace!(
                token = token.0,
                live = live.request.token.0,
                "CaretMeasurer: stale content size"
            );
            return None;
        }
        let height = self.settle.call(height)?;
        self.resolve(height)
    }

    /// Advances one scheduling turn; returns the continuation and the settled height once.
    pub fn tick(&mut self) -> Option<(C, f32)> {
        let height = self.settle.tick()?;
        self.resolve(height)
    }

    /// Abandons the live request without resolving it.
    pub fn cancel(&mut self) -> Option<MeasurementRequest> {
        self.settle.cancel();
        self.live.take().map(|l| l.request)
    }

    fn resolve(&mut self, height: f32) -> Option<(C, f32)> {
        let live = self.live.take()?;
        ktrace!(token = live.request.token.0, height, "CaretMeasurer: resolved");
        Some((live.continuation, height))
    }
}
