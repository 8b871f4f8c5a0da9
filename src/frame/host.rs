/// Identifier of one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Host-side animation-frame scheduling (a `requestAnimationFrame` equivalent).
///
/// The host calls back into [`crate::ScrollCompositor::frame`] once per requested frame.
pub trait FrameHost {
    /// Ask for one frame callback.
    fn request_frame(&mut self) -> FrameToken;
    /// Withdraw a previously requested callback.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// In-process host that records requests so tests and the CLI can pump frames by hand.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next: u64,
    pending: Vec<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl HeadlessHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have neither fired nor been cancelled.
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// Fire the oldest outstanding request, if any.
    pub fn take_due(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Total requests made over the host's lifetime.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations over the host's lifetime.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for HeadlessHost {
    fn request_frame(&mut self) -> FrameToken {
        let t = FrameToken(self.next);
        self.next += 1;
        self.requested += 1;
        self.pending.push(t);
        t
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != token);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/host.rs"]
mod tests;
