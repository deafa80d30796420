use tracing::warn;

/// Frame-callback ticket granted by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

impl FrameRequestId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Resize-notification subscription receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeToken(u64);

impl ResizeToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Frame-ticket and resize-subscription bookkeeping shared by the in-crate
/// surface implementations.
///
/// A real host owns these primitives; surfaces here emulate them so tests
/// can drive the frame loop and verify that disposal leaves neither pending
/// tickets nor live subscriptions behind.
#[derive(Debug, Default)]
pub struct HostScheduler {
    next_frame_request: u64,
    pending_frames: Vec<FrameRequestId>,
    next_resize_token: u64,
    active_resize_tokens: Vec<ResizeToken>,
    stray_cancels: usize,
}

impl HostScheduler {
    pub fn grant_frame(&mut self) -> FrameRequestId {
        let request = FrameRequestId(self.next_frame_request);
        self.next_frame_request += 1;
        self.pending_frames.push(request);
        request
    }

    pub fn cancel_frame(&mut self, request: FrameRequestId) {
        if let Some(position) = self
            .pending_frames
            .iter()
            .position(|pending| *pending == request)
        {
            self.pending_frames.remove(position);
        } else {
            self.stray_cancels += 1;
            warn!(request = request.raw(), "cancel for unknown frame ticket");
        }
    }

    /// Drains granted tickets; the host then delivers one engine frame per
    /// ticket.
    pub fn take_pending_frames(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending_frames)
    }

    #[must_use]
    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    pub fn subscribe(&mut self) -> ResizeToken {
        let token = ResizeToken(self.next_resize_token);
        self.next_resize_token += 1;
        self.active_resize_tokens.push(token);
        token
    }

    pub fn unsubscribe(&mut self, token: ResizeToken) {
        self.active_resize_tokens.retain(|active| *active != token);
    }

    #[must_use]
    pub fn active_subscriptions(&self) -> usize {
        self.active_resize_tokens.len()
    }

    #[must_use]
    pub fn stray_cancels(&self) -> usize {
        self.stray_cancels
    }
}
