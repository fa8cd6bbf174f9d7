/// Holds the latest update until the next animation frame.
///
/// Pointer events can arrive many times per frame. Each one overwrites the
/// pending value; the host renders at most once per frame by calling
/// [`FrameCoalescer::take`] from its frame callback.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    pending: Option<T>,
    frame_requested: bool,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            frame_requested: false,
        }
    }
}

impl<T> FrameCoalescer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` for the next frame. Returns true when the caller must
    /// request a frame; false when one is already on its way.
    pub fn schedule(&mut self, value: T) -> bool {
        self.pending = Some(value);
        !std::mem::replace(&mut self.frame_requested, true)
    }

    /// Frame callback: hand out the latest value, if any.
    pub fn take(&mut self) -> Option<T> {
        self.frame_requested = false;
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.frame_requested = false;
    }
}
