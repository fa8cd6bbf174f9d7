use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SeekPhase {
    #[default]
    Idle,
    /// Pointer captured. The track rect is frozen at pointer-down.
    Dragging { track: Rect },
}

/// Seek-bar drag controller.
///
/// While dragging, the bar shows a local optimistic position instead of the
/// store's value. On release the final position is emitted once; the
/// optimistic value then stays up until the authoritative progress is
/// observed to change, so the handle never snaps back to the old position.
#[derive(Debug, Clone)]
pub struct SeekBar {
    inset: f32,
    phase: SeekPhase,
    optimistic: Option<f64>,
    awaiting_confirmation: bool,
    hover: Option<f64>,
    hover_track: Option<Rect>,
}

impl SeekBar {
    /// `inset` is the horizontal room reserved for the handle, split evenly
    /// between both ends of the track.
    pub fn new(inset: f32) -> Self {
        Self {
            inset: inset.max(0.0),
            phase: SeekPhase::Idle,
            optimistic: None,
            awaiting_confirmation: false,
            hover: None,
            hover_track: None,
        }
    }

    pub fn phase(&self) -> SeekPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SeekPhase::Dragging { .. })
    }

    pub fn optimistic(&self) -> Option<f64> {
        self.optimistic
    }

    pub fn hover(&self) -> Option<f64> {
        self.hover
    }

    /// Position to render given the store's authoritative progress.
    pub fn displayed(&self, authoritative: f64) -> f64 {
        self.optimistic.unwrap_or(authoritative)
    }

    /// Map a pointer x coordinate onto `[0, 1]` along `track`.
    pub fn progress_at(&self, x: f32, track: Rect) -> f64 {
        let usable = (track.width - self.inset).max(1.0);
        let offset = (x - track.left - self.inset / 2.0).clamp(0.0, usable);
        f64::from(offset / usable)
    }

    /// Pointer pressed. `on_track` must be true only when the track element
    /// itself is the event target, so presses on child controls pass through.
    pub fn pointer_down(
        &mut self,
        on_track: bool,
        x: f32,
        track: Rect,
    ) -> Option<f64> {
        if !on_track || self.is_dragging() {
            return None;
        }

        self.phase = SeekPhase::Dragging { track };
        self.hover = None;
        self.awaiting_confirmation = false;
        let progress = self.progress_at(x, track);
        self.optimistic = Some(progress);
        Some(progress)
    }

    /// Pointer moved anywhere on the page while captured.
    pub fn pointer_move(&mut self, x: f32) -> Option<f64> {
        let SeekPhase::Dragging { track } = self.phase else {
            return None;
        };
        let progress = self.progress_at(x, track);
        self.optimistic = Some(progress);
        Some(progress)
    }

    /// Pointer released. Returns the seek target to send exactly once.
    pub fn pointer_up(&mut self, x: f32) -> Option<f64> {
        let SeekPhase::Dragging { track } = self.phase else {
            return None;
        };
        let progress = self.progress_at(x, track);
        self.phase = SeekPhase::Idle;
        self.optimistic = Some(progress);
        self.awaiting_confirmation = true;
        Some(progress)
    }

    /// Gesture aborted by the platform. Nothing is emitted.
    pub fn pointer_cancel(&mut self) {
        if self.is_dragging() {
            self.phase = SeekPhase::Idle;
            self.optimistic = None;
            self.awaiting_confirmation = false;
        }
    }

    /// The store's progress changed. Drops the optimistic value held after a
    /// release.
    pub fn observe_progress(&mut self, _authoritative: f64) {
        if self.awaiting_confirmation {
            self.awaiting_confirmation = false;
            self.optimistic = None;
        }
    }

    pub fn pointer_enter(&mut self, x: f32, track: Rect) -> Option<f64> {
        self.hover_track = Some(track);
        self.hover_move(x)
    }

    /// Non-captured pointer movement over the track; drives the preview.
    pub fn hover_move(&mut self, x: f32) -> Option<f64> {
        if self.is_dragging() {
            return None;
        }
        let track = self.hover_track?;
        self.hover = Some(self.progress_at(x, track));
        self.hover
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 400.0;
    const INSET: f32 = 16.0;

    fn track() -> Rect {
        Rect::new(0.0, 0.0, WIDTH, 8.0)
    }

    #[test]
    fn drag_to_middle_emits_once() {
        let mut bar = SeekBar::new(INSET);
        let mut emitted = Vec::new();

        assert_eq!(bar.pointer_down(true, 0.0, track()), Some(0.0));
        bar.pointer_move(WIDTH / 2.0);
        emitted.extend(bar.pointer_up(WIDTH / 2.0));
        emitted.extend(bar.pointer_up(WIDTH / 2.0));

        let expected =
            f64::from((WIDTH / 2.0 - INSET / 2.0) / (WIDTH - INSET));
        assert_eq!(emitted.len(), 1);
        assert!((emitted[0] - expected).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&emitted[0]));
    }

    #[test]
    fn ignores_presses_on_child_controls() {
        let mut bar = SeekBar::new(INSET);
        assert_eq!(bar.pointer_down(false, 100.0, track()), None);
        assert!(!bar.is_dragging());
        assert_eq!(bar.pointer_up(100.0), None);
    }

    #[test]
    fn clamps_outside_the_track() {
        let mut bar = SeekBar::new(INSET);
        bar.pointer_down(true, 50.0, track());
        assert_eq!(bar.pointer_move(-300.0), Some(0.0));
        assert_eq!(bar.pointer_move(WIDTH + 300.0), Some(1.0));
    }

    #[test]
    fn optimistic_value_held_until_store_moves() {
        let mut bar = SeekBar::new(INSET);
        bar.pointer_down(true, 10.0, track());
        let target = bar.pointer_up(300.0).unwrap();

        assert_eq!(bar.displayed(0.1), target);
        bar.observe_progress(target);
        assert_eq!(bar.optimistic(), None);
        assert_eq!(bar.displayed(0.42), 0.42);
    }

    #[test]
    fn store_updates_during_drag_do_not_clear_local_value() {
        let mut bar = SeekBar::new(INSET);
        bar.pointer_down(true, 200.0, track());
        bar.observe_progress(0.9);
        assert!(bar.optimistic().is_some());
    }

    #[test]
    fn cancel_clears_without_emitting() {
        let mut bar = SeekBar::new(INSET);
        bar.pointer_down(true, 200.0, track());
        bar.pointer_cancel();

        assert!(!bar.is_dragging());
        assert_eq!(bar.optimistic(), None);
        assert_eq!(bar.pointer_up(200.0), None);
    }

    #[test]
    fn hover_preview_is_independent_of_drag() {
        let mut bar = SeekBar::new(INSET);
        assert!(bar.pointer_enter(WIDTH / 2.0, track()).is_some());
        assert!(bar.hover_move(INSET / 2.0).is_some_and(|p| p == 0.0));

        bar.pointer_down(true, 100.0, track());
        assert_eq!(bar.hover(), None);
        assert_eq!(bar.hover_move(150.0), None);

        bar.pointer_up(100.0);
        assert!(bar.hover_move(150.0).is_some());
        bar.pointer_leave();
        assert_eq!(bar.hover(), None);
    }
}
