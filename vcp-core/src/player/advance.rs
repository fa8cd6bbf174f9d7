/// Edge detector for the "track ended" condition.
///
/// The embedded player keeps reporting progress near the end, so a naive
/// threshold check would advance once per message. The detector fires once
/// when progress crosses `1 - epsilon` and re-arms only after progress drops
/// back below the threshold or the track changes.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    epsilon: f64,
    fired: bool,
}

impl AutoAdvance {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            fired: false,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Feed one progress value. Returns true exactly once per crossing.
    pub fn observe(&mut self, progress: f64) -> bool {
        let ended = progress >= 1.0 - self.epsilon;
        if !ended {
            self.fired = false;
            return false;
        }
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    /// Re-arm after the current track changed.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}
