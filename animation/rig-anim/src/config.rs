//! Animator configuration

/// Options for controlling animator behaviour
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    /// Number of slots to reserve up front
    pub initial_capacity: usize,
    /// Whether to maintain the advisory completed-loop counter
    pub track_loops: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 8,
            track_loops: true,
        }
    }
}

impl AnimatorConfig {
    /// Set the number of slots reserved up front
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enable or disable the completed-loop counter
    pub fn with_loop_tracking(mut self, track_loops: bool) -> Self {
        self.track_loops = track_loops;
        self
    }
}
