use serde::{Deserialize, Serialize};

/// How far a running survey has come, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Words fully passed: the flattened index of the current word.
    pub passed: usize,
    pub total: usize,
}

impl Progress {
    /// `passed / total`, in `[0, 1)` while the survey is running.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64
    }

    /// Words left including the current one.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.passed)
    }
}
