/// Level-indexed difficulty curves.
///
/// Shape size never shrinks as levels rise and countdown durations never
/// grow; both are clamped (size at grid capacity, durations at a floor) so a
/// misconfigured curve degrades instead of failing. The exact constants are
/// tunable balance values, not contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyPolicy {
    /// Shape size at level 1.
    pub base_shape_size: u32,
    /// Levels between each +1 cell of shape size.
    pub shape_growth_levels: u32,
    /// Memorize countdown at level 1, in seconds.
    pub base_memorize_secs: u32,
    /// Recall countdown at level 1, in seconds.
    pub base_recall_secs: u32,
    /// Levels between each -1 second of countdown time.
    pub duration_shrink_levels: u32,
    /// Countdowns never drop below this many seconds.
    pub min_duration_secs: u32,
}

impl Default for DifficultyPolicy {
    fn default() -> Self {
        Self {
            base_shape_size: 3,
            shape_growth_levels: 2,
            base_memorize_secs: 5,
            base_recall_secs: 10,
            duration_shrink_levels: 3,
            min_duration_secs: 2,
        }
    }
}

impl DifficultyPolicy {
    /// Shape size for `level`, capped at the grid capacity.
    #[must_use]
    pub fn shape_size(&self, level: u32, grid_capacity: usize) -> usize {
        let growth = level.saturating_sub(1) / self.shape_growth_levels.max(1);
        let size = self.base_shape_size.saturating_add(growth).max(1);
        (size as usize).min(grid_capacity.max(1))
    }

    /// Memorize countdown for `level`, in seconds.
    #[must_use]
    pub fn memorize_secs(&self, level: u32) -> u32 {
        self.shrink(self.base_memorize_secs, level)
    }

    /// Recall countdown for `level`, in seconds.
    #[must_use]
    pub fn recall_secs(&self, level: u32) -> u32 {
        self.shrink(self.base_recall_secs, level)
    }

    fn shrink(&self, base: u32, level: u32) -> u32 {
        let steps = level.saturating_sub(1) / self.duration_shrink_levels.max(1);
        base.saturating_sub(steps).max(self.min_duration_secs.max(1))
    }
}
