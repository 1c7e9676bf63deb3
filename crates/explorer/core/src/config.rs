/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorerConfig {
    /// Radius (in cells) of the agent's field of view and of the scoring window.
    pub vision_range: u32,
}

impl ExplorerConfig {
    // ===== ray casting =====
    /// Angular increment between two rays, in radians.
    pub const FOV_ANGLE_STEP: f64 = 0.1;
    /// Distance increment when marching along a ray, in cells.
    pub const FOV_DISTANCE_STEP: f64 = 0.4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_RANGE: u32 = 5;
    pub const DEFAULT_MAP_WIDTH: u32 = 52;
    pub const DEFAULT_MAP_HEIGHT: u32 = 52;

    pub fn new() -> Self {
        Self {
            vision_range: Self::DEFAULT_VISION_RANGE,
        }
    }

    pub fn with_vision_range(vision_range: u32) -> Self {
        Self { vision_range }
    }

    /// Side length of a window built around one cell.
    pub fn window_side(&self) -> usize {
        2 * self.vision_range as usize + 1
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new()
    }
}
