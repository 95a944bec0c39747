/// Errors from scene-state operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("movement delta must be finite, got ({0}, {1}, {2})")]
    NonFiniteDelta(f32, f32, f32),
}
