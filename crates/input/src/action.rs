use glam::Vec3;

/// A high-level action produced from input.
///
/// The frame loop applies actions to the scene and camera; nothing upstream
/// touches either directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Translate the interactive object by a delta.
    MoveObject(Vec3),
    /// Orbit the camera: yaw and pitch in degrees, zoom in scene units.
    Orbit { yaw: f32, pitch: f32, zoom: f32 },
}

