use std::rc::{Rc, Weak};

use glam::{Mat4, Quat, Vec3};

use crate::error::SceneError;

/// Render-side recipient of a derived world matrix.
pub trait TransformTarget {
    fn set_model_matrix(&self, matrix: Mat4);
}

/// Canonical state of the interactive sphere: center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereState {
    position: Vec3,
    radius: f32,
}

impl Default for SphereState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 0.0),
            radius: 1.0,
        }
    }
}

impl SphereState {
    pub fn new(position: Vec3, radius: f32) -> Result<Self, SceneError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SceneError::InvalidRadius(radius));
        }
        Ok(Self { position, radius })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// World matrix mapping the unit, origin-centered reference mesh onto this
    /// sphere: scale in local space, then translate.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.radius),
            Quat::IDENTITY,
            self.position,
        )
    }
}

/// The one scene entity that input can move.
///
/// Holds the canonical [`SphereState`] and pushes a freshly derived matrix
/// into its target after every change. The target is held weakly; a missing
/// or dropped target turns the push into a no-op.
#[derive(Debug)]
pub struct InteractiveObject<M> {
    state: SphereState,
    target: Option<Weak<M>>,
}

impl<M> Default for InteractiveObject<M> {
    fn default() -> Self {
        Self::new(SphereState::default())
    }
}

impl<M> InteractiveObject<M> {
    pub fn new(state: SphereState) -> Self {
        Self {
            state,
            target: None,
        }
    }

    pub fn state(&self) -> SphereState {
        self.state
    }

    pub fn transform(&self) -> Mat4 {
        self.state.transform()
    }

    pub fn has_target(&self) -> bool {
        self.target.as_ref().is_some_and(|t| t.strong_count() > 0)
    }
}

impl<M: TransformTarget> InteractiveObject<M> {
    /// Make `target` the recipient of derived transforms and push the current one.
    pub fn set_target(&mut self, target: &Rc<M>) {
        self.target = Some(Rc::downgrade(target));
        self.push_transform();
    }

    /// Translate the center by the given per-axis deltas. Radius is untouched.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) -> Result<(), SceneError> {
        let delta = Vec3::new(dx, dy, dz);
        if !delta.is_finite() {
            return Err(SceneError::NonFiniteDelta(dx, dy, dz));
        }
        self.state.position += delta;
        self.push_transform();
        Ok(())
    }

    fn push_transform(&self) {
        let Some(target) = self.target.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        target.set_model_matrix(self.state.transform());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostModel;
    use meadow_mesh::{uv_sphere, SphereParams};

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn default_state_literal() {
        let s = SphereState::default();
        assert_eq!(s.position(), Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(s.radius(), 1.0);
    }

    #[test]
    fn rejects_bad_radius() {
        assert_eq!(
            SphereState::new(Vec3::ZERO, 0.0),
            Err(SceneError::InvalidRadius(0.0))
        );
        assert!(SphereState::new(Vec3::ZERO, -2.0).is_err());
        assert!(SphereState::new(Vec3::ZERO, f32::NAN).is_err());
        assert!(SphereState::new(Vec3::ZERO, 0.5).is_ok());
    }

    #[test]
    fn set_target_pushes_initial_transform() {
        let model = Rc::new(HostModel::new("sphere"));
        let mut obj = InteractiveObject::default();
        obj.set_target(&model);
        assert_eq!(model.updates(), 1);
        assert_eq!(model.model_matrix(), obj.transform());
        assert!(obj.has_target());
    }

    #[test]
    fn move_translates_and_pushes() {
        let model = Rc::new(HostModel::new("sphere"));
        let mut obj = InteractiveObject::default();
        obj.set_target(&model);
        obj.move_by(1.0, -0.5, 2.0).unwrap();

        assert_vec_close(obj.state().position(), Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(obj.state().radius(), 1.0);
        assert_eq!(model.updates(), 2);
        assert_eq!(model.model_matrix(), obj.transform());
    }

    #[test]
    fn moves_compose_per_axis() {
        let mut split: InteractiveObject<HostModel> = InteractiveObject::default();
        split.move_by(0.3, 0.0, 0.0).unwrap();
        split.move_by(0.45, 0.0, 0.0).unwrap();

        let mut single: InteractiveObject<HostModel> = InteractiveObject::default();
        single.move_by(0.75, 0.0, 0.0).unwrap();

        assert!((split.state().position().x - single.state().position().x).abs() < 1e-6);
        assert_eq!(split.state().position().y, 1.5);
        assert_eq!(split.state().position().z, 0.0);
    }

    #[test]
    fn null_move_is_identity() {
        let model = Rc::new(HostModel::new("sphere"));
        let mut obj = InteractiveObject::default();
        obj.set_target(&model);
        let before_state = obj.state();
        let before_matrix = model.model_matrix();

        obj.move_by(0.0, 0.0, 0.0).unwrap();
        assert_eq!(obj.state(), before_state);
        assert_eq!(model.model_matrix(), before_matrix);
    }

    #[test]
    fn move_without_target_still_mutates() {
        let mut obj: InteractiveObject<HostModel> = InteractiveObject::default();
        obj.move_by(0.0, 0.0, -0.01).unwrap();
        assert_vec_close(obj.state().position(), Vec3::new(0.0, 1.5, -0.01));
        assert!(!obj.has_target());
    }

    #[test]
    fn dropped_target_is_ignored() {
        let model = Rc::new(HostModel::new("sphere"));
        let mut obj = InteractiveObject::default();
        obj.set_target(&model);
        drop(model);
        assert!(!obj.has_target());
        obj.move_by(1.0, 0.0, 0.0).unwrap();
        assert_vec_close(obj.state().position(), Vec3::new(1.0, 1.5, 0.0));
    }

    #[test]
    fn non_finite_move_rejected_without_side_effects() {
        let mut obj: InteractiveObject<HostModel> = InteractiveObject::default();
        let err = obj.move_by(f32::NAN, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, SceneError::NonFiniteDelta(..)));
        assert!(obj.move_by(0.0, f32::INFINITY, 0.0).is_err());
        assert_eq!(obj.state(), SphereState::default());
    }

    #[test]
    fn transform_maps_reference_mesh_onto_sphere() {
        let state = SphereState::new(Vec3::new(3.0, -2.0, 0.5), 2.5).unwrap();
        let m = state.transform();
        let mesh = uv_sphere(&SphereParams::new(1.0, 12, 16)).unwrap();
        for v in &mesh.vertices {
            let world = m.transform_point3(Vec3::from(v.position));
            let d = world.distance(state.position());
            assert!((d - 2.5).abs() < 1e-4, "distance {d}");
        }
        assert_vec_close(m.transform_point3(Vec3::ZERO), state.position());
    }

    #[test]
    fn scale_does_not_scale_translation() {
        let state = SphereState::new(Vec3::new(1.0, 0.0, 0.0), 4.0).unwrap();
        let expected = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
            * Mat4::from_scale(Vec3::splat(4.0));
        assert!(state.transform().abs_diff_eq(expected, 1e-6));
        assert_eq!(state.transform().w_axis.truncate(), Vec3::new(1.0, 0.0, 0.0));
    }
}
