use std::rc::{Rc, Weak};

use meadow_common::TimeUniform;

use crate::clock::{ClockState, TimeMirror, TimeSource};
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::object::{InteractiveObject, TransformTarget};

/// Per-frame entry point for the renderer and the frame loop.
///
/// Models and blade systems are owned by the application; the registry keeps
/// weak handles in insertion order, which is also draw order. The clock and
/// the interactive object are owned here.
///
/// Dropping the registry drops the time mirror. The application must make
/// sure the GPU is done reading it first.
pub struct SceneRegistry<M, B, T: TimeMirror> {
    models: Vec<Weak<M>>,
    blade_systems: Vec<Weak<B>>,
    clock: ClockState<T>,
    object: Option<InteractiveObject<M>>,
}

impl<M: TransformTarget, B, T: TimeMirror> SceneRegistry<M, B, T> {
    /// Registry whose clock follows the system wall clock.
    ///
    /// Fails when the configured sphere radius is not a valid canonical radius.
    pub fn new(mirror: T, config: &SceneConfig) -> Result<Self, SceneError> {
        Self::from_clock(ClockState::new(mirror), config)
    }

    /// Registry whose clock is driven by `source`.
    pub fn with_time_source(
        mirror: T,
        source: Box<dyn TimeSource>,
        config: &SceneConfig,
    ) -> Result<Self, SceneError> {
        Self::from_clock(ClockState::with_source(mirror, source), config)
    }

    fn from_clock(clock: ClockState<T>, config: &SceneConfig) -> Result<Self, SceneError> {
        let object = config
            .interactive_object
            .then(|| config.sphere_state().map(InteractiveObject::new))
            .transpose()?;
        tracing::info!(
            interactive_object = object.is_some(),
            radius = object.as_ref().map(|o| o.state().radius()),
            "scene registry created"
        );
        Ok(Self {
            models: Vec::new(),
            blade_systems: Vec::new(),
            clock,
            object,
        })
    }

    /// Append a model. Duplicates are kept.
    pub fn add_model(&mut self, model: &Rc<M>) {
        self.models.push(Rc::downgrade(model));
    }

    /// Append a blade system. Duplicates are kept.
    pub fn add_blade_system(&mut self, blades: &Rc<B>) {
        self.blade_systems.push(Rc::downgrade(blades));
    }

    pub fn models(&self) -> &[Weak<M>] {
        &self.models
    }

    pub fn blade_systems(&self) -> &[Weak<B>] {
        &self.blade_systems
    }

    /// Models still alive, in insertion order.
    pub fn live_models(&self) -> impl Iterator<Item = Rc<M>> + '_ {
        self.models.iter().filter_map(Weak::upgrade)
    }

    /// Blade systems still alive, in insertion order.
    pub fn live_blade_systems(&self) -> impl Iterator<Item = Rc<B>> + '_ {
        self.blade_systems.iter().filter_map(Weak::upgrade)
    }

    /// Advance the clock once; call exactly once per frame before submission.
    pub fn update_time(&mut self) {
        self.clock.update();
    }

    pub fn time(&self) -> TimeUniform {
        self.clock.time()
    }

    /// Region the renderer binds to read the time uniform.
    pub fn time_buffer(&self) -> &T::Handle {
        self.clock.buffer_handle()
    }

    pub fn clock(&self) -> &ClockState<T> {
        &self.clock
    }

    /// The interactive object, if the configuration enables it.
    pub fn object(&self) -> Option<&InteractiveObject<M>> {
        self.object.as_ref()
    }

    /// Route derived transforms of the interactive object into `model`.
    /// Returns false when the interactive object is disabled.
    pub fn set_interactive_target(&mut self, model: &Rc<M>) -> bool {
        match &mut self.object {
            Some(object) => {
                object.set_target(model);
                true
            }
            None => false,
        }
    }

    /// Move the interactive object; a no-op when it is disabled.
    pub fn move_object(&mut self, dx: f32, dy: f32, dz: f32) -> Result<(), SceneError> {
        match &mut self.object {
            Some(object) => object.move_by(dx, dy, dz),
            None => {
                tracing::debug!("interactive object disabled; ignoring move");
                Ok(())
            }
        }
    }
}
