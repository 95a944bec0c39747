use std::collections::{HashSet, VecDeque};

use glam::Vec3;

use crate::action::Action;
use crate::event::{InputEvent, Key, MouseButton};

/// Tuning for turning input into actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    /// Object displacement per poll for each held direction key.
    pub move_speed: f32,
    /// Orbit degrees per pixel of cursor travel with the left button held.
    pub orbit_sensitivity: f64,
    /// Zoom units per pixel of vertical travel with the right button held.
    pub zoom_sensitivity: f64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.01,
            orbit_sensitivity: 0.5,
            zoom_sensitivity: 0.05,
        }
    }
}

/// Event queue plus the input state derived from it.
///
/// Platform callbacks only [`push`](Self::push); the frame loop calls
/// [`poll`](Self::poll) once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    settings: InputSettings,
    queue: VecDeque<InputEvent>,
    held: HashSet<Key>,
    left_down: bool,
    right_down: bool,
    anchor: (f64, f64),
}

impl InputState {
    pub fn new(settings: InputSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Events waiting for the next poll.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drain queued events and produce this frame's actions.
    ///
    /// Orbit actions come first, in event order, followed by one move per
    /// held direction key in W, S, A, D order.
    pub fn poll(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        while let Some(event) = self.queue.pop_front() {
            match event {
                InputEvent::Key { key: Key::Other, .. } => {}
                InputEvent::Key { key, pressed: true } => {
                    self.held.insert(key);
                }
                InputEvent::Key { key, pressed: false } => {
                    self.held.remove(&key);
                }
                InputEvent::MouseButton {
                    button,
                    pressed,
                    x,
                    y,
                } => {
                    match button {
                        MouseButton::Left => self.left_down = pressed,
                        MouseButton::Right => self.right_down = pressed,
                        MouseButton::Other => continue,
                    }
                    if pressed {
                        self.anchor = (x, y);
                    }
                }
                InputEvent::CursorMoved { x, y } => {
                    if let Some(action) = self.drag(x, y) {
                        actions.push(action);
                    }
                }
            }
        }

        let s = self.settings.move_speed;
        for (key, delta) in [
            (Key::W, Vec3::new(0.0, 0.0, -s)),
            (Key::S, Vec3::new(0.0, 0.0, s)),
            (Key::A, Vec3::new(-s, 0.0, 0.0)),
            (Key::D, Vec3::new(s, 0.0, 0.0)),
        ] {
            if self.held.contains(&key) {
                actions.push(Action::MoveObject(delta));
            }
        }

        if !actions.is_empty() {
            tracing::trace!(count = actions.len(), "input actions");
        }
        actions
    }

    fn drag(&mut self, x: f64, y: f64) -> Option<Action> {
        let (ax, ay) = self.anchor;
        if self.left_down {
            let yaw = ((ax - x) * self.settings.orbit_sensitivity) as f32;
            let pitch = ((ay - y) * self.settings.orbit_sensitivity) as f32;
            self.anchor = (x, y);
            Some(Action::Orbit {
                yaw,
                pitch,
                zoom: 0.0,
            })
        } else if self.right_down {
            let zoom = ((ay - y) * self.settings.zoom_sensitivity) as f32;
            self.anchor.1 = y;
            Some(Action::Orbit {
                yaw: 0.0,
                pitch: 0.0,
                zoom,
            })
        } else {
            None
        }
    }
}
