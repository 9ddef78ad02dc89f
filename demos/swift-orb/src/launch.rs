//! Slingshot input: grab the resting orb, pull it back, let go.

use glam::Vec2;

use crate::geometry::{clamp_to_circle, distance};
use crate::settings::Settings;

/// Distances that shape a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchParams {
    pub rest: Vec2,
    /// A press closer than this to `rest` grabs the orb.
    pub grab_radius: f32,
    pub r_limit: f32,
    pub snap_limit: f32,
    pub force_multiplier: f32,
}

impl LaunchParams {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            rest: settings.rest(),
            grab_radius: settings.projectile_radius + settings.touch_threshold,
            r_limit: settings.r_limit,
            snap_limit: settings.snap_limit,
            force_multiplier: settings.force_multiplier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// Orb sits at rest, waiting to be grabbed.
    Idle,
    Dragging { start: Vec2, current: Vec2 },
    /// Orb is owned by the physics world until it lands or scores.
    Launched,
}

/// Outcome of letting go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Launch { impulse: Vec2 },
    /// Pull too short: put the orb back at `rest`.
    SnapBack { rest: Vec2 },
    /// No drag was in progress.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Launcher {
    params: LaunchParams,
    state: DragState,
}

impl Launcher {
    pub fn new(params: LaunchParams) -> Self {
        Self {
            params,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn params(&self) -> &LaunchParams {
        &self.params
    }

    pub fn is_launched(&self) -> bool {
        self.state == DragState::Launched
    }

    /// Start a drag if the press lands on the resting orb. Returns whether it did.
    pub fn pointer_down(&mut self, at: Vec2) -> bool {
        if self.state != DragState::Idle || distance(self.params.rest, at) >= self.params.grab_radius {
            return false;
        }
        self.state = DragState::Dragging { start: at, current: at };
        true
    }

    /// Follow the finger. Returns where the orb should be drawn, or `None`
    /// when no drag is in progress.
    pub fn pointer_move(&mut self, at: Vec2) -> Option<Vec2> {
        let DragState::Dragging { start, current } = &mut self.state else {
            return None;
        };
        *current = clamp_to_circle(*start, at, self.params.r_limit);
        Some(*current)
    }

    /// Let go at the last dragged position.
    pub fn pointer_up(&mut self) -> Release {
        let DragState::Dragging { start, current } = self.state else {
            return Release::Ignored;
        };
        if distance(current, start) > self.params.snap_limit {
            self.state = DragState::Launched;
            Release::Launch {
                impulse: (start - current) * self.params.force_multiplier,
            }
        } else {
            self.state = DragState::Idle;
            Release::SnapBack {
                rest: self.params.rest,
            }
        }
    }

    /// A fresh orb is waiting at rest again.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}
