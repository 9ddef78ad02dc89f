// extensions/tween.rs
//
// Linear tweens keyed by EntityId, applied to the scene once per tick.
//
//   let id = ctx.tweens.add(barrier, Tween::offset_x(70.0, 1.0).with_loop(TweenLoop::PingPong));
//   ctx.tweens.tick(dt, &mut ctx.scene);

use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenTarget {
    /// Horizontal offset relative to the x captured on the first tick.
    OffsetX { by: f32 },
    /// Sprite alpha (ignored when the entity has no sprite).
    Alpha { from: f32, to: f32 },
}

/// What happens when a tween reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenLoop {
    /// Stop and remove the tween.
    #[default]
    Once,
    /// Reverse direction forever.
    PingPong,
}

#[derive(Debug, Clone)]
pub struct Tween {
    pub target: TweenTarget,
    /// Seconds per leg.
    pub duration: f32,
    pub loop_mode: TweenLoop,
    elapsed: f32,
    reversed: bool,
    anchor_x: Option<f32>,
}

impl Tween {
    fn new(target: TweenTarget, duration: f32) -> Self {
        Self {
            target,
            duration,
            loop_mode: TweenLoop::Once,
            elapsed: 0.0,
            reversed: false,
            anchor_x: None,
        }
    }

    /// Move `by` units along x over `duration` seconds.
    pub fn offset_x(by: f32, duration: f32) -> Self {
        Self::new(TweenTarget::OffsetX { by }, duration)
    }

    pub fn alpha(from: f32, to: f32, duration: f32) -> Self {
        Self::new(TweenTarget::Alpha { from, to }, duration)
    }

    pub fn with_loop(mut self, mode: TweenLoop) -> Self {
        self.loop_mode = mode;
        self
    }

    /// Advance the clock. Returns true once a `Once` tween has run out.
    fn advance(&mut self, dt: f32) -> bool {
        if self.duration <= 0.0 {
            return true;
        }
        self.elapsed += dt;
        while self.elapsed >= self.duration {
            match self.loop_mode {
                TweenLoop::Once => {
                    self.elapsed = self.duration;
                    return true;
                }
                TweenLoop::PingPong => {
                    self.elapsed -= self.duration;
                    self.reversed = !self.reversed;
                }
            }
        }
        false
    }

    /// Distance along the out-and-back path, 0 at the start and 1 at the far end.
    fn amount(&self) -> f32 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        if self.reversed { 1.0 - t } else { t }
    }
}

/// Handle to a running tween.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// All running tweens, ticked in insertion order.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: Vec<(TweenId, EntityId, Tween)>,
    next_id: u32,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push((id, entity, tween));
        id
    }

    pub fn remove(&mut self, id: TweenId) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|(t, _, _)| *t != id);
        self.tweens.len() != before
    }

    /// Remove all tweens driving `entity`.
    pub fn remove_entity(&mut self, entity: EntityId) {
        self.tweens.retain(|(_, e, _)| *e != entity);
    }

    /// Advance all tweens and write their values into the scene.
    /// Tweens whose entity is gone are dropped. Returns the number finished this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut finished = 0;
        self.tweens.retain_mut(|(_, entity_id, tween)| {
            let Some(entity) = scene.get_mut(*entity_id) else {
                return false;
            };

            let done = tween.advance(dt);
            let k = tween.amount();
            match tween.target {
                TweenTarget::OffsetX { by } => {
                    let x0 = *tween.anchor_x.get_or_insert(entity.pos.x);
                    entity.pos.x = x0 + by * k;
                }
                TweenTarget::Alpha { from, to } => {
                    if let Some(sprite) = &mut entity.sprite {
                        sprite.alpha = from + (to - from) * k;
                    }
                }
            }

            if done {
                finished += 1;
            }
            !done
        });
        finished
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
