//! On-screen text and the events mirrored to the JS host.

use glam::Vec2;
use orb_engine::{Align, EngineContext, EntityId, GameEvent, Label, Tween, TweenLoop};

pub const SCORE_TAG: &str = "score";
pub const TIMER_TAG: &str = "timer";
pub const TITLE_TAG: &str = "title";
pub const GAME_OVER_TAG: &str = "game_over";
/// Tapping anything with this tag starts a round.
pub const PLAY_BUTTON_TAG: &str = "playButton";

const SCORE_SIZE: f32 = 48.0;
const TIMER_SIZE: f32 = 32.0;
const BANNER_SIZE: f32 = 52.0;
const BUTTON_SIZE: f32 = 34.0;
const BUTTON_FADE_SECONDS: f32 = 1.0;

/// Game event kinds sent to the host.
pub mod game_events {
    pub const SCORE: f32 = 1.0;
    pub const TIME_LEFT: f32 = 2.0;
    /// `a` holds the phase code.
    pub const PHASE: f32 = 3.0;
}

/// Phase codes carried by `game_events::PHASE`.
pub mod phase_codes {
    pub const MENU: f32 = 0.0;
    pub const PLAYING: f32 = 1.0;
    pub const ROUND_OVER: f32 = 2.0;
}

/// Localisation hook. Returns its input until string tables exist.
pub fn lt(text: &str) -> String {
    text.to_string()
}

pub fn show_score(ctx: &mut EngineContext, score: u32) {
    let world = ctx.world_size();
    ctx.set_label(
        &Label::new(SCORE_TAG, score.to_string(), Vec2::new(world.x / 2.0, world.y - 70.0))
            .with_size(SCORE_SIZE),
    );
    ctx.emit_event(GameEvent::single(game_events::SCORE, score as f32));
}

pub fn show_time_left(ctx: &mut EngineContext, seconds: u32) {
    let world = ctx.world_size();
    ctx.set_label(
        &Label::new(TIMER_TAG, seconds.to_string(), Vec2::new(world.x, world.y - 30.0))
            .with_size(TIMER_SIZE)
            .with_align(Align::Right),
    );
    ctx.emit_event(GameEvent::single(game_events::TIME_LEFT, seconds as f32));
}

pub fn show_title(ctx: &mut EngineContext) {
    let world = ctx.world_size();
    ctx.set_label(
        &Label::new(TITLE_TAG, lt("SwiftOrb"), Vec2::new(world.x / 2.0, world.y / 2.0 + world.y / 3.0))
            .with_size(BANNER_SIZE),
    );
}

pub fn show_game_over(ctx: &mut EngineContext) {
    let world = ctx.world_size();
    ctx.set_label(
        &Label::new(GAME_OVER_TAG, lt("Game Over"), Vec2::new(world.x / 2.0, world.y * 2.0 / 3.0))
            .with_size(BANNER_SIZE),
    );
}

/// "Tap to play" at `height_fraction` of the screen, fading in and out.
pub fn show_play_button(ctx: &mut EngineContext, height_fraction: f32) {
    let world = ctx.world_size();
    ctx.set_label(
        &Label::new(
            PLAY_BUTTON_TAG,
            lt("Tap to play"),
            Vec2::new(world.x / 2.0, world.y * height_fraction),
        )
        .with_size(BUTTON_SIZE),
    );
    let glyphs: Vec<EntityId> = ctx
        .scene
        .iter()
        .filter(|e| e.tag == PLAY_BUTTON_TAG)
        .map(|e| e.id)
        .collect();
    for glyph in glyphs {
        ctx.tweens.add(
            glyph,
            Tween::alpha(1.0, 0.0, BUTTON_FADE_SECONDS).with_loop(TweenLoop::PingPong),
        );
    }
}

pub fn announce_phase(ctx: &mut EngineContext, code: f32) {
    ctx.emit_event(GameEvent::single(game_events::PHASE, code));
}

/// Remove every label in `tags`.
pub fn clear(ctx: &mut EngineContext, tags: &[&str]) {
    for tag in tags {
        ctx.despawn_by_tag(tag);
    }
}
