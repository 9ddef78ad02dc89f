//! Round flow: menu, playing, round over.
//!
//! Each phase owns its state and reacts to pointer and tick messages through
//! [`PhaseHandler`]. A handler returns a [`Transition`] when the phase should
//! end; [`Session`] then runs the old phase's `exit`, swaps phases and runs the
//! new phase's `enter`.

use glam::Vec2;
use orb_engine::{CollisionPair, EngineContext, EntityId, TimerId};

use crate::barriers::spawn_barriers;
use crate::collision::{classify, OrbContact, ORB};
use crate::countdown::{Countdown, CountdownTick};
use crate::hud::{self, phase_codes, GAME_OVER_TAG, PLAY_BUTTON_TAG, TITLE_TAG};
use crate::launch::{LaunchParams, Launcher, Release};
use crate::playfield::{set_trail, spawn_explosion, spawn_marker, spawn_orb};
use crate::settings::Settings;
use crate::sprites::Sprites;
use crate::targets::spawn_target;

const CLOCK_PERIOD: f32 = 1.0;

/// Everything a phase may touch during one message.
pub struct Stage<'a> {
    pub ctx: &'a mut EngineContext,
    pub settings: &'a Settings,
    pub sprites: &'a Sprites,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StartRound,
    EndRound { score: u32 },
}

pub trait PhaseHandler {
    fn enter(&mut self, stage: &mut Stage);

    fn exit(&mut self, _stage: &mut Stage) {}

    fn on_pointer_down(&mut self, stage: &mut Stage, at: Vec2) -> Option<Transition>;

    fn on_pointer_move(&mut self, _stage: &mut Stage, _at: Vec2) -> Option<Transition> {
        None
    }

    fn on_pointer_up(&mut self, _stage: &mut Stage, _at: Vec2) -> Option<Transition> {
        None
    }

    fn on_tick(&mut self, _stage: &mut Stage, _dt: f32) -> Option<Transition> {
        None
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MenuPhase;

impl PhaseHandler for MenuPhase {
    fn enter(&mut self, stage: &mut Stage) {
        hud::show_title(stage.ctx);
        hud::show_play_button(stage.ctx, 0.3);
        hud::announce_phase(stage.ctx, phase_codes::MENU);
    }

    fn exit(&mut self, stage: &mut Stage) {
        hud::clear(stage.ctx, &[TITLE_TAG, PLAY_BUTTON_TAG]);
    }

    fn on_pointer_down(&mut self, stage: &mut Stage, at: Vec2) -> Option<Transition> {
        stage
            .ctx
            .scene
            .hit_tag(at, PLAY_BUTTON_TAG)
            .then_some(Transition::StartRound)
    }
}

// ---------------------------------------------------------------------------
// Playing
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PlayingPhase {
    launcher: Launcher,
    orb: Option<EntityId>,
    marker: Option<EntityId>,
    target: Option<EntityId>,
    barriers: Vec<EntityId>,
    score: u32,
    countdown: Countdown,
    clock: Option<TimerId>,
    flight_seconds: f32,
}

impl PlayingPhase {
    pub fn new(settings: &Settings) -> Self {
        Self {
            launcher: Launcher::new(LaunchParams::from_settings(settings)),
            orb: None,
            marker: None,
            target: None,
            barriers: Vec::new(),
            score: 0,
            countdown: Countdown::start(settings.round_seconds),
            clock: None,
            flight_seconds: 0.0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn orb(&self) -> Option<EntityId> {
        self.orb
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Swap the current orb for a fresh one at rest.
    fn respawn_orb(&mut self, stage: &mut Stage) {
        if let Some(old) = self.orb.take() {
            stage.ctx.despawn(old);
        }
        self.orb = Some(spawn_orb(stage.ctx, stage.settings, stage.sprites));
        self.launcher.reset();
        self.flight_seconds = 0.0;
    }

    fn score_hit(&mut self, stage: &mut Stage, orb: EntityId, target: EntityId) {
        let at = stage
            .ctx
            .scene
            .get(orb)
            .map_or(stage.settings.rest(), |e| e.pos);
        spawn_explosion(stage.ctx, at);

        stage.ctx.despawn(target);
        self.target = None;
        self.score += 1;
        hud::show_score(stage.ctx, self.score);
        log::debug!("target hit at ({:.1}, {:.1}), score {}", at.x, at.y, self.score);

        self.respawn_orb(stage);
        self.target = Some(spawn_target(stage.ctx, stage.settings, stage.sprites));
    }

    fn handle_clock(&mut self, stage: &mut Stage, fired: &[TimerId]) -> Option<Transition> {
        for &id in fired {
            if self.clock != Some(id) {
                log::warn!("ignoring timer {:?} the round does not own", id);
                continue;
            }
            match self.countdown.tick() {
                CountdownTick::Running(left) => hud::show_time_left(stage.ctx, left),
                CountdownTick::Expired => {
                    hud::show_time_left(stage.ctx, 0);
                    if let Some(clock) = self.clock.take() {
                        stage.ctx.cancel_timer(clock);
                    }
                    return Some(Transition::EndRound { score: self.score });
                }
                CountdownTick::Stopped => {}
            }
        }
        None
    }

    fn handle_contacts(&mut self, stage: &mut Stage, pairs: &[CollisionPair]) {
        for pair in pairs {
            let Some(orb) = self.orb else {
                return;
            };
            match classify(pair, orb) {
                Some(OrbContact::TargetHit { target }) => {
                    if self.target == Some(target) {
                        self.score_hit(stage, orb, target);
                    } else {
                        log::warn!("ignoring contact with removed target {}", target.0);
                    }
                }
                Some(OrbContact::Landed) => {
                    log::debug!("orb landed");
                    self.respawn_orb(stage);
                }
                Some(OrbContact::BarrierTouched { barrier }) => {
                    log::debug!("orb glanced off barrier {}", barrier.0);
                }
                None => {
                    if pair.started && pair.involves_category(ORB) && !pair.involves(orb) {
                        log::warn!("ignoring contact for a removed orb");
                    }
                }
            }
        }
    }

    fn handle_flight(&mut self, stage: &mut Stage, dt: f32) {
        if !self.launcher.is_launched() {
            return;
        }
        self.flight_seconds += dt;
        if self.flight_seconds >= stage.settings.max_flight_seconds {
            log::debug!("orb flight timed out after {:.1}s", self.flight_seconds);
            self.respawn_orb(stage);
        }
    }
}

impl PhaseHandler for PlayingPhase {
    fn enter(&mut self, stage: &mut Stage) {
        self.marker = Some(spawn_marker(stage.ctx, stage.settings, stage.sprites));
        self.respawn_orb(stage);
        self.barriers = spawn_barriers(stage.ctx, stage.settings, stage.sprites);
        self.target = Some(spawn_target(stage.ctx, stage.settings, stage.sprites));

        hud::show_score(stage.ctx, self.score);
        hud::show_time_left(stage.ctx, self.countdown.remaining());
        self.clock = Some(stage.ctx.timers.schedule_repeating(CLOCK_PERIOD));
        hud::announce_phase(stage.ctx, phase_codes::PLAYING);
        log::info!("round started: {}s on the clock", self.countdown.remaining());
    }

    fn exit(&mut self, stage: &mut Stage) {
        if let Some(clock) = self.clock.take() {
            stage.ctx.cancel_timer(clock);
        }
        self.countdown.stop();
        let gameplay = self
            .orb
            .take()
            .into_iter()
            .chain(self.marker.take())
            .chain(self.target.take())
            .chain(self.barriers.drain(..));
        for id in gameplay.collect::<Vec<_>>() {
            stage.ctx.despawn(id);
        }
        self.launcher.reset();
    }

    fn on_pointer_down(&mut self, _stage: &mut Stage, at: Vec2) -> Option<Transition> {
        if self.launcher.pointer_down(at) {
            log::debug!("drag started at ({:.1}, {:.1})", at.x, at.y);
        }
        None
    }

    fn on_pointer_move(&mut self, stage: &mut Stage, at: Vec2) -> Option<Transition> {
        if let (Some(pos), Some(orb)) = (self.launcher.pointer_move(at), self.orb) {
            stage.ctx.teleport(orb, pos);
        }
        None
    }

    fn on_pointer_up(&mut self, stage: &mut Stage, _at: Vec2) -> Option<Transition> {
        let Some(orb) = self.orb else {
            return None;
        };
        match self.launcher.pointer_up() {
            Release::Launch { impulse } => {
                stage.ctx.set_gravity_scale(orb, 1.0);
                stage.ctx.apply_impulse(orb, impulse);
                set_trail(stage.ctx, orb, true);
                self.flight_seconds = 0.0;
                log::debug!("launched with impulse ({:.1}, {:.1})", impulse.x, impulse.y);
            }
            Release::SnapBack { rest } => stage.ctx.teleport(orb, rest),
            Release::Ignored => {}
        }
        None
    }

    fn on_tick(&mut self, stage: &mut Stage, dt: f32) -> Option<Transition> {
        let fired: Vec<TimerId> = stage.ctx.fired_timers().iter().map(|f| f.id).collect();
        if let Some(transition) = self.handle_clock(stage, &fired) {
            return Some(transition);
        }
        let pairs = stage.ctx.collisions().to_vec();
        self.handle_contacts(stage, &pairs);
        self.handle_flight(stage, dt);
        None
    }
}

// ---------------------------------------------------------------------------
// Round over
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RoundOverPhase {
    final_score: u32,
}

impl RoundOverPhase {
    pub fn final_score(&self) -> u32 {
        self.final_score
    }
}

impl PhaseHandler for RoundOverPhase {
    fn enter(&mut self, stage: &mut Stage) {
        hud::show_game_over(stage.ctx);
        hud::show_play_button(stage.ctx, 1.0 / 3.0);
        hud::announce_phase(stage.ctx, phase_codes::ROUND_OVER);
        log::info!("round over: score {}", self.final_score);
    }

    fn exit(&mut self, stage: &mut Stage) {
        hud::clear(stage.ctx, &[GAME_OVER_TAG, PLAY_BUTTON_TAG]);
    }

    /// Any tap goes straight into a new round.
    fn on_pointer_down(&mut self, _stage: &mut Stage, _at: Vec2) -> Option<Transition> {
        Some(Transition::StartRound)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Phase {
    Menu(MenuPhase),
    Playing(PlayingPhase),
    RoundOver(RoundOverPhase),
}

impl Phase {
    fn handler(&mut self) -> &mut dyn PhaseHandler {
        match self {
            Phase::Menu(p) => p,
            Phase::Playing(p) => p,
            Phase::RoundOver(p) => p,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Phase::Menu(_) => "menu",
            Phase::Playing(_) => "playing",
            Phase::RoundOver(_) => "round over",
        }
    }
}

/// Owns the current phase and routes messages to it.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Menu(MenuPhase),
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The running round, if any.
    pub fn playing(&self) -> Option<&PlayingPhase> {
        match &self.phase {
            Phase::Playing(p) => Some(p),
            _ => None,
        }
    }

    /// Show the first phase.
    pub fn open(&mut self, stage: &mut Stage) {
        self.phase.handler().enter(stage);
    }

    pub fn pointer_down(&mut self, stage: &mut Stage, at: Vec2) {
        let transition = self.phase.handler().on_pointer_down(stage, at);
        self.apply(stage, transition);
    }

    pub fn pointer_move(&mut self, stage: &mut Stage, at: Vec2) {
        let transition = self.phase.handler().on_pointer_move(stage, at);
        self.apply(stage, transition);
    }

    pub fn pointer_up(&mut self, stage: &mut Stage, at: Vec2) {
        let transition = self.phase.handler().on_pointer_up(stage, at);
        self.apply(stage, transition);
    }

    pub fn tick(&mut self, stage: &mut Stage, dt: f32) {
        let transition = self.phase.handler().on_tick(stage, dt);
        self.apply(stage, transition);
    }

    fn apply(&mut self, stage: &mut Stage, transition: Option<Transition>) {
        let Some(transition) = transition else {
            return;
        };
        self.phase.handler().exit(stage);
        let next = match transition {
            Transition::StartRound => Phase::Playing(PlayingPhase::new(stage.settings)),
            Transition::EndRound { score } => Phase::RoundOver(RoundOverPhase { final_score: score }),
        };
        log::info!("{} -> {}", self.phase.name(), next.name());
        self.phase = next;
        self.phase.handler().enter(stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{SURFACE, TARGET};
    use crate::hud::SCORE_TAG;

    struct Fixture {
        ctx: EngineContext,
        settings: Settings,
        sprites: Sprites,
        session: Session,
    }

    impl Fixture {
        fn new() -> Self {
            let mut f = Self {
                ctx: EngineContext::new(),
                settings: Settings::default(),
                sprites: Sprites::default(),
                session: Session::new(),
            };
            f.with_stage(|session, stage| session.open(stage));
            f
        }

        fn with_stage(&mut self, f: impl FnOnce(&mut Session, &mut Stage)) {
            let mut stage = Stage {
                ctx: &mut self.ctx,
                settings: &self.settings,
                sprites: &self.sprites,
            };
            f(&mut self.session, &mut stage);
        }

        fn tap(&mut self, at: Vec2) {
            self.with_stage(|s, stage| {
                s.pointer_down(stage, at);
                s.pointer_up(stage, at);
            });
        }

        fn start_round(&mut self) {
            self.tap(Vec2::new(187.5, 667.0 * 0.3));
            assert!(self.session.playing().is_some());
        }

        /// Feed one contact-begin between the orb and `other` to the round.
        fn contact(&mut self, category: u32, other: EntityId) {
            let orb = self.session.playing().and_then(|p| p.orb()).unwrap();
            let pair = CollisionPair {
                entity_a: orb,
                entity_b: other,
                category_a: ORB,
                category_b: category,
                started: true,
            };
            self.with_stage(|s, stage| {
                if let Phase::Playing(p) = &mut s.phase {
                    p.handle_contacts(stage, &[pair]);
                }
            });
        }

        /// Let one second of round clock elapse.
        fn second(&mut self) {
            self.ctx.tick_timers(1.0);
            self.with_stage(|s, stage| s.tick(stage, 0.0));
        }
    }

    #[test]
    fn menu_needs_a_tap_on_the_button() {
        let mut f = Fixture::new();
        f.tap(Vec2::new(20.0, 20.0));
        assert!(matches!(f.session.phase(), Phase::Menu(_)));
        f.start_round();
        assert!(f.ctx.scene.find_by_tag(TITLE_TAG).is_none());
    }

    #[test]
    fn round_starts_clean() {
        let mut f = Fixture::new();
        f.start_round();
        let round = f.session.playing().unwrap();
        assert_eq!(round.score(), 0);
        assert_eq!(round.countdown().remaining(), 20);
        let orb = f.ctx.scene.get(round.orb().unwrap()).unwrap();
        assert_eq!(orb.pos, Vec2::new(187.5, 100.0));
        let target = f.ctx.scene.get(round.target().unwrap()).unwrap();
        assert!(target.pos.y >= 667.0 / 3.0 && target.pos.y <= 667.0);
        assert_eq!(f.ctx.scene.iter().filter(|e| e.tag == "barrier").count(), 3);
    }

    #[test]
    fn repeated_contacts_score_once() {
        let mut f = Fixture::new();
        f.start_round();
        let target = f.session.playing().unwrap().target().unwrap();
        f.contact(TARGET, target);
        f.contact(TARGET, target);
        let round = f.session.playing().unwrap();
        assert_eq!(round.score(), 1);
        assert_ne!(round.target(), Some(target));
        assert!(!f.ctx.scene.contains(target));
        assert_eq!(f.ctx.scene.iter().filter(|e| e.tag == "target").count(), 1);
        assert!(f.ctx.scene.find_by_tag(SCORE_TAG).is_some());
    }

    #[test]
    fn landing_respawns_the_orb() {
        let mut f = Fixture::new();
        f.start_round();
        let before = f.session.playing().unwrap().orb().unwrap();
        f.contact(SURFACE, EntityId(1));
        let after = f.session.playing().unwrap().orb().unwrap();
        assert_ne!(before, after);
        assert!(!f.ctx.scene.contains(before));
        assert_eq!(f.ctx.scene.get(after).unwrap().pos, Vec2::new(187.5, 100.0));
    }

    #[test]
    fn clock_runs_out_into_round_over() {
        let mut f = Fixture::new();
        f.start_round();
        for _ in 0..19 {
            f.second();
        }
        assert_eq!(f.session.playing().unwrap().countdown().remaining(), 1);
        f.second();
        assert!(matches!(f.session.phase(), Phase::RoundOver(_)));
        assert!(f.ctx.scene.find_by_tag("orb").is_none());
        assert!(f.ctx.scene.find_by_tag("barrier").is_none());
        assert!(f.ctx.scene.find_by_tag(GAME_OVER_TAG).is_some());
        assert!(f.ctx.timers.is_empty());
    }

    #[test]
    fn round_over_tap_anywhere_restarts() {
        let mut f = Fixture::new();
        f.start_round();
        let target = f.session.playing().unwrap().target().unwrap();
        f.contact(TARGET, target);
        for _ in 0..20 {
            f.second();
        }
        match f.session.phase() {
            Phase::RoundOver(p) => assert_eq!(p.final_score(), 1),
            other => panic!("expected round over, got {}", other.name()),
        }
        f.tap(Vec2::new(5.0, 600.0));
        let round = f.session.playing().unwrap();
        assert_eq!(round.score(), 0);
        assert_eq!(round.countdown().remaining(), 20);
        assert!(f.ctx.scene.find_by_tag(GAME_OVER_TAG).is_none());
    }

    #[test]
    fn foreign_timer_does_not_move_the_clock() {
        let mut f = Fixture::new();
        f.start_round();
        let stranger = f.ctx.timers.schedule_repeating(0.5);
        f.ctx.tick_timers(0.5);
        f.with_stage(|s, stage| s.tick(stage, 0.0));
        assert_eq!(f.session.playing().unwrap().countdown().remaining(), 20);
        f.ctx.cancel_timer(stranger);
    }

    #[test]
    fn release_without_drag_is_ignored() {
        let mut f = Fixture::new();
        f.start_round();
        let orb = f.session.playing().unwrap().orb().unwrap();
        f.with_stage(|s, stage| {
            s.pointer_move(stage, Vec2::new(300.0, 300.0));
            s.pointer_up(stage, Vec2::new(300.0, 300.0));
        });
        assert_eq!(f.ctx.scene.get(orb).unwrap().pos, Vec2::new(187.5, 100.0));
        assert!(!f.session.playing().unwrap().launcher().is_launched());
    }

    #[test]
    fn lost_orb_is_recalled_after_max_flight() {
        let mut f = Fixture::new();
        f.start_round();
        let launched = f.session.playing().unwrap().orb().unwrap();
        f.with_stage(|s, stage| {
            s.pointer_down(stage, Vec2::new(187.5, 100.0));
            s.pointer_move(stage, Vec2::new(187.5, 60.0));
            s.pointer_up(stage, Vec2::new(187.5, 60.0));
        });
        assert!(f.session.playing().unwrap().launcher().is_launched());

        f.with_stage(|s, stage| s.tick(stage, 7.9));
        assert_eq!(f.session.playing().unwrap().orb(), Some(launched));

        f.with_stage(|s, stage| s.tick(stage, 0.2));
        let round = f.session.playing().unwrap();
        assert_ne!(round.orb(), Some(launched));
        assert!(!round.launcher().is_launched());
        assert!(!f.ctx.scene.contains(launched));
    }

    #[test]
    fn contact_from_a_replaced_orb_scores_nothing() {
        let mut f = Fixture::new();
        f.start_round();
        let old_orb = f.session.playing().unwrap().orb().unwrap();
        f.contact(SURFACE, EntityId(1));
        let target = f.session.playing().unwrap().target().unwrap();

        let stale = CollisionPair {
            entity_a: old_orb,
            entity_b: target,
            category_a: ORB,
            category_b: TARGET,
            started: true,
        };
        f.with_stage(|s, stage| {
            if let Phase::Playing(p) = &mut s.phase {
                p.handle_contacts(stage, &[stale]);
            }
        });
        let round = f.session.playing().unwrap();
        assert_eq!(round.score(), 0);
        assert_eq!(round.target(), Some(target));
    }
}
