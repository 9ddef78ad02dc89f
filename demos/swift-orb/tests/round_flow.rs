use glam::Vec2;
use orb_engine::bridge::protocol::{HEADER_WORLD_HEIGHT, HEADER_WORLD_WIDTH};
use orb_engine::{Game, InputEvent};
use orb_web::GameRunner;
use swift_orb::hud::{game_events, GAME_OVER_TAG, PLAY_BUTTON_TAG};
use swift_orb::launch::DragState;
use swift_orb::session::Phase;
use swift_orb::SwiftOrb;

const FRAME: f32 = 1.0 / 60.0;

fn runner() -> GameRunner<SwiftOrb> {
    let mut runner = GameRunner::with_seed(SwiftOrb::new(), 11);
    runner.init();
    runner
}

fn down(runner: &mut GameRunner<SwiftOrb>, x: f32, y: f32, pointer: u32) {
    runner.push_input(InputEvent::PointerDown { x, y, pointer });
}

fn tap(runner: &mut GameRunner<SwiftOrb>, x: f32, y: f32) {
    down(runner, x, y, 0);
    runner.push_input(InputEvent::PointerUp { x, y, pointer: 0 });
    runner.tick(FRAME);
}

fn start_round(runner: &mut GameRunner<SwiftOrb>) {
    tap(runner, 187.5, 667.0 * 0.3);
    assert!(runner.game().session().playing().is_some(), "play button should start a round");
}

fn orb_id(runner: &GameRunner<SwiftOrb>) -> orb_engine::EntityId {
    runner.game().session().playing().and_then(|p| p.orb()).unwrap()
}

#[test]
fn menu_ignores_taps_off_the_button() {
    let mut r = runner();
    tap(&mut r, 10.0, 10.0);
    assert!(matches!(r.game().session().phase(), Phase::Menu(_)));
    assert!(r.ctx().scene.find_by_tag(PLAY_BUTTON_TAG).is_some());
}

#[test]
fn drag_clamps_then_launch_lands_and_respawns() {
    let mut r = runner();
    start_round(&mut r);
    let first = orb_id(&r);

    down(&mut r, 187.5, 100.0, 0);
    r.push_input(InputEvent::PointerMove { x: 187.5, y: 200.0, pointer: 0 });
    r.tick(FRAME);
    let held = r.ctx().scene.get(first).unwrap().pos;
    assert!((held - Vec2::new(187.5, 150.0)).length() < 0.01, "orb held at {held:?}");

    r.push_input(InputEvent::PointerUp { x: 187.5, y: 200.0, pointer: 0 });
    r.tick(FRAME);
    let round = r.game().session().playing().unwrap();
    assert_eq!(round.launcher().state(), DragState::Launched);
    let v = r.ctx().velocity(first);
    assert!(v.y < 0.0 && v.x.abs() < 1e-3, "launched downward, got {v:?}");

    let mut landed = false;
    for _ in 0..120 {
        r.tick(FRAME);
        if orb_id(&r) != first {
            landed = true;
            break;
        }
    }
    assert!(landed, "orb should hit the ground and respawn");
    let round = r.game().session().playing().unwrap();
    assert_eq!(round.score(), 0);
    assert_eq!(round.launcher().state(), DragState::Idle);
    assert!(!r.ctx().scene.contains(first));
    assert_eq!(r.ctx().scene.get(orb_id(&r)).unwrap().pos, Vec2::new(187.5, 100.0));
}

#[test]
fn short_pull_snaps_back_without_launching() {
    let mut r = runner();
    start_round(&mut r);
    let orb = orb_id(&r);

    down(&mut r, 190.0, 100.0, 0);
    r.push_input(InputEvent::PointerMove { x: 190.0, y: 95.0, pointer: 0 });
    r.push_input(InputEvent::PointerUp { x: 190.0, y: 95.0, pointer: 0 });
    r.tick(FRAME);

    assert_eq!(orb_id(&r), orb);
    assert_eq!(r.ctx().scene.get(orb).unwrap().pos, Vec2::new(187.5, 100.0));
    assert_eq!(r.ctx().velocity(orb), Vec2::ZERO);
}

#[test]
fn second_finger_cannot_steal_the_drag() {
    let mut r = runner();
    start_round(&mut r);
    let orb = orb_id(&r);

    down(&mut r, 187.5, 100.0, 0);
    down(&mut r, 187.5, 100.0, 1);
    r.push_input(InputEvent::PointerMove { x: 250.0, y: 100.0, pointer: 1 });
    r.push_input(InputEvent::PointerUp { x: 250.0, y: 100.0, pointer: 1 });
    r.tick(FRAME);

    let round = r.game().session().playing().unwrap();
    assert!(matches!(round.launcher().state(), DragState::Dragging { .. }));
    assert_eq!(r.ctx().scene.get(orb).unwrap().pos, Vec2::new(187.5, 100.0));
}

#[test]
fn cancelled_touch_releases_the_orb() {
    let mut r = runner();
    start_round(&mut r);

    down(&mut r, 187.5, 100.0, 0);
    r.push_input(InputEvent::PointerMove { x: 187.5, y: 104.0, pointer: 0 });
    r.push_input(InputEvent::PointerCancel { x: 187.5, y: 104.0, pointer: 0 });
    r.tick(FRAME);

    let round = r.game().session().playing().unwrap();
    assert_eq!(round.launcher().state(), DragState::Idle);
}

#[test]
fn countdown_stops_at_zero_and_round_restarts_clean() {
    let mut r = runner();
    start_round(&mut r);

    let mut seen = Vec::new();
    for _ in 0..(60 * 22) {
        r.tick(FRAME);
        seen.extend(
            r.ctx()
                .events
                .iter()
                .filter(|e| e.kind == game_events::TIME_LEFT)
                .map(|e| e.a),
        );
        if matches!(r.game().session().phase(), Phase::RoundOver(_)) {
            break;
        }
    }
    assert!(matches!(r.game().session().phase(), Phase::RoundOver(_)));
    assert_eq!(seen.len(), 20, "one update per second: {seen:?}");
    assert_eq!(seen.last(), Some(&0.0));
    assert!(seen.iter().all(|&t| t >= 0.0));
    assert!(r.ctx().scene.find_by_tag("orb").is_none());
    assert!(r.ctx().scene.find_by_tag("target").is_none());
    assert!(r.ctx().scene.find_by_tag("barrier").is_none());
    assert!(r.ctx().scene.find_by_tag(GAME_OVER_TAG).is_some());

    // clock stays dead while the round-over screen is up
    for _ in 0..120 {
        r.tick(FRAME);
        assert!(r.ctx().events.iter().all(|e| e.kind != game_events::TIME_LEFT));
    }

    tap(&mut r, 300.0, 600.0);
    let round = r.game().session().playing().expect("tap anywhere restarts");
    assert_eq!(round.score(), 0);
    assert_eq!(round.countdown().remaining(), 20);
    let target = r.ctx().scene.get(round.target().unwrap()).unwrap();
    assert!(target.pos.y >= 667.0 / 3.0 && target.pos.y <= 667.0);
    assert_eq!(r.ctx().scene.get(orb_id(&r)).unwrap().pos, Vec2::new(187.5, 100.0));
    assert!(r.ctx().scene.find_by_tag(GAME_OVER_TAG).is_none());
}

#[test]
fn world_size_reaches_the_host() {
    let r = runner();
    assert_eq!(r.header()[HEADER_WORLD_WIDTH], 375.0);
    assert_eq!(r.header()[HEADER_WORLD_HEIGHT], 667.0);
    assert_eq!(r.game().config().physics_speed, 1.5);
}
