//! Whole-level play through the session API.

use std::time::Duration;

use tui_scroller::core::session::{next_level, DEATH_MESSAGE, LEVEL_COMPLETE_MESSAGE};
use tui_scroller::core::{EntityKind, FollowUp, Session, TickOutcome};
use tui_scroller::types::{GameAction, GameStatus, Position, FINAL_LEVEL};

fn run_until_done(session: &mut Session, max_ticks: usize) -> TickOutcome {
    for _ in 0..max_ticks {
        match session.tick() {
            TickOutcome::Continuing => {}
            outcome => return outcome,
        }
    }
    TickOutcome::Continuing
}

#[test]
fn test_walk_to_flag_and_continue() {
    let mut s = Session::from_level_text(2, "P    F\n======\n", 5).unwrap();
    let mut outcome = TickOutcome::Continuing;
    for _ in 0..20 {
        s.apply_action(GameAction::Right);
        outcome = s.tick();
        if outcome != TickOutcome::Continuing {
            break;
        }
    }
    assert_eq!(outcome, TickOutcome::Won);
    assert_eq!(s.status_message(), Some(LEVEL_COMPLETE_MESSAGE));
    assert_eq!(s.follow_up(GameAction::Pause), Some(FollowUp::Play(3)));
    assert_eq!(s.follow_up(GameAction::Restart), Some(FollowUp::Play(2)));
}

#[test]
fn test_next_level_wraps() {
    assert_eq!(next_level(1), 2);
    assert_eq!(next_level(FINAL_LEVEL - 1), FINAL_LEVEL);
    assert_eq!(next_level(FINAL_LEVEL), 1);
}

#[test]
fn test_bird_flies_into_player() {
    let mut s = Session::from_level_text(1, "P  B\n====\n", 5).unwrap();
    let outcome = run_until_done(&mut s, 10);
    assert_eq!(outcome, TickOutcome::Lost);
    assert_eq!(s.ticks(), 3);
    assert_eq!(s.status_message(), Some(DEATH_MESSAGE));
    assert_eq!(s.debug_log().joined(), "killed by bird");
}

#[test]
fn test_removed_entities_disappear_but_player_stays() {
    let mut s = Session::from_level_text(1, "PE\n", 5).unwrap();
    s.apply_action(GameAction::Right);
    assert_eq!(s.tick(), TickOutcome::Continuing);
    assert_eq!(s.items_collected(), 1);
    assert_eq!(s.world().len(), 1);

    assert_eq!(run_until_done(&mut s, 60), TickOutcome::Lost);
    assert_eq!(s.world().len(), 1);
    assert!(s.player().unwrap().is_dead());
}

#[test]
fn test_fireball_shooter_kills_walker() {
    let mut s = Session::from_level_text(1, "PW    b\n========\n", 5).unwrap();
    s.apply_action(GameAction::Right);
    s.tick();
    assert_eq!(s.items_collected(), 1);

    assert!(s.apply_action(GameAction::Fire));
    let walker_alive = |s: &Session| {
        s.world()
            .iter()
            .any(|e| matches!(e.kind(), EntityKind::Walker { .. }))
    };
    for _ in 0..5 {
        s.tick();
        if !walker_alive(&s) {
            break;
        }
    }
    assert!(!walker_alive(&s));
    assert_eq!(s.status(), GameStatus::Running);
}

#[test]
fn test_speed_boost_pickup_changes_glyphs() {
    let mut s = Session::from_level_text(1, "PE\n==\n", 5).unwrap();
    s.apply_action(GameAction::Right);
    s.tick();
    let player = s.player().unwrap().as_player().unwrap();
    assert!(player.has_speed_boost());
    assert_eq!(player.glyphs(), "LL");
    assert_eq!(s.score(), 1);
    // Score shortens the tick.
    assert_eq!(s.tick_interval(), Duration::from_millis(95));
}

#[test]
fn test_pause_freezes_world() {
    let mut s = Session::from_level_text(1, "P  b\n=====\n", 5).unwrap();
    s.tick();
    let before: Vec<Position> = s.world().iter().map(|e| e.position()).collect();
    s.apply_action(GameAction::Pause);
    for _ in 0..5 {
        assert_eq!(s.tick(), TickOutcome::Idle);
    }
    let after: Vec<Position> = s.world().iter().map(|e| e.position()).collect();
    assert_eq!(before, after);
}
