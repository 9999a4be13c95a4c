// Integration tests for round flow and high scores. These drive `PartyGame`
// with synthetic button snapshots and an in-memory store, no browser needed.

use tap_party::config::{GameConfig, HighScoreMode};
use tap_party::hud;
use tap_party::input::{Button, ButtonSnapshot};
use tap_party::party::{HighScoreStore, MemoryStore, PartyEvent, PartyGame, Phase};

const STEP: f64 = 1000.0 / 60.0;

fn idle() -> ButtonSnapshot {
    ButtonSnapshot::default()
}

fn press(b: Button) -> ButtonSnapshot {
    ButtonSnapshot::default().with(b)
}

fn start(game: &mut PartyGame<MemoryStore>) {
    game.update(&idle(), STEP);
    assert_eq!(game.update(&press(Button::South), STEP), vec![PartyEvent::Started]);
    game.update(&idle(), STEP);
}

/// Tap `button` `n` times (press + release per tap).
fn tap(game: &mut PartyGame<MemoryStore>, button: Button, n: u32) -> Vec<PartyEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(game.update(&press(button), STEP));
        events.extend(game.update(&idle(), STEP));
    }
    events
}

/// Idle until the round ends; returns the finishing event.
fn run_out(game: &mut PartyGame<MemoryStore>) -> PartyEvent {
    for _ in 0..100_000 {
        for ev in game.update(&idle(), STEP) {
            if let PartyEvent::Finished { .. } = ev {
                return ev;
            }
        }
    }
    panic!("round never finished");
}

#[test]
fn round_lasts_the_configured_seconds() {
    let cfg = GameConfig { round_secs: 3, frame_ms: 100.0, ..GameConfig::default() };
    let mut game = PartyGame::new(cfg, MemoryStore::new()).unwrap();
    game.update(&press(Button::South), 100.0);
    let mut seconds = Vec::new();
    let mut steps = 0;
    loop {
        steps += 1;
        let events = game.update(&idle(), 100.0);
        for ev in &events {
            if let PartyEvent::Second { remaining } = ev {
                seconds.push(*remaining);
            }
        }
        if events.iter().any(|e| matches!(e, PartyEvent::Finished { .. })) {
            break;
        }
    }
    assert_eq!(seconds, vec![2, 1]);
    assert_eq!(steps, 30);
}

#[test]
fn taps_count_per_player_and_emit_events() {
    let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
    start(&mut game);
    let events = tap(&mut game, Button::East, 3);
    let taps: Vec<_> = events.iter().filter(|e| matches!(e, PartyEvent::Tap { .. })).collect();
    assert_eq!(taps, vec![&PartyEvent::Tap { player: 1 }; 3]);
    assert_eq!(game.players()[1].taps, 3);
    assert_eq!(game.total_taps(), 3);
}

#[test]
fn merged_devices_do_not_retrigger_a_held_button() {
    let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
    start(&mut game);
    let pad = press(Button::West);
    let keyboard = idle();
    for _ in 0..10 {
        game.update(&pad.merge(keyboard), STEP);
    }
    assert_eq!(game.players()[3].taps, 1);
}

#[test]
fn most_taps_wins_and_ties_go_to_the_later_player() {
    let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
    start(&mut game);
    tap(&mut game, Button::North, 4);
    tap(&mut game, Button::West, 4);
    tap(&mut game, Button::East, 2);
    let PartyEvent::Finished { winner, .. } = run_out(&mut game) else { unreachable!() };
    assert_eq!(winner, 3);
    assert_eq!(game.phase(), Phase::GameOver { winner: 3 });
}

#[test]
fn shared_high_score_is_total_taps_and_persisted() {
    let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
    start(&mut game);
    tap(&mut game, Button::North, 5);
    tap(&mut game, Button::South, 2);
    assert_eq!(
        run_out(&mut game),
        PartyEvent::Finished { winner: 0, new_high_score: true }
    );
    assert_eq!(game.high_score(), 7);
    assert_eq!(game.store().load("highScore"), Some(7));

    // A weaker round leaves the record alone.
    game.update(&idle(), STEP);
    start(&mut game);
    tap(&mut game, Button::East, 1);
    assert_eq!(
        run_out(&mut game),
        PartyEvent::Finished { winner: 1, new_high_score: false }
    );
    assert_eq!(game.store().load("highScore"), Some(7));
}

#[test]
fn stored_record_is_loaded_on_boot() {
    let mut store = MemoryStore::new();
    store.save("highScore", 120).unwrap();
    let game = PartyGame::new(GameConfig::default(), store).unwrap();
    assert_eq!(game.high_score(), 120);
}

#[test]
fn per_player_records_use_indexed_keys() {
    let cfg = GameConfig { high_score_mode: HighScoreMode::PerPlayer, ..GameConfig::default() };
    let mut store = MemoryStore::new();
    store.save("highScore.0", 3).unwrap();
    let mut game = PartyGame::new(cfg, store).unwrap();
    start(&mut game);
    tap(&mut game, Button::North, 2);
    tap(&mut game, Button::East, 4);
    assert_eq!(
        run_out(&mut game),
        PartyEvent::Finished { winner: 1, new_high_score: true }
    );
    assert_eq!(game.store().load("highScore.0"), Some(3));
    assert_eq!(game.store().load("highScore.1"), Some(4));
    assert_eq!(game.store().load("highScore"), None);
    assert_eq!(game.player_high_score(1), 4);
}

#[test]
fn game_over_screen_names_the_winner() {
    let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
    start(&mut game);
    tap(&mut game, Button::South, 6);
    run_out(&mut game);
    let lines = hud::layout(&game, 640.0, 640.0);
    let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, ["Game Over!", "😎 won with 6 taps!", "Tap Z to Start"]);
}
