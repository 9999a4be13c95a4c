//! Tap race rules: players, the round countdown, winner and high scores.
//!
//! `PartyGame` holds all of the round state explicitly and is advanced with a
//! merged `ButtonSnapshot` once per fixed step. It never touches the canvas;
//! the caller reacts to the returned `PartyEvent`s (fireworks, logging).

mod countdown;
mod store;

pub use countdown::{Countdown, CountdownTick};
pub use store::{HighScoreStore, LocalStorageStore, MemoryStore, parse_score};

use crate::config::{GameConfig, HighScoreMode};
use crate::error::ConfigError;
use crate::input::{Button, ButtonSnapshot};

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub name: String,
    pub button: Button,
    pub taps: u32,
    was_pressed: bool,
}

impl Player {
    fn new(name: &str, button: Button) -> Self {
        Self { name: name.to_owned(), button, taps: 0, was_pressed: false }
    }

    /// Count a tap on the rising edge of the player's button.
    fn sample(&mut self, input: &ButtonSnapshot) -> bool {
        let down = input.pressed(self.button);
        let tapped = down && !self.was_pressed;
        if tapped {
            self.taps += 1;
        }
        self.was_pressed = down;
        tapped
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    GameOver { winner: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartyEvent {
    Started,
    Tap { player: usize },
    Second { remaining: u32 },
    Finished { winner: usize, new_high_score: bool },
}

pub struct PartyGame<S: HighScoreStore> {
    config: GameConfig,
    players: Vec<Player>,
    phase: Phase,
    countdown: Countdown,
    /// Shared mode: one entry. Per-player mode: one per player.
    high_scores: Vec<u32>,
    store: S,
    /// Start button state last step; a round only starts on a fresh press.
    start_held: bool,
}

impl<S: HighScoreStore> PartyGame<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let players: Vec<Player> =
            config.players.iter().map(|p| Player::new(&p.name, p.button)).collect();
        let high_scores = (0..score_slots(&config))
            .map(|slot| store.load(&score_key(&config, slot)).unwrap_or(0))
            .collect();
        let countdown = Countdown::new(config.round_secs);
        Ok(Self {
            config,
            players,
            phase: Phase::Title,
            countdown,
            high_scores,
            store,
            start_held: false,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn total_taps(&self) -> u32 {
        self.players.iter().map(|p| p.taps).sum()
    }

    /// Record for display: the shared record, or the best per-player record.
    pub fn high_score(&self) -> u32 {
        self.high_scores.iter().copied().max().unwrap_or(0)
    }

    pub fn player_high_score(&self, player: usize) -> u32 {
        match self.config.high_score_mode {
            HighScoreMode::Shared => self.high_score(),
            HighScoreMode::PerPlayer => self.high_scores.get(player).copied().unwrap_or(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Advance one fixed step with the merged input of every device.
    pub fn update(&mut self, input: &ButtonSnapshot, dt_ms: f64) -> Vec<PartyEvent> {
        let mut events = Vec::new();
        let start_down = input.pressed(self.config.start_button);
        let fresh_start = start_down && !self.start_held;
        self.start_held = start_down;
        match self.phase {
            Phase::Title | Phase::GameOver { .. } => {
                if fresh_start {
                    self.start(input);
                    events.push(PartyEvent::Started);
                }
            }
            Phase::Playing => {
                for (idx, player) in self.players.iter_mut().enumerate() {
                    if player.sample(input) {
                        events.push(PartyEvent::Tap { player: idx });
                    }
                }
                match self.countdown.tick(dt_ms) {
                    CountdownTick::Running => {}
                    CountdownTick::Second(remaining) => {
                        events.push(PartyEvent::Second { remaining });
                    }
                    CountdownTick::Expired => events.push(self.finish()),
                }
            }
        }
        events
    }

    fn start(&mut self, input: &ButtonSnapshot) {
        for p in &mut self.players {
            p.taps = 0;
            // Holding the start button must not count as a first tap.
            p.was_pressed = input.pressed(p.button);
        }
        self.countdown = Countdown::new(self.config.round_secs);
        self.phase = Phase::Playing;
        log::info!("round started: {} players, {}s", self.players.len(), self.config.round_secs);
    }

    fn finish(&mut self) -> PartyEvent {
        // Ties go to the later player.
        let winner = self
            .players
            .iter()
            .enumerate()
            .max_by_key(|(_, p)| p.taps)
            .map(|(idx, _)| idx)
            .unwrap_or(0);

        let results: Vec<u32> = match self.config.high_score_mode {
            HighScoreMode::Shared => vec![self.total_taps()],
            HighScoreMode::PerPlayer => self.players.iter().map(|p| p.taps).collect(),
        };
        let mut new_high_score = false;
        for (slot, score) in results.into_iter().enumerate() {
            if score > self.high_scores[slot] {
                self.high_scores[slot] = score;
                new_high_score = true;
                let key = score_key(&self.config, slot);
                if let Err(e) = self.store.save(&key, score) {
                    log::warn!("high score not saved: {e}");
                }
            }
        }

        self.phase = Phase::GameOver { winner };
        log::info!(
            "round over: {} won with {} taps (total {}, new high score: {})",
            self.players[winner].name,
            self.players[winner].taps,
            self.total_taps(),
            new_high_score
        );
        PartyEvent::Finished { winner, new_high_score }
    }
}

fn score_slots(config: &GameConfig) -> usize {
    match config.high_score_mode {
        HighScoreMode::Shared => 1,
        HighScoreMode::PerPlayer => config.players.len(),
    }
}

fn score_key(config: &GameConfig, slot: usize) -> String {
    match config.high_score_mode {
        HighScoreMode::Shared => config.high_score_key.clone(),
        HighScoreMode::PerPlayer => format!("{}.{}", config.high_score_key, slot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 100.0;

    fn press(b: Button) -> ButtonSnapshot {
        ButtonSnapshot::default().with(b)
    }

    fn started() -> PartyGame<MemoryStore> {
        let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
        assert_eq!(game.update(&press(Button::South), STEP), vec![PartyEvent::Started]);
        game
    }

    #[test]
    fn title_ignores_other_buttons() {
        let mut game = PartyGame::new(GameConfig::default(), MemoryStore::new()).unwrap();
        assert!(game.update(&press(Button::North), STEP).is_empty());
        assert_eq!(game.phase(), Phase::Title);
    }

    #[test]
    fn start_press_is_not_a_tap() {
        let mut game = started();
        // Still holding Z (player 3's button).
        let ev = game.update(&press(Button::South), STEP);
        assert!(!ev.contains(&PartyEvent::Tap { player: 2 }));
        game.update(&ButtonSnapshot::default(), STEP);
        let ev = game.update(&press(Button::South), STEP);
        assert!(ev.contains(&PartyEvent::Tap { player: 2 }));
        assert_eq!(game.players()[2].taps, 1);
    }

    #[test]
    fn holding_counts_once() {
        let mut game = started();
        for _ in 0..5 {
            game.update(&press(Button::North), STEP);
        }
        assert_eq!(game.players()[0].taps, 1);
    }

    #[test]
    fn held_start_button_does_not_restart() {
        let cfg = GameConfig { round_secs: 1, ..GameConfig::default() };
        let mut game = PartyGame::new(cfg, MemoryStore::new()).unwrap();
        game.update(&press(Button::South), STEP);
        for _ in 0..10 {
            game.update(&press(Button::South), STEP);
        }
        assert!(matches!(game.phase(), Phase::GameOver { .. }));
        assert!(game.update(&press(Button::South), STEP).is_empty());
        game.update(&ButtonSnapshot::default(), STEP);
        assert_eq!(game.update(&press(Button::South), STEP), vec![PartyEvent::Started]);
    }

    #[test]
    fn player_lookup_by_high_score_mode() {
        let cfg = GameConfig { high_score_mode: HighScoreMode::PerPlayer, ..GameConfig::default() };
        let mut store = MemoryStore::new();
        store.save("highScore.1", 9).unwrap();
        let game = PartyGame::new(cfg, store).unwrap();
        assert_eq!(game.player_high_score(0), 0);
        assert_eq!(game.player_high_score(1), 9);
        assert_eq!(game.high_score(), 9);
    }
}
