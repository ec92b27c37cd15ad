//! Game session - one attempt at one level.
//!
//! A session owns the world, the player and win-trigger ids, the lifecycle
//! status, score, speed-boost adjustment, the status banner and its own
//! [`DebugLog`]. The process loop is its only owner; there is no shared state.
//!
//! # Tick
//!
//! 1. Every entity present at the start of the tick runs once, in list order.
//! 2. Entities spawned during the sweep are appended (they run next tick).
//! 3. Removal-flagged entities are dropped, except the player, which stays
//!    renderable after death.
//! 4. The win trigger is checked, then the player's death.

use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::debug_log::DebugLog;
use crate::entity::{Entity, EntityId, EntityKind, Footprint, GameEvent, TickContext};
use crate::level::{load_level_file, parse_level, LevelError};
use crate::physics;
use crate::rng::SimpleRng;
use crate::scene::SceneBuffer;
use crate::types::{
    GameAction, GameStatus, BASE_TICK_MS, FINAL_LEVEL, MAX_TICK_MS, MIN_TICK_MS,
    SCORE_TICK_STEP_US, SPEED_BOOST_LIMIT,
};
use crate::world::World;

pub const PAUSED_MESSAGE: &str = "Game paused. Press 'p' to continue.";
pub const LEVEL_COMPLETE_MESSAGE: &str =
    "You've completed the level! Hit 'p' to play the next level, 'r' to restart or 'e' to exit.";
pub const GAME_COMPLETE_MESSAGE: &str =
    "You win the game! Woohoo! Hit 'e' to exit or 'r' to restart.";
pub const DEATH_MESSAGE: &str = "Oh no! You died. :( :( Hit 'r' to restart or 'e' to exit.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("level {0} has no player")]
    MissingPlayer(u32),
}

/// Result of one [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was not running; nothing happened.
    Idle,
    Continuing,
    Won,
    Lost,
}

/// What the process loop should do after a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Play(u32),
    LevelMenu,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Session {
    level: u32,
    world: World,
    player: EntityId,
    flag: Option<EntityId>,
    status: GameStatus,
    items_collected: u32,
    bricks_broken: u32,
    speed_boost: i32,
    status_msg: Option<String>,
    debug_log: DebugLog,
    rng: SimpleRng,
    ticks: u64,
}

impl Session {
    /// Start a running session from loader output.
    pub fn new(level: u32, kinds: Vec<EntityKind>, rng: SimpleRng) -> Result<Self, SessionError> {
        let world = World::from_kinds(kinds);
        let player = world
            .iter()
            .find(|e| e.is_player())
            .map(Entity::id)
            .ok_or(SessionError::MissingPlayer(level))?;
        let flag = world
            .iter()
            .find(|e| matches!(e.kind(), EntityKind::Flag { .. }))
            .map(Entity::id);
        if flag.is_none() {
            log::warn!("level {} has no flag and cannot be won", level);
        }

        info!("level {} started with {} entities", level, world.len());
        Ok(Self {
            level,
            world,
            player,
            flag,
            status: GameStatus::Running,
            items_collected: 0,
            bricks_broken: 0,
            speed_boost: 0,
            status_msg: None,
            debug_log: DebugLog::new(),
            rng,
            ticks: 0,
        })
    }

    pub fn from_level_text(level: u32, text: &str, seed: u32) -> Result<Self, SessionError> {
        let mut rng = SimpleRng::new(seed);
        let kinds = parse_level(text, &mut rng);
        Self::new(level, kinds, rng)
    }

    pub fn load(level: u32, path: &Path, seed: u32) -> Result<Self, SessionError> {
        let mut rng = SimpleRng::new(seed);
        let kinds = load_level_file(path, &mut rng)?;
        Self::new(level, kinds, rng)
    }

    /// Wait for the pause key before the first tick.
    pub fn hold_for_start(&mut self) {
        self.status = GameStatus::WaitingForNextLevel;
        self.status_msg = Some(format!("Level {}. Press 'p' to start.", self.level));
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn score(&self) -> u32 {
        self.items_collected + self.bricks_broken
    }

    pub fn items_collected(&self) -> u32 {
        self.items_collected
    }

    pub fn bricks_broken(&self) -> u32 {
        self.bricks_broken
    }

    pub fn speed_boost(&self) -> i32 {
        self.speed_boost
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_msg.as_deref()
    }

    pub fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Option<&Entity> {
        self.world.find(self.player)
    }

    pub fn player_footprint(&self) -> Footprint {
        self.player().map(Entity::footprint).unwrap_or_default()
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }
        self.ticks += 1;

        let count = self.world.len();
        let mut ctx = TickContext::new(&mut self.rng);
        for index in 0..count {
            physics::tick_entity(&mut self.world, index, &mut ctx);
        }
        let TickContext {
            spawned, events, ..
        } = ctx;

        for kind in spawned {
            let id = self.world.spawn(kind);
            debug!("spawned {} {}", self.world.find(id).map_or("?", Entity::name), id);
        }
        for event in events {
            self.record(event);
        }
        self.world
            .retain(|e| e.is_player() || !e.should_be_removed());

        self.evaluate()
    }

    fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::Killed { victim, by } => {
                let killer = self.world.find(by).map_or("something", Entity::name);
                if victim == self.player {
                    info!("player killed by {} {}", killer, by);
                    self.debug_log.push(format!("killed by {}", killer));
                } else {
                    debug!("{} killed by {} {}", victim, killer, by);
                }
            }
            GameEvent::ItemGranted { item, .. } => {
                self.items_collected += 1;
                debug!("player picked up {}", item.as_str());
                self.debug_log.push(format!("got {}", item.as_str()));
            }
            GameEvent::ItemExpired { item, .. } => {
                self.debug_log.push(format!("{} wore off", item.as_str()));
            }
            GameEvent::BrickBroken { brick } => {
                self.bricks_broken += 1;
                debug!("brick {} broken", brick);
            }
            GameEvent::FlagReached { flag } => {
                debug!("flag {} reached", flag);
            }
            GameEvent::FellOut { entity } => {
                if entity == self.player {
                    self.debug_log.push("fell out of the level");
                }
            }
        }
    }

    fn evaluate(&mut self) -> TickOutcome {
        let won = self
            .flag
            .and_then(|id| self.world.find(id))
            .is_some_and(Entity::had_collision);
        if won {
            self.status = GameStatus::Won;
            self.status_msg = Some(if self.level >= FINAL_LEVEL {
                GAME_COMPLETE_MESSAGE.to_string()
            } else {
                LEVEL_COMPLETE_MESSAGE.to_string()
            });
            info!("level {} won after {} ticks", self.level, self.ticks);
            return TickOutcome::Won;
        }

        let dead = self.player().map_or(true, Entity::is_dead);
        if dead {
            self.status = GameStatus::Lost;
            self.status_msg = Some(DEATH_MESSAGE.to_string());
            info!("level {} lost after {} ticks", self.level, self.ticks);
            return TickOutcome::Lost;
        }

        TickOutcome::Continuing
    }

    /// Apply a player command. Returns whether it had any effect.
    ///
    /// Finished sessions ignore everything here; see [`Session::follow_up`].
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        match action {
            GameAction::Quit => {
                self.status = GameStatus::Quit;
                true
            }
            GameAction::Pause => {
                match self.status {
                    GameStatus::Paused | GameStatus::WaitingForNextLevel => {
                        self.status = GameStatus::Running;
                        self.status_msg = None;
                    }
                    _ => {
                        self.status = GameStatus::Paused;
                        self.status_msg = Some(PAUSED_MESSAGE.to_string());
                    }
                }
                true
            }
            _ if self.status != GameStatus::Running => false,
            GameAction::Jump => self.with_player(|p| p.jump()),
            GameAction::Left => self.with_player(|p| p.left()),
            GameAction::Right => self.with_player(|p| p.right()),
            GameAction::Down => self.with_player(|p| p.down()),
            GameAction::Fire => self.fire(),
            GameAction::SpeedUp => {
                self.speed_boost = (self.speed_boost + 1).min(SPEED_BOOST_LIMIT);
                true
            }
            GameAction::SlowDown => {
                self.speed_boost = (self.speed_boost - 1).max(-SPEED_BOOST_LIMIT);
                true
            }
            GameAction::Restart | GameAction::LevelMenu | GameAction::SelectLevel(_) => false,
        }
    }

    fn with_player(&mut self, f: impl FnOnce(&mut crate::entity::Player)) -> bool {
        match self.world.find_mut(self.player).and_then(Entity::as_player_mut) {
            Some(player) if !player.dead => {
                f(player);
                true
            }
            _ => false,
        }
    }

    /// Trigger every held item. Fireballs appear immediately.
    fn fire(&mut self) -> bool {
        let Some(entity) = self.world.find(self.player) else {
            return false;
        };
        let Some(player) = entity.as_player() else {
            return false;
        };
        let height = entity.footprint().len();

        let mut spawned = Vec::new();
        for item in &player.items {
            item.fire(self.player, &player.body, height, &mut spawned);
        }
        let fired = !spawned.is_empty();
        for kind in spawned {
            self.world.spawn(kind);
        }
        fired
    }

    /// Where to go after the session ended, given the next key.
    pub fn follow_up(&self, action: GameAction) -> Option<FollowUp> {
        if !self.status.is_terminal() {
            return None;
        }
        match action {
            GameAction::Pause if self.status == GameStatus::Won => {
                Some(FollowUp::Play(next_level(self.level)))
            }
            GameAction::Pause | GameAction::Restart => Some(FollowUp::Play(self.level)),
            GameAction::SelectLevel(n) => Some(FollowUp::Play(u32::from(n))),
            GameAction::LevelMenu => Some(FollowUp::LevelMenu),
            GameAction::Quit => Some(FollowUp::Quit),
            _ => None,
        }
    }

    /// Time to wait between ticks at the current score and boost.
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.score(), self.speed_boost)
    }

    /// Draw every entity into `scene`, replacing its contents.
    pub fn render(&self, scene: &mut SceneBuffer) {
        scene.clear();
        for entity in self.world.iter() {
            entity.render(scene);
        }
    }
}

/// Level after `level`; the campaign starts over after the final level.
pub fn next_level(level: u32) -> u32 {
    if level >= FINAL_LEVEL {
        1
    } else {
        level + 1
    }
}

/// Tick interval for a score and speed-boost adjustment.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tui_scroller_core::session::tick_interval;
///
/// assert_eq!(tick_interval(0, 0), Duration::from_millis(100));
/// assert_eq!(tick_interval(0, 1), Duration::from_millis(50));
/// assert_eq!(tick_interval(0, -2), Duration::from_millis(200));
/// ```
pub fn tick_interval(score: u32, speed_boost: i32) -> Duration {
    let base_us = BASE_TICK_MS as i64 * 1000 - SCORE_TICK_STEP_US * i64::from(score);
    let (multiplier, denominator) = if speed_boost < 0 {
        (i64::from(-speed_boost), 1)
    } else {
        (1, 1 + i64::from(speed_boost))
    };
    let us = (base_us * multiplier / denominator)
        .clamp(MIN_TICK_MS as i64 * 1000, MAX_TICK_MS as i64 * 1000);
    Duration::from_micros(us as u64)
}
