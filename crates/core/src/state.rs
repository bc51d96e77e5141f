use crate::{ComboKind, Score};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Play,
    RoundOver,
    Shop,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    Cleared,
    Failed,
}

/// Scalar run state. Owned by the stage controller; everything per-round
/// resets through `reset_round`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub stage: u32,
    pub target: i64,
    pub gold: i64,
    pub phase: Phase,
    pub score: Score,
    pub total: i64,
    pub discards_left: u8,
    pub discards_max: u8,
    pub turn: u32,
    pub outcome: Option<RoundOutcome>,
    /// Combination names already announced this round.
    pub announced: HashSet<ComboKind>,
    /// Cards shuffled back into the deck by the reincarnation upgrade.
    pub reincarnated: u32,
    /// Multiplier accumulator fed by discards, persisted for the round.
    pub discard_mult: f64,
    pub replenish_grace_spent: bool,
}

impl GameState {
    pub fn new(stage_one_target: i64, starting_gold: i64) -> Self {
        Self {
            stage: 1,
            target: stage_one_target,
            gold: starting_gold,
            phase: Phase::Setup,
            score: Score::default(),
            total: 0,
            discards_left: 0,
            discards_max: 0,
            turn: 0,
            outcome: None,
            announced: HashSet::new(),
            reincarnated: 0,
            discard_mult: 0.0,
            replenish_grace_spent: false,
        }
    }

    pub fn reset_round(&mut self) {
        self.score = Score::default();
        self.total = 0;
        self.turn = 0;
        self.outcome = None;
        self.announced.clear();
        self.reincarnated = 0;
        self.discard_mult = 0.0;
        self.replenish_grace_spent = false;
    }
}
