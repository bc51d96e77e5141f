use crate::{
    ActiveUpgrades, Card, Catalog, Deck, Enhancement, Floor, GameConfig, GameState, Phase,
    RngState, RoundOutcome, ShopState, UpgradeDef,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

mod shop;
mod stage;
mod turn;

/// Synthetic ids for duplicated copies start here; slot k of the
/// duplicated list always maps to the same id, so enhancements put on a
/// copy survive stage re-initialization.
pub const DUPLICATE_ID_BASE: u32 = 100;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("invalid card selection")]
    InvalidSelection,
    #[error("no discards left")]
    NoDiscardsLeft,
    #[error("not enough gold")]
    NotEnoughGold,
    #[error("shop not available")]
    ShopNotAvailable,
    #[error("invalid shop offer index")]
    InvalidOfferIndex,
    #[error("upgrade category is at its cap")]
    CategoryCapReached,
    #[error("no eligible card for this upgrade")]
    NoEligibleCard,
    #[error("round is not over")]
    RoundNotOver,
    #[error("round was not cleared")]
    RoundNotCleared,
}

/// The whole run. Commands mutate it synchronously and atomically; every
/// rejection leaves it untouched.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub pool: Vec<UpgradeDef>,
    pub rng: RngState,
    pub deck: Deck,
    pub hand: Vec<Card>,
    pub floor: Floor,
    pub state: GameState,
    pub upgrades: ActiveUpgrades,
    pub enhancements: HashMap<u32, Enhancement>,
    pub removed: HashSet<u32>,
    pub duplicated: Vec<u32>,
    pub shop: Option<ShopState>,
}

impl RunState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(config.stage_one_target, config.economy.starting_gold);
        Self {
            config,
            catalog: Catalog::standard(),
            pool: crate::builtin_pool(),
            rng: RngState::from_seed(seed),
            deck: Deck::default(),
            hand: Vec::new(),
            floor: Floor::default(),
            state,
            upgrades: ActiveUpgrades::default(),
            enhancements: HashMap::new(),
            removed: HashSet::new(),
            duplicated: Vec::new(),
            shop: None,
        }
    }

    pub fn hand_capacity(&self) -> usize {
        if self.upgrades.shrink_hand() {
            self.config.shrunk_hand_capacity
        } else {
            self.config.hand_capacity
        }
    }

    pub fn can_play(&self) -> bool {
        self.state.phase == Phase::Play && !self.hand.is_empty()
    }

    pub fn can_discard(&self) -> bool {
        self.state.phase == Phase::Play && self.state.discards_left > 0 && !self.hand.is_empty()
    }

    /// Top of the draw stack, visible only while the preview upgrade is
    /// active.
    pub fn deck_preview(&self) -> Option<&Card> {
        if self.upgrades.deck_preview() {
            self.deck.peek_top()
        } else {
            None
        }
    }

    /// Card ids in the current run composition: catalog minus removals,
    /// plus the synthetic ids of duplicated copies.
    pub fn composition_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .catalog
            .cards()
            .iter()
            .map(|card| card.id)
            .filter(|id| !self.removed.contains(id))
            .collect();
        for slot in 0..self.duplicated.len() {
            ids.push(DUPLICATE_ID_BASE + slot as u32);
        }
        ids
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.state.stage,
            target: self.state.target,
            gold: self.state.gold,
            phase: self.state.phase,
            base: self.state.score.base,
            mult: self.state.score.mult,
            total: self.state.total,
            turn: self.state.turn,
            discards_left: self.state.discards_left,
            deck_len: self.deck.len(),
            discard_pile_len: self.deck.discard.len(),
            hand: self.hand.clone(),
            floor: self.floor.cards.clone(),
            preview: self.deck_preview().copied(),
            upgrades: self.upgrades.items.iter().map(|u| u.id.clone()).collect(),
            outcome: self.state.outcome,
        }
    }
}

/// Read-only projection handed to presentation layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub stage: u32,
    pub target: i64,
    pub gold: i64,
    pub phase: Phase,
    pub base: i64,
    pub mult: f64,
    pub total: i64,
    pub turn: u32,
    pub discards_left: u8,
    pub deck_len: usize,
    pub discard_pile_len: usize,
    pub hand: Vec<Card>,
    pub floor: Vec<Card>,
    pub preview: Option<Card>,
    pub upgrades: Vec<String>,
    pub outcome: Option<RoundOutcome>,
}
