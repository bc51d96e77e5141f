use crate::{Card, ComboKind};
use serde::{Deserialize, Serialize};

/// Notifications for presentation layers (audio, toasts, animation cues).
/// Core correctness never depends on a subscriber existing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    StageStarted {
        stage: u32,
        target: i64,
        discards: u8,
        hand: usize,
    },
    CardPlayed {
        card: Card,
        matched: bool,
    },
    DeckRevealed {
        card: Card,
    },
    CardsDiscarded {
        count: usize,
        recycled: bool,
    },
    CombinationAchieved {
        combo: ComboKind,
    },
    Scored {
        base: i64,
        mult: f64,
        total: i64,
    },
    RoundEnded {
        success: bool,
        total: i64,
        target: i64,
    },
    GoldEarned {
        interest: i64,
        enhanced: i64,
        stage_bonus: i64,
        total: i64,
    },
    ShopEntered {
        offers: usize,
        reroll_cost: i64,
    },
    ShopRerolled {
        cost: i64,
        reroll_cost: i64,
        gold: i64,
    },
    UpgradePurchased {
        id: String,
        cost: i64,
        gold: i64,
    },
    StageAdvanced {
        stage: u32,
        target: i64,
    },
    RevivalUsed {
        stage: u32,
    },
    RunReset {
        stage: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
