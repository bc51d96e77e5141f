use crate::{Card, RngState};
use std::collections::HashSet;

/// Draw stack plus the pile of cards that left play through the discard
/// action. Rebuilt from the catalog at every stage initialization.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
    pub discard: Vec<Card>,
}

impl Deck {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            draw: cards,
            discard: Vec::new(),
        }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn draw_one(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(card) = self.draw.pop() {
                cards.push(card);
            } else {
                break;
            }
        }
        cards
    }

    pub fn discard(&mut self, mut cards: Vec<Card>) {
        self.discard.append(&mut cards);
    }

    /// Shuffles cards back into the draw stack instead of retiring them.
    pub fn recycle(&mut self, mut cards: Vec<Card>, rng: &mut RngState) {
        self.draw.append(&mut cards);
        rng.shuffle(&mut self.draw);
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.draw.last()
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }
}

/// Cards in play that have not been scored away. Unbounded in card count;
/// the round ends when 5 distinct months accumulate.
#[derive(Debug, Default, Clone)]
pub struct Floor {
    pub cards: Vec<Card>,
}

impl Floor {
    pub fn place(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn has_month(&self, month: u8) -> bool {
        self.cards.iter().any(|card| card.month == month)
    }

    pub fn month_count(&self, month: u8) -> usize {
        self.cards.iter().filter(|card| card.month == month).count()
    }

    pub fn distinct_months(&self) -> usize {
        let months: HashSet<u8> = self.cards.iter().map(|card| card.month).collect();
        months.len()
    }

    /// Distinct months if `month` were also present.
    pub fn distinct_months_with(&self, month: u8) -> usize {
        let mut months: HashSet<u8> = self.cards.iter().map(|card| card.month).collect();
        months.insert(month);
        months.len()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
