use super::*;
use crate::*;

impl RunState {
    /// Plays one hand card onto the floor. Matched or not, the card stays
    /// on the floor; captures resolve holistically at scoring time.
    pub fn play(&mut self, index: usize, events: &mut EventBus) -> Result<ScoreBreakdown, RunError> {
        if self.state.phase != Phase::Play {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if index >= self.hand.len() {
            return Err(RunError::InvalidSelection);
        }

        // Pre-flag: counting this play, the turn is round-ending when the
        // floor would reach the month cap, the hand would empty, or fewer
        // than 2 deck cards remain.
        let month = self.hand[index].month;
        let ending = self.floor.distinct_months_with(month) >= self.config.floor_month_cap
            || self.hand.len() == 1
            || self.deck.len() < 2;

        let card = self.hand.remove(index);
        let matched = self.floor.has_month(card.month);
        self.floor.place(card);
        events.push(Event::CardPlayed { card, matched });

        if let Some(revealed) = self.deck.draw_one() {
            self.floor.place(revealed);
            events.push(Event::DeckRevealed { card: revealed });
        }

        self.replenish();
        self.state.turn += 1;
        let breakdown = self.evaluate(events);

        if ending
            || self.hand.is_empty()
            || self.deck.is_empty()
            || self.floor.distinct_months() >= self.config.floor_month_cap
        {
            self.finish_round(events);
        }
        Ok(breakdown)
    }

    /// Discards the selected card (plus immediate neighbors under the wide
    /// discard upgrade), replacing each with a fresh draw. Costs one of the
    /// round's discard budget.
    pub fn discard(&mut self, index: usize, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Play {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.state.discards_left == 0 {
            return Err(RunError::NoDiscardsLeft);
        }
        if index >= self.hand.len() {
            return Err(RunError::InvalidSelection);
        }

        let mut indices = vec![index];
        if self.upgrades.wide_discard() {
            if index > 0 {
                indices.push(index - 1);
            }
            if index + 1 < self.hand.len() {
                indices.push(index + 1);
            }
        }
        indices.sort_unstable();

        let mut removed = Vec::with_capacity(indices.len());
        for &i in indices.iter().rev() {
            removed.push(self.hand.remove(i));
        }
        let count = removed.len();

        for card in &removed {
            if self.enhancements.get(&card.id) == Some(&Enhancement::Amethyst) {
                self.state.discard_mult += self.config.scoring.amethyst_discard_mult;
            }
        }
        self.state.discard_mult += self.upgrades.discard_tempo();

        let recycled = self.upgrades.recycle_base().is_some();
        if recycled {
            self.state.reincarnated += count as u32;
            self.deck.recycle(removed, &mut self.rng);
        } else {
            self.deck.discard(removed);
        }

        for _ in 0..count {
            match self.deck.draw_one() {
                Some(card) => self.hand.push(card),
                None => break,
            }
        }

        self.state.discards_left -= 1;
        self.state.turn += 1;
        events.push(Event::CardsDiscarded { count, recycled });
        self.evaluate(events);

        if self.hand.is_empty() || self.deck.is_empty() {
            self.finish_round(events);
        }
        Ok(())
    }

    fn replenish(&mut self) {
        if self.deck.is_empty() || self.hand.len() >= self.hand_capacity() {
            return;
        }
        if self.upgrades.stop_replenish() {
            if self.state.replenish_grace_spent {
                return;
            }
            self.state.replenish_grace_spent = true;
        }
        if let Some(card) = self.deck.draw_one() {
            self.hand.push(card);
        }
    }

    /// Re-runs the scoring engine over the current snapshot, records the
    /// result, and announces combinations not yet seen this round.
    pub(crate) fn evaluate(&mut self, events: &mut EventBus) -> ScoreBreakdown {
        let input = ScoreInput {
            hand: &self.hand,
            floor: &self.floor.cards,
            enhancements: &self.enhancements,
            upgrades: &self.upgrades,
            stage: self.state.stage,
            reincarnated: self.state.reincarnated,
            discard_mult: self.state.discard_mult,
        };
        let breakdown = scoring::score(&input, &self.config.scoring);
        self.state.score = breakdown.score.clone();
        self.state.total = breakdown.total;
        for &combo in &breakdown.combos {
            if self.state.announced.insert(combo) {
                events.push(Event::CombinationAchieved { combo });
            }
        }
        events.push(Event::Scored {
            base: breakdown.score.base,
            mult: breakdown.score.mult,
            total: breakdown.total,
        });
        breakdown
    }
}
