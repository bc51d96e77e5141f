use crate::{Card, CardKind, RibbonColor};

pub const CATALOG_SIZE: usize = 48;

/// The two feature slots of each month; every month additionally carries
/// two plain junk cards. Lights sit on months 1, 3, 8, 11 and 12 (the rain
/// light), ribbons run red on 1-3, green on 4/5/7, blue on 6/9/10, and the
/// month-2/4/8 tens are the godori birds.
const MONTH_FEATURES: [[CardKind; 2]; 12] = [
    [CardKind::Light, CardKind::Ribbon(RibbonColor::Red)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Red)],
    [CardKind::Light, CardKind::Ribbon(RibbonColor::Red)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Green)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Green)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Blue)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Green)],
    [CardKind::Light, CardKind::Ten],
    [CardKind::SakeCup, CardKind::Ribbon(RibbonColor::Blue)],
    [CardKind::Ten, CardKind::Ribbon(RibbonColor::Blue)],
    [CardKind::Light, CardKind::DualJunk],
    [CardKind::Light, CardKind::DualJunk],
];

/// The fixed 48-card definition. Ids are stable (1..=48) across the catalog
/// and across runs; only duplicated copies carry synthetic ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(CATALOG_SIZE);
        let mut id = 1u32;
        for (index, features) in MONTH_FEATURES.iter().enumerate() {
            let month = index as u8 + 1;
            for &kind in features {
                cards.push(Card::new(id, month, kind));
                id += 1;
            }
            for _ in 0..2 {
                cards.push(Card::new(id, month, CardKind::Junk));
                id += 1;
            }
        }
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: u32) -> Option<Card> {
        self.cards.iter().copied().find(|card| card.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.card(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_composition() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), CATALOG_SIZE);

        let lights = count(&catalog, |c| matches!(c.kind, CardKind::Light));
        let tens = count(&catalog, |c| matches!(c.kind, CardKind::Ten));
        let ribbons = count(&catalog, |c| matches!(c.kind, CardKind::Ribbon(_)));
        let junk = count(&catalog, |c| matches!(c.kind, CardKind::Junk));
        let dual = count(&catalog, |c| matches!(c.kind, CardKind::DualJunk));
        let sake = count(&catalog, |c| matches!(c.kind, CardKind::SakeCup));

        assert_eq!(lights, 5);
        assert_eq!(tens, 7);
        assert_eq!(ribbons, 9);
        assert_eq!(junk, 24);
        assert_eq!(dual, 2);
        assert_eq!(sake, 1);
    }

    #[test]
    fn every_month_has_four_cards_and_two_junk() {
        let catalog = Catalog::standard();
        for month in 1..=12u8 {
            let of_month: Vec<_> = catalog
                .cards()
                .iter()
                .filter(|c| c.month == month)
                .collect();
            assert_eq!(of_month.len(), 4, "month {month}");
            let junk = of_month
                .iter()
                .filter(|c| matches!(c.kind, CardKind::Junk))
                .count();
            assert_eq!(junk, 2, "month {month}");
        }
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let a = Catalog::standard();
        let b = Catalog::standard();
        let mut ids: Vec<u32> = a.cards().iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CATALOG_SIZE);
        assert_eq!(a.cards(), b.cards());
    }

    fn count(catalog: &Catalog, pred: impl Fn(&Card) -> bool) -> usize {
        catalog.cards().iter().filter(|c| pred(c)).count()
    }
}
