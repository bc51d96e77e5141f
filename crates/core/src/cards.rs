use serde::{Deserialize, Serialize};

/// Month carrying the rain light; three lights including it score the
/// lesser "rain three lights" combination.
pub const RAIN_MONTH: u8 = 12;

/// Months whose ten cards are the godori birds.
pub const GODORI_MONTHS: [u8; 3] = [2, 4, 8];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RibbonColor {
    Red,
    Blue,
    Green,
}

impl RibbonColor {
    pub const ALL: [RibbonColor; 3] = [RibbonColor::Red, RibbonColor::Blue, RibbonColor::Green];

    pub fn index(self) -> usize {
        match self {
            RibbonColor::Red => 0,
            RibbonColor::Blue => 1,
            RibbonColor::Green => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardKind {
    Light,
    Ten,
    Ribbon(RibbonColor),
    Junk,
    DualJunk,
    /// The month-9 cup: counted as a ten when that completes the ten run,
    /// otherwise as two junk.
    SakeCup,
}

impl CardKind {
    /// Informational point value; the scoring formula never reads it.
    pub fn points(self) -> u8 {
        match self {
            CardKind::Light => 20,
            CardKind::Ten | CardKind::SakeCup => 10,
            CardKind::Ribbon(_) => 5,
            CardKind::DualJunk => 2,
            CardKind::Junk => 1,
        }
    }
}

/// One of 5 per-card enhancement kinds assigned through the shop. At most
/// one per card id; later purchases overwrite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Enhancement {
    /// Flat base bonus wherever the card is counted.
    Scarlet,
    /// Flat base bonus only while the card sits in hand.
    Azure,
    /// Flat base bonus only while the card sits on the floor.
    Jade,
    /// Feeds the round's multiplier accumulator when discarded.
    Amethyst,
    /// Pays gold at round success while held in hand or floor.
    Gilded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: u32,
    pub month: u8,
    pub kind: CardKind,
    pub points: u8,
}

impl Card {
    pub fn new(id: u32, month: u8, kind: CardKind) -> Self {
        Self {
            id,
            month,
            kind,
            points: kind.points(),
        }
    }

    pub fn is_light(&self) -> bool {
        matches!(self.kind, CardKind::Light)
    }

    pub fn is_rain_light(&self) -> bool {
        self.is_light() && self.month == RAIN_MONTH
    }

    pub fn is_junk(&self) -> bool {
        matches!(self.kind, CardKind::Junk | CardKind::DualJunk)
    }

    pub fn is_godori_bird(&self) -> bool {
        matches!(self.kind, CardKind::Ten) && GODORI_MONTHS.contains(&self.month)
    }
}
