//! Five-element balance of a chart

use serde::{Deserialize, Serialize};

use super::Element;

/// Count at or above which an element is considered excessive
pub const EXCESSIVE_THRESHOLD: u8 = 4;

/// Weighted element counts plus the sets derived from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBalance {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
    pub strongest: Element,
    pub weakest: Element,
    /// Elements with a count of zero, canonical order
    pub missing: Vec<Element>,
    /// Elements at or above the excessive threshold, canonical order
    pub excessive: Vec<Element>,
}

impl ElementBalance {
    /// Build the balance from raw counts indexed by `Element::index`
    pub fn from_counts(counts: [u8; 5]) -> Self {
        // Strict comparisons: the earliest element in canonical order wins ties
        let strongest = Element::ALL
            .iter()
            .copied()
            .fold(Element::Wood, |best, e| {
                if counts[e.index()] > counts[best.index()] {
                    e
                } else {
                    best
                }
            });
        let weakest = Element::ALL
            .iter()
            .copied()
            .fold(Element::Wood, |best, e| {
                if counts[e.index()] < counts[best.index()] {
                    e
                } else {
                    best
                }
            });

        let missing = Element::ALL
            .iter()
            .copied()
            .filter(|e| counts[e.index()] == 0)
            .collect();
        let excessive = Element::ALL
            .iter()
            .copied()
            .filter(|e| counts[e.index()] >= EXCESSIVE_THRESHOLD)
            .collect();

        Self {
            wood: counts[0],
            fire: counts[1],
            earth: counts[2],
            metal: counts[3],
            water: counts[4],
            strongest,
            weakest,
            missing,
            excessive,
        }
    }

    pub fn count(&self, element: Element) -> u8 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn counts(&self) -> [u8; 5] {
        [self.wood, self.fire, self.earth, self.metal, self.water]
    }

    pub fn total(&self) -> u32 {
        self.counts().iter().map(|c| *c as u32).sum()
    }

    pub fn is_missing(&self, element: Element) -> bool {
        self.missing.contains(&element)
    }

    pub fn is_excessive(&self, element: Element) -> bool {
        self.excessive.contains(&element)
    }
}
