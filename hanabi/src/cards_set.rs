use std::iter::FusedIterator;

use crate::{Card, Color, Rank, DECK_SIZE};

/// A compact set of [`Card`] instances.
///
/// Allows intersection/union/xor with other such sets via bitwise ops.
/// Also implements [`IntoIterator`], so it can be converted into e.g.
/// a vector with `Vec::from_iter(cards_set)`.
///
/// ```
/// use hanabi::{card, CardsSet};
/// let mut set = CardsSet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CardsSet`.
/// set = set.insert(card!("3r"));
/// set = set.insert(card!("3r"));  // Inserting a second time has no effect
/// set = set.insert(card!("1r"));
/// assert_eq!(Vec::from_iter(set), vec![card!("1r"), card!("3r")]);
/// ```
///
/// # Note on immutability
///
/// This is an immutable type, so its "mutating" methods return a
/// new value instead of really mutating in-place (except for `std::ops::BitXxxAssign` trait methods).
/// It is also [`Copy`], so a value is not consumed by methods with `self` receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct CardsSet {
    // Only the low 50 bits are used.
    bits: u64,
}

const VALID_BITS: u64 = (1u64 << DECK_SIZE) - 1;

/// Every card of the deck.
pub const FULL_DECK: CardsSet = CardsSet { bits: VALID_BITS };

impl CardsSet {
    /// Creates a new, empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// All instances of one color/rank combination.
    pub fn of_kind(color: Color, rank: Rank) -> Self {
        (0..rank.copies())
            .filter_map(|instance| Card::new(color, rank, instance))
            .collect()
    }

    pub fn of_color(color: Color) -> Self {
        Rank::ALL
            .into_iter()
            .fold(Self::new(), |set, rank| set | Self::of_kind(color, rank))
    }

    pub fn of_rank(rank: Rank) -> Self {
        Color::ALL
            .into_iter()
            .fold(Self::new(), |set, color| set | Self::of_kind(color, rank))
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn contains(self, card: Card) -> bool {
        (self.bits & (1u64 << card.to_index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn is_subset(self, other: CardsSet) -> bool {
        self.bits & !other.bits == 0
    }

    pub fn is_disjoint(self, other: CardsSet) -> bool {
        self.bits & other.bits == 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, card: Card) -> Self {
        Self {
            bits: self.bits | (1u64 << card.to_index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, card: Card) -> Self {
        Self {
            bits: self.bits & !(1u64 << card.to_index()),
        }
    }
}

impl std::ops::BitAnd for CardsSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl std::ops::BitOr for CardsSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl std::ops::BitXor for CardsSet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits ^ rhs.bits,
        }
    }
}

impl std::ops::BitAndAssign for CardsSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl std::ops::BitOrAssign for CardsSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl std::ops::BitXorAssign for CardsSet {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.bits ^= rhs.bits;
    }
}

impl std::ops::Not for CardsSet {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self {
            bits: !self.bits & VALID_BITS,
        }
    }
}

impl FromIterator<Card> for CardsSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut bits = 0;
        for card in iter {
            bits |= 1u64 << card.to_index();
        }
        Self { bits }
    }
}

impl<'a> FromIterator<&'a Card> for CardsSet {
    fn from_iter<T: IntoIterator<Item = &'a Card>>(iter: T) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl IntoIterator for CardsSet {
    type Item = Card;

    type IntoIter = CardsSetIter;

    fn into_iter(self) -> Self::IntoIter {
        CardsSetIter { bits: self.bits }
    }
}

impl std::fmt::Display for CardsSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, card) in self.into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        write!(f, "}}")
    }
}

/// Iterator for a [`CardsSet`] that returns cards in canonical deck order.
#[derive(Clone, Copy, Debug)]
pub struct CardsSetIter {
    bits: u64,
}

impl Iterator for CardsSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing bits is the card index, always below 50
            let card_idx = self.bits.trailing_zeros() as u8;
            // Clear the flag corresponding to this card index
            self.bits ^= 1u64 << card_idx;

            Some(Card::from_index(card_idx))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CardsSetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CardsSetIter {}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::card;

    #[test]
    fn set_constants() {
        assert_eq!(CardsSet::from_iter(Card::deck()), FULL_DECK);
        assert_eq!(FULL_DECK.len() as usize, DECK_SIZE);
        assert!((!FULL_DECK).is_empty());
    }

    #[test]
    fn kinds() {
        assert_eq!(CardsSet::of_kind(Color::Red, Rank::One).len(), 3);
        assert_eq!(CardsSet::of_kind(Color::Red, Rank::Five).len(), 1);
        assert_eq!(CardsSet::of_color(Color::Blue).len(), 10);
        assert_eq!(CardsSet::of_rank(Rank::Three).len(), 10);
        assert_eq!(
            Vec::from_iter(CardsSet::of_kind(Color::White, Rank::Two)),
            vec![card!("2w"), card!("2w.1")]
        );
    }

    quickcheck! {
        fn complement_is_disjoint(set: CardsSet) -> bool {
            set.is_disjoint(!set) && (set | !set) == FULL_DECK
        }

        fn intersection_is_subset(a: CardsSet, b: CardsSet) -> bool {
            (a & b).is_subset(a) && (a & b).is_subset(b)
        }

        fn iteration_matches_len(set: CardsSet) -> bool {
            set.into_iter().count() == set.len() as usize
                && set.into_iter().all(|card| set.contains(card))
        }
    }
}
