//! State space enumeration
//!
//! Produces every canonical dice state and every category subset the solver
//! covers. Both sequences are lazy iterators that can be restarted by calling
//! the constructor again.

use crate::core::{CategorySet, DiceState, NUM_DICE, NUM_DICE_STATES};

/// Iterator over all 252 dice states in rank order
///
/// Walks sorted face sequences lexicographically: bump the rightmost face that
/// is below 6 and flatten everything after it to the same value.
#[derive(Debug, Clone)]
pub struct DiceStates {
    next: Option<[u8; NUM_DICE]>,
}

impl Iterator for DiceStates {
    type Item = DiceState;

    fn next(&mut self) -> Option<Self::Item> {
        let faces = self.next?;

        self.next = faces.iter().rposition(|&face| face < 6).map(|pivot| {
            let mut successor = faces;
            let raised = faces[pivot] + 1;
            for face in &mut successor[pivot..] {
                *face = raised;
            }
            successor
        });

        let mut counts = [0u8; 6];
        for face in faces {
            counts[usize::from(face - 1)] += 1;
        }
        DiceState::from_counts(counts).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (1, Some(NUM_DICE_STATES)),
            None => (0, Some(0)),
        }
    }
}

/// Enumerate every dice state exactly once, in rank order
///
/// # Examples
/// ```
/// use yahtzee_solver::solver::enumerate::all_dice_states;
///
/// let states: Vec<_> = all_dice_states().collect();
/// assert_eq!(states.len(), 252);
/// assert_eq!(states[0].faces(), [1, 1, 1, 1, 1]);
/// ```
#[must_use]
pub const fn all_dice_states() -> DiceStates {
    DiceStates {
        next: Some([1; NUM_DICE]),
    }
}

/// Iterator over every subset of a working category set, ascending by mask
#[derive(Debug, Clone)]
pub struct CategorySubsets {
    universe: u16,
    next: Option<u16>,
}

impl Iterator for CategorySubsets {
    type Item = CategorySet;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        // Next larger submask of `universe`
        self.next = if current == self.universe {
            None
        } else {
            Some(current.wrapping_sub(self.universe) & self.universe)
        };

        CategorySet::from_bits(current)
    }
}

/// Enumerate every subset of `universe`, the empty set and `universe` included
///
/// A full solve uses `CategorySet::ALL` (8192 subsets); a partial solve passes
/// a smaller working set.
#[must_use]
pub const fn category_subsets(universe: CategorySet) -> CategorySubsets {
    CategorySubsets {
        universe: universe.bits(),
        next: Some(0),
    }
}
