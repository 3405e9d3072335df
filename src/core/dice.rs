//! Dice configurations and their canonical face-count form
//!
//! `Dice` is the ordered roll a player sees. `DiceState` forgets order and keeps
//! only how many dice show each face, which is all scoring and the solver need.
//! The 252 states are ranked 0..252 in lexicographic order of their sorted faces.

use super::DiceError;
use std::fmt;

/// Number of dice in a roll
pub const NUM_DICE: usize = 5;

/// Number of faces on a die
pub const NUM_FACES: usize = 6;

/// Number of distinct face-count multisets of 5 dice: C(10, 5)
pub const NUM_DICE_STATES: usize = 252;

/// Count of dice per face, index 0 holds face 1
pub type FaceCounts = [u8; NUM_FACES];

/// An ordered roll of five dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dice([u8; NUM_DICE]);

impl Dice {
    /// Validate an ordered list of die faces
    ///
    /// # Errors
    /// Returns `DiceError::Count` unless exactly 5 values are given, and
    /// `DiceError::Face` for any value outside 1..=6.
    ///
    /// # Examples
    /// ```
    /// use yahtzee_solver::core::Dice;
    ///
    /// let dice = Dice::new(&[6, 2, 6, 3, 6]).unwrap();
    /// assert_eq!(dice.state().count(6), 3);
    ///
    /// assert!(Dice::new(&[1, 2, 3]).is_err());
    /// assert!(Dice::new(&[1, 2, 3, 4, 7]).is_err());
    /// ```
    pub fn new(faces: &[u8]) -> Result<Self, DiceError> {
        let faces: [u8; NUM_DICE] = faces
            .try_into()
            .map_err(|_| DiceError::Count(faces.len()))?;

        if let Some(&bad) = faces.iter().find(|&&face| !(1..=6).contains(&face)) {
            return Err(DiceError::Face(bad));
        }

        Ok(Self(faces))
    }

    #[inline]
    #[must_use]
    pub const fn faces(&self) -> &[u8; NUM_DICE] {
        &self.0
    }

    /// Faces already known to lie in 1..=6, such as fresh rolls
    pub(crate) fn from_rolled(faces: [u8; NUM_DICE]) -> Self {
        debug_assert!(
            faces.iter().all(|face| (1..=6).contains(face)),
            "die face out of range: {faces:?}"
        );
        Self(faces)
    }

    /// Replace the face at `position`
    ///
    /// # Errors
    /// Returns `DiceError::Position` if `position >= 5` and `DiceError::Face`
    /// if `face` is outside 1..=6; the dice are left unchanged.
    pub fn set(&mut self, position: usize, face: u8) -> Result<(), DiceError> {
        if !(1..=6).contains(&face) {
            return Err(DiceError::Face(face));
        }
        let slot = self
            .0
            .get_mut(position)
            .ok_or(DiceError::Position(position))?;
        *slot = face;
        Ok(())
    }

    #[must_use]
    pub fn counts(&self) -> FaceCounts {
        let mut counts = [0u8; NUM_FACES];
        for &face in &self.0 {
            counts[usize::from(face - 1)] += 1;
        }
        counts
    }

    /// Canonical (order-free) form of this roll
    #[must_use]
    pub fn state(&self) -> DiceState {
        DiceState(self.counts())
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        self.0.iter().map(|&face| u32::from(face)).sum()
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(u8::to_string).collect();
        write!(f, "[{}]", faces.join(", "))
    }
}

/// A roll up to permutation: the number of dice showing each face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiceState(FaceCounts);

impl DiceState {
    /// Build a state from per-face counts
    ///
    /// # Errors
    /// Returns `DiceError::Count` unless the counts sum to 5.
    pub fn from_counts(counts: FaceCounts) -> Result<Self, DiceError> {
        let total: usize = counts.iter().map(|&c| usize::from(c)).sum();
        if total == NUM_DICE {
            Ok(Self(counts))
        } else {
            Err(DiceError::Count(total))
        }
    }

    /// Build a state from unordered faces
    ///
    /// # Errors
    /// Same validation as [`Dice::new`].
    pub fn from_faces(faces: &[u8]) -> Result<Self, DiceError> {
        Dice::new(faces).map(|dice| dice.state())
    }

    #[inline]
    #[must_use]
    pub const fn counts(&self) -> &FaceCounts {
        &self.0
    }

    /// Number of dice showing `face` (1..=6)
    #[inline]
    #[must_use]
    pub const fn count(&self, face: u8) -> u8 {
        self.0[(face - 1) as usize]
    }

    /// Faces in ascending order
    #[must_use]
    pub fn faces(&self) -> [u8; NUM_DICE] {
        let mut faces = [0u8; NUM_DICE];
        let mut slot = 0;
        for (face, &count) in (1..=6u8).zip(&self.0) {
            for _ in 0..count {
                faces[slot] = face;
                slot += 1;
            }
        }
        faces
    }

    /// The sorted ordering of this state as a concrete roll
    #[must_use]
    pub fn to_dice(&self) -> Dice {
        Dice(self.faces())
    }

    #[must_use]
    pub fn sum(&self) -> u32 {
        (1..=6u32)
            .zip(&self.0)
            .map(|(face, &count)| face * u32::from(count))
            .sum()
    }

    /// Combinations-with-replacement rank in 0..252
    ///
    /// Counts the sorted face sequences that precede this one lexicographically:
    /// for each position, every smaller admissible face contributes the number
    /// of non-decreasing tails that could follow it.
    #[must_use]
    pub fn rank(&self) -> usize {
        let faces = self.faces();
        let mut rank = 0;
        let mut floor = 0usize;

        for (position, &face) in faces.iter().enumerate() {
            let face = usize::from(face - 1);
            let tail = NUM_DICE - position - 1;
            for smaller in floor..face {
                rank += multisets(NUM_FACES - smaller, tail);
            }
            floor = face;
        }

        rank
    }
}

impl fmt::Display for DiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_dice(), f)
    }
}

/// Number of multisets of size `k` drawn from `n` kinds: C(n + k - 1, k)
const fn multisets(n: usize, k: usize) -> usize {
    binomial(n + k - 1, k)
}

const fn binomial(n: usize, k: usize) -> usize {
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result = result * (n - i) / (i + 1);
        i += 1;
    }
    result
}
