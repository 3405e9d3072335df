//! Reroll transition model
//!
//! For every (dice state, keep pattern) pair this gives the distribution over
//! the dice state that results from rerolling the unkept dice. Keep patterns
//! apply to the state's sorted faces.
//!
//! Many patterns keep the same multiset of faces (on `[2, 2, 5, 5, 5]`, keeping
//! position 0 or position 1 both keep one 2), and the resulting distribution
//! only depends on that multiset. Distributions are therefore interned per kept
//! multiset: 462 of them cover all 252 × 32 pairs.

use crate::core::{DiceState, FaceCounts, KeepPattern, NUM_DICE, NUM_DICE_STATES, NUM_FACES};
use rustc_hash::FxHashMap;

/// Probability distribution over resulting dice states
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    /// (dice state rank, probability), ascending by rank
    outcomes: Vec<(u8, f64)>,
}

impl Distribution {
    /// Outcomes as (dice state rank, probability) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.outcomes
            .iter()
            .map(|&(rank, p)| (usize::from(rank), p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Probability of landing on the state with `rank`
    #[must_use]
    pub fn probability(&self, rank: usize) -> f64 {
        self.outcomes
            .binary_search_by_key(&rank, |&(r, _)| usize::from(r))
            .map_or(0.0, |i| self.outcomes[i].1)
    }

    /// Total probability mass (1.0 up to rounding)
    #[must_use]
    pub fn total(&self) -> f64 {
        self.outcomes.iter().map(|&(_, p)| p).sum()
    }

    /// Probability-weighted mean of per-state `values`, indexed by rank
    #[must_use]
    pub fn expectation(&self, values: &[f64; NUM_DICE_STATES]) -> f64 {
        self.outcomes
            .iter()
            .map(|&(rank, p)| p * values[usize::from(rank)])
            .sum()
    }
}

/// Precomputed reroll distributions for every (state, keep pattern) pair
#[derive(Debug, Clone)]
pub struct TransitionModel {
    /// One distribution per distinct kept multiset
    distributions: Vec<Distribution>,
    /// Kept multiset index for each (state rank, pattern mask)
    keep_index: Vec<[u16; KeepPattern::COUNT]>,
    /// Per state: one representative pattern per distinct kept multiset,
    /// the lowest mask that produces it
    distinct: Vec<Vec<KeepPattern>>,
    /// Kept multiset index of the empty keep (the opening roll)
    opening: usize,
}

impl TransitionModel {
    /// Build the model over `states`, which must be the 252 states in rank order
    #[must_use]
    pub fn build(states: &[DiceState]) -> Self {
        debug_assert_eq!(states.len(), NUM_DICE_STATES);

        let mut interned: FxHashMap<FaceCounts, usize> = FxHashMap::default();
        let mut distributions = Vec::new();
        let mut keep_index = Vec::with_capacity(states.len());
        let mut distinct = Vec::with_capacity(states.len());

        for state in states {
            let faces = state.faces();
            let mut row = [0u16; KeepPattern::COUNT];
            let mut representatives: Vec<KeepPattern> = Vec::new();
            let mut seen: Vec<usize> = Vec::new();

            for pattern in KeepPattern::all() {
                let kept = kept_counts(&faces, pattern);
                let index = *interned.entry(kept).or_insert_with(|| {
                    distributions.push(reroll_distribution(&kept));
                    distributions.len() - 1
                });

                row[usize::from(pattern.mask())] = index as u16;
                if !seen.contains(&index) {
                    seen.push(index);
                    representatives.push(pattern);
                }
            }

            keep_index.push(row);
            distinct.push(representatives);
        }

        let opening = interned
            .get(&[0; NUM_FACES])
            .copied()
            .unwrap_or_default();

        Self {
            distributions,
            keep_index,
            distinct,
            opening,
        }
    }

    /// Distribution after applying `pattern` to the sorted faces of `state`
    #[must_use]
    pub fn transitions(&self, state: &DiceState, pattern: KeepPattern) -> &Distribution {
        &self.distributions[self.keep_id(state.rank(), pattern)]
    }

    /// Kept multiset index for a (state rank, pattern) pair
    #[inline]
    #[must_use]
    pub fn keep_id(&self, rank: usize, pattern: KeepPattern) -> usize {
        usize::from(self.keep_index[rank][usize::from(pattern.mask())])
    }

    /// One pattern per distinct kept multiset of the state with `rank`
    #[must_use]
    pub fn distinct_patterns(&self, rank: usize) -> &[KeepPattern] {
        &self.distinct[rank]
    }

    /// Every interned distribution, indexed by kept multiset
    #[must_use]
    pub fn distributions(&self) -> &[Distribution] {
        &self.distributions
    }

    /// Distribution of a fresh five-dice roll
    #[must_use]
    pub fn opening_roll(&self) -> &Distribution {
        &self.distributions[self.opening]
    }
}

fn kept_counts(sorted_faces: &[u8; NUM_DICE], pattern: KeepPattern) -> FaceCounts {
    let mut counts = [0u8; NUM_FACES];
    for position in pattern.positions() {
        counts[usize::from(sorted_faces[position] - 1)] += 1;
    }
    counts
}

/// Enumerate all 6^k equally likely outcomes of rerolling `5 - |kept|` dice
/// and aggregate them by resulting state
fn reroll_distribution(kept: &FaceCounts) -> Distribution {
    let kept_total: usize = kept.iter().map(|&c| usize::from(c)).sum();
    let rerolled = NUM_DICE - kept_total;
    let outcomes = 6usize.pow(rerolled as u32);

    let mut hits: FxHashMap<usize, u32> = FxHashMap::default();
    for outcome in 0..outcomes {
        let mut counts = *kept;
        let mut code = outcome;
        for _ in 0..rerolled {
            counts[code % NUM_FACES] += 1;
            code /= NUM_FACES;
        }

        if let Ok(state) = DiceState::from_counts(counts) {
            *hits.entry(state.rank()).or_insert(0) += 1;
        }
    }

    let mut outcomes_by_rank: Vec<(u8, f64)> = hits
        .into_iter()
        .map(|(rank, count)| (rank as u8, f64::from(count) / outcomes as f64))
        .collect();
    outcomes_by_rank.sort_unstable_by_key(|&(rank, _)| rank);

    Distribution {
        outcomes: outcomes_by_rank,
    }
}
