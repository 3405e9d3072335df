//! Scorecard categories and category sets
//!
//! A `CategorySet` stores a subset of the 13 categories as a 13-bit mask.
//! The mask doubles as the set's dense rank (0..8192) in the solver tables.

use super::YahtzeeError;
use std::fmt;
use std::str::FromStr;

/// Number of scorecard categories
pub const NUM_CATEGORIES: usize = 13;

/// Number of distinct category subsets (2^13)
pub const NUM_CATEGORY_SETS: usize = 1 << NUM_CATEGORIES;

/// One of the 13 scorecard boxes, in scorecard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

impl Category {
    /// All categories in enumeration order (upper section first)
    pub const ALL: [Self; NUM_CATEGORIES] = [
        Self::Ones,
        Self::Twos,
        Self::Threes,
        Self::Fours,
        Self::Fives,
        Self::Sixes,
        Self::ThreeOfAKind,
        Self::FourOfAKind,
        Self::FullHouse,
        Self::SmallStraight,
        Self::LargeStraight,
        Self::Yahtzee,
        Self::Chance,
    ];

    /// Position in enumeration order, also the category's bit in a `CategorySet`
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < NUM_CATEGORIES {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Stable identifier used on the command line and in table dumps
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ones => "ones",
            Self::Twos => "twos",
            Self::Threes => "threes",
            Self::Fours => "fours",
            Self::Fives => "fives",
            Self::Sixes => "sixes",
            Self::ThreeOfAKind => "three_of_a_kind",
            Self::FourOfAKind => "four_of_a_kind",
            Self::FullHouse => "full_house",
            Self::SmallStraight => "small_straight",
            Self::LargeStraight => "large_straight",
            Self::Yahtzee => "yahtzee",
            Self::Chance => "chance",
        }
    }

    /// Human-readable label for terminal output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ones => "Ones",
            Self::Twos => "Twos",
            Self::Threes => "Threes",
            Self::Fours => "Fours",
            Self::Fives => "Fives",
            Self::Sixes => "Sixes",
            Self::ThreeOfAKind => "Three of a Kind",
            Self::FourOfAKind => "Four of a Kind",
            Self::FullHouse => "Full House",
            Self::SmallStraight => "Small Straight",
            Self::LargeStraight => "Large Straight",
            Self::Yahtzee => "Yahtzee",
            Self::Chance => "Chance",
        }
    }

    /// Face value matched by an upper-section category
    #[must_use]
    pub const fn upper_face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self as u8 + 1)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_upper(self) -> bool {
        (self as usize) < 6
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = YahtzeeError;

    /// Accepts identifiers case-insensitively, with `-` or spaces in place of `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .into_iter()
            .find(|category| category.name() == normalized)
            .ok_or_else(|| YahtzeeError::InvalidCategory(s.to_string()))
    }
}

/// A subset of the 13 categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CategorySet(u16);

impl CategorySet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << NUM_CATEGORIES) - 1);

    /// Build a set from a raw mask, rejecting bits outside the 13 categories
    #[must_use]
    pub const fn from_bits(bits: u16) -> Option<Self> {
        if bits & !Self::ALL.0 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Dense table rank (the bitmask itself)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, category: Category) -> bool {
        self.0 & (1 << category.index()) != 0
    }

    #[must_use]
    pub const fn with(self, category: Category) -> Self {
        Self(self.0 | (1 << category.index()))
    }

    #[must_use]
    pub const fn without(self, category: Category) -> Self {
        Self(self.0 & !(1 << category.index()))
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Categories in the set, in enumeration order
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL
            .into_iter()
            .filter(move |&category| self.contains(category))
    }

    /// Parse `all` or a comma-separated list of category identifiers
    ///
    /// # Errors
    /// Returns `InvalidCategory` for any identifier outside the fixed 13.
    ///
    /// # Examples
    /// ```
    /// use yahtzee_solver::core::{Category, CategorySet};
    ///
    /// let set = CategorySet::parse_list("ones, full-house,Chance").unwrap();
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(Category::FullHouse));
    /// assert_eq!(CategorySet::parse_list("all").unwrap(), CategorySet::ALL);
    /// assert!(CategorySet::parse_list("ones,sevens").is_err());
    /// ```
    pub fn parse_list(list: &str) -> Result<Self, YahtzeeError> {
        if list.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::ALL);
        }

        list.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<Category>)
            .collect()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Category::name).collect();
        f.write_str(&names.join(","))
    }
}
