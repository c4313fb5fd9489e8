//! Frequency table type.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

/// Occurrence counts keyed by final, normalized token.
///
/// Every key present has a count of at least 1. Insertion order is not
/// tracked; only the final count per key matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub(crate) counts: FxHashMap<String, u64>,
}

impl FrequencyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `token`.
    ///
    /// Only allocates the first time a token is seen.
    #[inline]
    pub fn add(&mut self, token: Cow<'_, str>) {
        if let Some(count) = self.counts.get_mut(token.as_ref()) {
            *count += 1;
        } else {
            self.counts.insert(token.into_owned(), 1);
        }
    }

    /// Count for `token`, or `0` if it never occurred.
    #[inline]
    #[must_use]
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no token was recorded.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(token, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Sum of all counts, i.e. the number of tokens that survived normalization.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Highest count in the table, `0` when empty.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for token in iter {
            table.add(Cow::Borrowed(token));
        }
        table
    }
}

impl<'a> Extend<Cow<'a, str>> for FrequencyTable {
    fn extend<I: IntoIterator<Item = Cow<'a, str>>>(&mut self, iter: I) {
        for token in iter {
            self.add(token);
        }
    }
}
