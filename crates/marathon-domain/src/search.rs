//! Participant search: free-text tokenization, optional equality filters and
//! relevance ranking.
//!
//! The store applies these rules as a SQL predicate; the same rules are kept
//! here as plain functions so ranks can be reported per row and so in-memory
//! stores behave identically.

/// Sentinel meaning "do not filter on this category".
pub const ALL: &str = "all";

/// A whitespace-tokenized free-text search.
///
/// Every token must match at least one searchable field (AND across tokens,
/// OR across fields), case-insensitively, as a substring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerms {
    raw: String,
    tokens: Vec<String>,
}

impl SearchTerms {
    /// Returns `None` for a missing or blank search string.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_owned(),
            tokens: raw.split_whitespace().map(str::to_owned).collect(),
        })
    }

    /// The trimmed search string, used whole for ranking.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, fields: &SearchFields<'_>) -> bool {
        self.tokens.iter().all(|token| {
            let needle = token.to_lowercase();
            fields.haystacks().any(|field| contains_ci(field, &needle))
        })
    }

    pub fn relevance(&self, fields: &SearchFields<'_>) -> Relevance {
        let prefix = self.raw.to_lowercase();
        match fields.bib_num {
            Some(bib) if bib == self.raw => Relevance::ExactBib,
            Some(bib) if bib.to_lowercase().starts_with(&prefix) => Relevance::BibPrefix,
            _ if fields.first_name.to_lowercase().starts_with(&prefix)
                || fields.last_name.to_lowercase().starts_with(&prefix) =>
            {
                Relevance::NamePrefix
            }
            _ => Relevance::Other,
        }
    }
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Borrowed view of the participant fields free-text search looks at.
#[derive(Debug, Clone, Copy)]
pub struct SearchFields<'a> {
    pub id: &'a str,
    pub bib_num: Option<&'a str>,
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub last_name: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

impl<'a> SearchFields<'a> {
    fn haystacks(&self) -> impl Iterator<Item = &'a str> {
        [
            Some(self.id),
            self.bib_num,
            Some(self.first_name),
            self.middle_name,
            Some(self.last_name),
            Some(self.email),
            Some(self.phone_number),
        ]
        .into_iter()
        .flatten()
    }
}

/// Search rank; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relevance {
    ExactBib = 1,
    BibPrefix = 2,
    NamePrefix = 3,
    Other = 4,
}

impl Relevance {
    pub fn rank(self) -> i32 {
        self as i32
    }
}

/// Optional filters for the admin participant listing.
///
/// `None` never restricts the result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantFilter {
    pub search: Option<SearchTerms>,
    pub distance: Option<String>,
    pub tshirt_size: Option<String>,
    pub is_bib_given: Option<bool>,
    pub is_tshirt_given: Option<bool>,
}

impl ParticipantFilter {
    pub fn matches(&self, fields: &SearchFields<'_>, row: &FilterFields<'_>) -> bool {
        if let Some(terms) = &self.search {
            if !terms.matches(fields) {
                return false;
            }
        }
        if let Some(distance) = &self.distance {
            if row.distance != distance {
                return false;
            }
        }
        if let Some(size) = &self.tshirt_size {
            if row.tshirt_size != size {
                return false;
            }
        }
        if let Some(flag) = self.is_bib_given {
            if row.is_bib_given != flag {
                return false;
            }
        }
        if let Some(flag) = self.is_tshirt_given {
            if row.is_tshirt_given != flag {
                return false;
            }
        }
        true
    }
}

/// Borrowed view of the participant fields the equality filters look at.
#[derive(Debug, Clone, Copy)]
pub struct FilterFields<'a> {
    pub distance: &'a str,
    pub tshirt_size: &'a str,
    pub is_bib_given: bool,
    pub is_tshirt_given: bool,
}

/// Category filter value: blank or the `all` sentinel means no filter.
pub fn category(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") | Some(ALL) => None,
        Some(v) => Some(v.to_owned()),
    }
}

/// Boolean filter value: absent or blank means no filter, `true` means true,
/// anything else means false.
pub fn flag(value: Option<&str>) -> Option<bool> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(v) => Some(v == "true"),
    }
}
