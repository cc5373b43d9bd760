//! Catalog filtering.
//!
//! A [`QueryPredicate`] is the conjunction of three independent checks:
//! free-text search, genre and availability. Filtering always runs over the
//! full resolved collection and keeps input order, so predicates compose in
//! any order and dropping one restores exactly what it hid.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::models::BookRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("unknown availability filter `{0}` (expected all, available or unavailable)")]
    UnknownAvailability(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    /// Case-sensitive equality with the record's genre.
    Only(String),
}

impl GenreFilter {
    /// `"all"` means no constraint, anything else is a genre value.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            GenreFilter::All
        } else {
            GenreFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, book: &BookRecord) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Only(genre) => book.genre.as_deref() == Some(genre.as_str()),
        }
    }
}

impl fmt::Display for GenreFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenreFilter::All => f.write_str("all"),
            GenreFilter::Only(genre) => f.write_str(genre),
        }
    }
}

impl Serialize for GenreFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AvailabilityFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "available")]
    AvailableOnly,
    #[serde(rename = "unavailable")]
    UnavailableOnly,
}

impl AvailabilityFilter {
    /// Unknown availability passes only under `All`.
    pub fn matches(&self, book: &BookRecord) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::AvailableOnly => book.is_available == Some(true),
            AvailabilityFilter::UnavailableOnly => book.is_available == Some(false),
        }
    }
}

impl FromStr for AvailabilityFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AvailabilityFilter::All),
            "available" | "available-only" => Ok(AvailabilityFilter::AvailableOnly),
            "unavailable" | "unavailable-only" => Ok(AvailabilityFilter::UnavailableOnly),
            other => Err(FilterParseError::UnknownAvailability(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QueryPredicate {
    pub search_text: String,
    pub genre: GenreFilter,
    pub availability: AvailabilityFilter,
}

impl QueryPredicate {
    pub fn matches(&self, book: &BookRecord) -> bool {
        self.matches_text(book) && self.genre.matches(book) && self.availability.matches(book)
    }

    fn matches_text(&self, book: &BookRecord) -> bool {
        if self.search_text.trim().is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();

        [&book.title, &book.author, &book.genre, &book.description]
            .into_iter()
            .any(|field| {
                field
                    .as_deref()
                    .is_some_and(|value| value.to_lowercase().contains(&needle))
            })
    }
}

/// Records matching `predicate`, in input order.
pub fn filter(records: &[BookRecord], predicate: &QueryPredicate) -> Vec<BookRecord> {
    records
        .iter()
        .filter(|book| predicate.matches(book))
        .cloned()
        .collect()
}

/// Distinct non-empty genres, in order of first appearance.
pub fn genre_vocabulary(records: &[BookRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|b| b.genre.as_deref())
        .filter(|g| !g.is_empty())
        .filter(|g| seen.insert(*g))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::book;

    fn shelf() -> Vec<BookRecord> {
        let mut gatsby = book("1", "The Great Gatsby", "Fiction", Some(true));
        gatsby.author = Some("F. Scott Fitzgerald".into());
        gatsby.description = Some("Jazz age excess".into());

        let mut cosmos = book("2", "Cosmos", "Science", Some(false));
        cosmos.author = Some("Carl Sagan".into());

        let mut untitled = BookRecord::new("3");
        untitled.description = Some("A fiction anthology".into());

        vec![
            gatsby,
            cosmos,
            untitled,
            book("4", "Emma", "Fiction", None),
            book("5", "Dune", "", Some(true)),
            book("6", "Brief History of Time", "Science", Some(true)),
        ]
    }

    fn ids(books: &[BookRecord]) -> Vec<&str> {
        books.iter().map(|b| b.id.as_str()).collect()
    }

    fn predicates() -> Vec<QueryPredicate> {
        let texts = ["", "  ", "fiction", "GATSBY", "zzz", "e"];
        let genres = [
            GenreFilter::All,
            GenreFilter::Only("Fiction".into()),
            GenreFilter::Only("Science".into()),
            GenreFilter::Only("fiction".into()),
        ];
        let avail = [
            AvailabilityFilter::All,
            AvailabilityFilter::AvailableOnly,
            AvailabilityFilter::UnavailableOnly,
        ];

        let mut out = Vec::new();
        for t in texts {
            for g in &genres {
                for a in avail {
                    out.push(QueryPredicate {
                        search_text: t.to_string(),
                        genre: g.clone(),
                        availability: a,
                    });
                }
            }
        }
        out
    }

    #[test]
    fn default_predicate_is_identity() {
        let books = shelf();
        assert_eq!(filter(&books, &QueryPredicate::default()), books);
    }

    #[test]
    fn blank_search_is_ignored() {
        let books = shelf();
        let p = QueryPredicate {
            search_text: "   ".into(),
            ..Default::default()
        };
        assert_eq!(filter(&books, &p), books);
    }

    #[test]
    fn search_is_case_insensitive_across_four_fields() {
        let books = shelf();
        let search = |text: &str| {
            let p = QueryPredicate {
                search_text: text.into(),
                ..Default::default()
            };
            ids(&filter(&books, &p)).join(",")
        };

        assert_eq!(search("GATSBY"), "1");
        assert_eq!(search("sagan"), "2");
        assert_eq!(search("fiction"), "1,3,4");
        assert_eq!(search("jazz"), "1");
        assert_eq!(search("nothing like this"), "");
    }

    #[test]
    fn isbn_is_not_searched() {
        let mut b = book("1", "Dune", "Sci-Fi", None);
        b.isbn = Some("978-0441013593".into());
        let p = QueryPredicate {
            search_text: "0441".into(),
            ..Default::default()
        };
        assert!(filter(&[b], &p).is_empty());
    }

    #[test]
    fn genre_filter_is_exact_and_case_sensitive() {
        let books = shelf();
        let only = |g: &str| QueryPredicate {
            genre: GenreFilter::Only(g.into()),
            ..Default::default()
        };

        assert_eq!(ids(&filter(&books, &only("Fiction"))), vec!["1", "4"]);
        assert!(filter(&books, &only("fiction")).is_empty());
        assert!(filter(&books, &only("Fict")).is_empty());
    }

    #[test]
    fn unknown_availability_only_passes_all() {
        let unknown = book("x", "Emma", "Fiction", None);
        assert!(AvailabilityFilter::All.matches(&unknown));
        assert!(!AvailabilityFilter::AvailableOnly.matches(&unknown));
        assert!(!AvailabilityFilter::UnavailableOnly.matches(&unknown));
    }

    #[test]
    fn availability_filters_split_known_values() {
        let books = shelf();
        let by = |a| QueryPredicate {
            availability: a,
            ..Default::default()
        };
        assert_eq!(
            ids(&filter(&books, &by(AvailabilityFilter::AvailableOnly))),
            vec!["1", "5", "6"]
        );
        assert_eq!(
            ids(&filter(&books, &by(AvailabilityFilter::UnavailableOnly))),
            vec!["2"]
        );
    }

    #[test]
    fn output_keeps_input_order() {
        let books = shelf();
        for p in predicates() {
            let out = filter(&books, &p);
            let positions: Vec<usize> = out
                .iter()
                .map(|o| books.iter().position(|b| b.id == o.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{p:?}");
        }
    }

    #[test]
    fn adding_constraints_never_readmits() {
        let books = shelf();
        let all = predicates();
        for base in &all {
            let base_out = filter(&books, base);
            // tighten each sub-predicate that is still unconstrained
            let mut tighter = Vec::new();
            if base.genre == GenreFilter::All {
                tighter.push(QueryPredicate {
                    genre: GenreFilter::Only("Fiction".into()),
                    ..base.clone()
                });
            }
            if base.availability == AvailabilityFilter::All {
                tighter.push(QueryPredicate {
                    availability: AvailabilityFilter::AvailableOnly,
                    ..base.clone()
                });
            }
            if base.search_text.trim().is_empty() {
                for text in ["fiction", "e", "zzz"] {
                    tighter.push(QueryPredicate {
                        search_text: text.into(),
                        ..base.clone()
                    });
                }
            }
            for t in tighter {
                for b in filter(&books, &t) {
                    assert!(base_out.contains(&b), "{t:?} re-admitted {}", b.id);
                }
            }
        }
    }

    #[test]
    fn filter_order_does_not_matter() {
        let books = shelf();
        let genre_first = filter(
            &filter(
                &books,
                &QueryPredicate {
                    genre: GenreFilter::Only("Science".into()),
                    ..Default::default()
                },
            ),
            &QueryPredicate {
                availability: AvailabilityFilter::AvailableOnly,
                ..Default::default()
            },
        );
        let combined = filter(
            &books,
            &QueryPredicate {
                genre: GenreFilter::Only("Science".into()),
                availability: AvailabilityFilter::AvailableOnly,
                ..Default::default()
            },
        );
        assert_eq!(genre_first, combined);
        assert_eq!(ids(&combined), vec!["6"]);
    }

    #[test]
    fn vocabulary_is_distinct_non_empty_first_seen() {
        assert_eq!(genre_vocabulary(&shelf()), vec!["Fiction", "Science"]);
        assert!(genre_vocabulary(&[]).is_empty());
    }

    #[test]
    fn parse_filters() {
        assert_eq!(GenreFilter::parse("all"), GenreFilter::All);
        assert_eq!(GenreFilter::parse("Poetry"), GenreFilter::Only("Poetry".into()));
        assert_eq!("available".parse::<AvailabilityFilter>(), Ok(AvailabilityFilter::AvailableOnly));
        assert_eq!(
            "unavailable-only".parse::<AvailabilityFilter>(),
            Ok(AvailabilityFilter::UnavailableOnly)
        );
        assert_eq!(
            "checked-out".parse::<AvailabilityFilter>(),
            Err(FilterParseError::UnknownAvailability("checked-out".into()))
        );
    }

    #[test]
    fn predicate_serializes_with_wire_names() {
        let p = QueryPredicate {
            search_text: "dune".into(),
            genre: GenreFilter::Only("Sci-Fi".into()),
            availability: AvailabilityFilter::UnavailableOnly,
        };
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            serde_json::json!({
                "search_text": "dune",
                "genre": "Sci-Fi",
                "availability": "unavailable"
            })
        );
    }
}
