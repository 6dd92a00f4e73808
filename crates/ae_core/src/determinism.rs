//! Determinism utilities: stable recency ordering for generated reports.
//!
//! This module is **I/O-free**. It provides:
//! - A total order on optional generation timestamps (missing sorts oldest)
//! - "Latest wins" selection that is independent of hash/iteration order
//!   (ties resolve to the later item in input order)
//! - A canonical in-place sort helper

use core::cmp::Ordering;

use chrono::{DateTime, Utc};

/* -------------------------------------------------------------------------- */
/*                               Stable Ordering                              */
/* -------------------------------------------------------------------------- */

/// Compare two optional timestamps; `None` is older than any timestamp.
#[inline]
pub fn cmp_recency(a: Option<&DateTime<Utc>>, b: Option<&DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Pick the most recent item. On equal timestamps the item that appears
/// later in the input wins (a re-fetched report supersedes the earlier copy).
pub fn latest_by_recency<'a, T, I, F>(items: I, stamp: F) -> Option<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<&DateTime<Utc>>,
{
    let mut best: Option<&'a T> = None;
    for it in items {
        best = match best {
            Some(b) if cmp_recency(stamp(it), stamp(b)) == Ordering::Less => Some(b),
            _ => Some(it),
        };
    }
    best
}

/* ---------------------------------- Tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> Option<DateTime<Utc>> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, 0, 0).single()
    }

    #[derive(Debug, PartialEq)]
    struct Doc(&'static str, Option<DateTime<Utc>>);

    #[test]
    fn missing_is_oldest() {
        assert_eq!(cmp_recency(None, ts(1).as_ref()), Ordering::Less);
        assert_eq!(cmp_recency(ts(1).as_ref(), None), Ordering::Greater);
        assert_eq!(cmp_recency(None, None), Ordering::Equal);
    }

    #[test]
    fn latest_wins_and_ties_go_to_later_input() {
        let docs = vec![Doc("a", ts(9)), Doc("b", ts(12)), Doc("c", None), Doc("d", ts(12))];
        let got = latest_by_recency(&docs, |d| d.1.as_ref()).unwrap();
        assert_eq!(got.0, "d");
    }

    #[test]
    fn latest_of_empty_is_none() {
        let docs: Vec<Doc> = vec![];
        assert!(latest_by_recency(&docs, |d| d.1.as_ref()).is_none());
    }
}
