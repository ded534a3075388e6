//! Substring search and ordering over notes.

use std::cmp::Ordering;

use crate::entity::Note;

/// A note that matched a query, with its relevance score.
#[derive(Debug, Clone)]
pub struct SearchHit<'a> {
    pub note: &'a Note,
    /// Non-overlapping, case-insensitive occurrences in title + content.
    pub occurrences: usize,
}

/// Newest first by `updated_at`, then by id descending so notes saved in
/// the same second keep creation order.
pub fn recent_first(a: &Note, b: &Note) -> Ordering {
    b.updated_at
        .cmp(&a.updated_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort notes newest first in place.
pub fn sort_recent(notes: &mut [&Note]) {
    notes.sort_by(|a, b| recent_first(a, b));
}

/// Count non-overlapping occurrences of `needle` in `haystack`, ignoring case.
///
/// An empty needle matches nothing.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.to_lowercase().matches(&needle.to_lowercase()).count()
}

/// Rank notes against a query.
///
/// A blank query returns every note newest first. Otherwise only notes whose
/// title or content contains the query are kept, most occurrences first,
/// ties broken newest first.
pub fn rank<'a, I>(notes: I, query: &str) -> Vec<SearchHit<'a>>
where
    I: IntoIterator<Item = &'a Note>,
{
    if query.trim().is_empty() {
        let mut all: Vec<&Note> = notes.into_iter().collect();
        sort_recent(&mut all);
        return all
            .into_iter()
            .map(|note| SearchHit {
                note,
                occurrences: 0,
            })
            .collect();
    }

    let needle = query.to_lowercase();
    let mut hits: Vec<SearchHit<'a>> = notes
        .into_iter()
        .filter_map(|note| {
            let occurrences =
                count_occurrences(&note.title, &needle) + count_occurrences(&note.content, &needle);
            (occurrences > 0).then_some(SearchHit { note, occurrences })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| recent_first(a.note, b.note))
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, title: &str, content: &str, updated_at: &str) -> Note {
        let mut n = Note::new(content);
        n.id = id.to_string();
        n.title = title.to_string();
        n.updated_at = updated_at.to_string();
        n
    }

    #[test]
    fn test_count_occurrences_case_insensitive() {
        assert_eq!(count_occurrences("Rust rust RUST", "rust"), 3);
        assert_eq!(count_occurrences("abc", "RUST"), 0);
        assert_eq!(count_occurrences("anything", ""), 0);
    }

    #[test]
    fn test_count_occurrences_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
    }

    #[test]
    fn test_rank_by_occurrences() {
        let notes = vec![
            note("note_1", "Groceries", "milk", "2024-01-03 00:00:00"),
            note("note_2", "Milk run", "milk, more milk", "2024-01-01 00:00:00"),
            note("note_3", "Other", "nothing here", "2024-01-05 00:00:00"),
        ];

        let hits = rank(&notes, "MILK");
        let ids: Vec<&str> = hits.iter().map(|h| h.note.id.as_str()).collect();
        assert_eq!(ids, vec!["note_2", "note_1"]);
        assert_eq!(hits[0].occurrences, 3);
        assert_eq!(hits[1].occurrences, 1);
    }

    #[test]
    fn test_rank_ties_are_newest_first() {
        let notes = vec![
            note("note_1", "a", "todo", "2024-01-01 00:00:00"),
            note("note_2", "b", "todo", "2024-03-01 00:00:00"),
        ];
        let hits = rank(&notes, "todo");
        assert_eq!(hits[0].note.id, "note_2");
    }

    #[test]
    fn test_blank_query_returns_all_recent_first() {
        let notes = vec![
            note("note_1", "a", "x", "2024-01-01 00:00:00"),
            note("note_2", "b", "y", "2024-06-01 00:00:00"),
            note("note_3", "c", "z", "2024-03-01 00:00:00"),
        ];
        let hits = rank(&notes, "   ");
        let ids: Vec<&str> = hits.iter().map(|h| h.note.id.as_str()).collect();
        assert_eq!(ids, vec!["note_2", "note_3", "note_1"]);
    }

    #[test]
    fn test_same_second_falls_back_to_id() {
        let a = note("note_100", "a", "", "2024-01-01 00:00:00");
        let b = note("note_200", "b", "", "2024-01-01 00:00:00");
        let mut list = vec![&a, &b];
        sort_recent(&mut list);
        assert_eq!(list[0].id, "note_200");
    }
}
