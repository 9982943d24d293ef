//! Edit distance and "did you mean" suggestion sets.

use smallvec::SmallVec;

/// Classic dynamic-programming Levenshtein distance; insertion, deletion
/// and substitution each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

/// All candidates tied at the minimum observed distance, provided that
/// minimum is within `max_distance`. Ties are kept deliberately: the
/// diagnostic lists every equally-close name, not just the first found.
pub fn closest_matches<'c>(
    name: &str,
    candidates: impl IntoIterator<Item = &'c str>,
    max_distance: usize,
) -> SmallVec<[String; 4]> {
    let mut scored: Vec<(usize, &str)> = candidates
        .into_iter()
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    match scored.first() {
        Some(&(best, _)) if best <= max_distance => scored
            .iter()
            .take_while(|(distance, _)| *distance == best)
            .map(|(_, candidate)| (*candidate).to_string())
            .collect(),
        _ => SmallVec::new(),
    }
}

/// `"a"`, `"a" or "b"`, `"a", "b" or "c"`.
pub fn format_suggestion_list(suggestions: &[String]) -> String {
    let quoted: Vec<String> = suggestions.iter().map(|s| format!("\"{}\"", s)).collect();
    match quoted.len() {
        0 => String::new(),
        1 => quoted.into_iter().next().unwrap(),
        _ => {
            let (last, rest) = quoted.split_last().unwrap();
            format!("{} or {}", rest.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basics() {
        assert_eq!(levenshtein("bar", "bar"), 0);
        assert_eq!(levenshtein("baz", "bar"), 1);
        assert_eq!(levenshtein("foo", "bar"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_keeps_all_ties_at_minimum() {
        let matches = closest_matches("baz", ["bar", "bat", "qux"], 2);
        assert_eq!(matches.as_slice(), ["bar", "bat"]);
    }

    #[test]
    fn test_excludes_names_past_max_distance() {
        let matches = closest_matches("foo", ["bar"], 2);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_suggestion_formatting() {
        assert_eq!(format_suggestion_list(&["a".into()]), "\"a\"");
        assert_eq!(format_suggestion_list(&["a".into(), "b".into()]), "\"a\" or \"b\"");
        assert_eq!(
            format_suggestion_list(&["a".into(), "b".into(), "c".into()]),
            "\"a\", \"b\" or \"c\""
        );
    }
}
