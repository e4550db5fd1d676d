//! "Did you mean" hints for mistyped preset keys and event names

/// Edit distance (insertions, deletions, substitutions) between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != *cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Up to three candidates within `max_distance` of `query`, closest first.
///
/// Comparison ignores ASCII case; ties keep candidate order.
pub fn closest<'a>(query: &str, candidates: &[&'a str], max_distance: usize) -> Vec<&'a str> {
    let query = query.to_ascii_lowercase();
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|&c| (edit_distance(&query, &c.to_ascii_lowercase()), c))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);
    scored.into_iter().take(3).map(|(_, c)| c).collect()
}

/// Format matches as a hint line.
pub fn did_you_mean(matches: &[&str]) -> Option<String> {
    match matches {
        [] => None,
        [one] => Some(format!("Did you mean '{}'?", one)),
        [first, second] => Some(format!("Did you mean '{}' or '{}'?", first, second)),
        [init @ .., last] => {
            let quoted: Vec<String> = init.iter().map(|m| format!("'{}'", m)).collect();
            Some(format!("Did you mean {}, or '{}'?", quoted.join(", "), last))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("playful", "playful"), 0);
        assert_eq!(edit_distance("", "calm"), 4);
        assert_eq!(edit_distance("calm", ""), 4);
        assert_eq!(edit_distance("clik", "click"), 1);
        assert_eq!(edit_distance("mousedwn", "mousedown"), 1);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_closest_orders_by_distance() {
        let keys = ["playful", "calm", "minimal", "plain"];
        assert_eq!(closest("playfull", &keys, 2), ["playful"]);
        assert_eq!(closest("CALM", &keys, 2), ["calm"]);
        assert!(closest("energetic", &keys, 2).is_empty());
    }

    #[test]
    fn test_did_you_mean() {
        assert_eq!(did_you_mean(&[]), None);
        assert_eq!(did_you_mean(&["calm"]).unwrap(), "Did you mean 'calm'?");
        assert_eq!(did_you_mean(&["click", "dblclick"]).unwrap(), "Did you mean 'click' or 'dblclick'?");
        assert_eq!(
            did_you_mean(&["mouseup", "mousedown", "mouseleave"]).unwrap(),
            "Did you mean 'mouseup', 'mousedown', or 'mouseleave'?"
        );
    }
}
