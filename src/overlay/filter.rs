use crate::model::CellValue;

use super::OverlayKind;

/// Derive the displayed list from the raw candidates. Always recomputed from
/// scratch; candidate order is preserved.
pub fn apply(kind: OverlayKind, candidates: &[CellValue], text: &str) -> Vec<CellValue> {
    match kind {
        OverlayKind::Dropdown => dropdown(candidates, text),
        OverlayKind::Autocomplete => autocomplete(candidates, text),
    }
}

/// Case-insensitive substring match. An empty filter shows everything.
pub fn dropdown(candidates: &[CellValue], filter_text: &str) -> Vec<CellValue> {
    if filter_text.is_empty() {
        return candidates.to_vec();
    }
    let needle = filter_text.to_lowercase();
    candidates
        .iter()
        .filter(|c| !c.is_blank() && c.folded().contains(&needle))
        .cloned()
        .collect()
}

/// Case-insensitive prefix match that leaves out anything identical to what
/// was typed. Blank input suggests nothing.
pub fn autocomplete(candidates: &[CellValue], text: &str) -> Vec<CellValue> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let typed = text.to_lowercase();
    candidates
        .iter()
        .filter(|c| {
            let folded = c.folded();
            folded.starts_with(&typed) && folded != typed
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list(items: &[&str]) -> Vec<CellValue> {
        items.iter().map(|s| CellValue::text(*s)).collect()
    }

    #[test]
    fn dropdown_empty_filter_is_identity() {
        let candidates = list(&["Red", "Green", "Blue"]);
        assert_eq!(dropdown(&candidates, ""), candidates);
    }

    #[test]
    fn dropdown_matches_substrings_ignoring_case() {
        let candidates = list(&["Red", "Green", "Blue", "Ochre"]);
        assert_eq!(dropdown(&candidates, "RE"), list(&["Red", "Green", "Ochre"]));
        assert_eq!(dropdown(&candidates, "lu"), list(&["Blue"]));
        assert!(dropdown(&candidates, "purple").is_empty());
    }

    #[test]
    fn dropdown_matches_numbers_by_their_text() {
        let candidates = vec![
            CellValue::Number(10.0),
            CellValue::Number(2.5),
            CellValue::text("100 units"),
        ];
        assert_eq!(
            dropdown(&candidates, "10"),
            vec![CellValue::Number(10.0), CellValue::text("100 units")]
        );
        assert_eq!(dropdown(&candidates, ".5"), vec![CellValue::Number(2.5)]);
    }

    #[test]
    fn dropdown_filter_holds_for_every_prefix_of_a_word() {
        let candidates = list(&["alpha", "Alphabet", "beta", "gamma", "ALP"]);
        let word = "alphab";
        for end in 0..=word.len() {
            let t = &word[..end];
            let expected: Vec<CellValue> = candidates
                .iter()
                .filter(|c| c.folded().contains(&t.to_lowercase()))
                .cloned()
                .collect();
            assert_eq!(dropdown(&candidates, t), expected, "filter {:?}", t);
        }
    }

    #[test]
    fn autocomplete_prefix_match_excludes_exact() {
        let candidates = list(&["Apple", "Apricot", "Banana"]);
        assert_eq!(autocomplete(&candidates, "Ap"), list(&["Apple", "Apricot"]));
        assert_eq!(autocomplete(&candidates, "ap"), list(&["Apple", "Apricot"]));
        assert!(autocomplete(&candidates, "Apple").is_empty());
        assert!(autocomplete(&candidates, "APPLE").is_empty());
        assert_eq!(autocomplete(&candidates, "b"), list(&["Banana"]));
    }

    #[test]
    fn autocomplete_blank_input_suggests_nothing() {
        let candidates = list(&["Apple"]);
        assert!(autocomplete(&candidates, "").is_empty());
        assert!(autocomplete(&candidates, "   ").is_empty());
    }

    #[test]
    fn autocomplete_is_not_substring() {
        let candidates = list(&["Pineapple"]);
        assert!(autocomplete(&candidates, "apple").is_empty());
    }
}
