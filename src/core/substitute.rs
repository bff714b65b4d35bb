//! Literal substitution passes.
//!
//! Each mapping entry is one pass over the output of the previous pass, in
//! insertion order. Matching is ordinal (byte-exact), case-sensitive and
//! non-overlapping, scanning left to right. Keys that are substrings of
//! other keys are resolved by insertion order alone: `{"a": "b", "b": "c"}`
//! turns `"a"` into `"c"`, while `{"b": "c", "a": "b"}` turns it into `"b"`.

use crate::mapping::Mapping;

/// Apply every mapping entry to `text`.
pub fn apply(text: &str, mapping: &Mapping) -> String {
    apply_counted(text, mapping).0
}

/// Apply every mapping entry and report how many replacements were made.
pub fn apply_counted(text: &str, mapping: &Mapping) -> (String, usize) {
    let mut current = text.to_string();
    let mut total = 0;

    for (from, to) in mapping.iter() {
        let (next, count) = replace_literal(&current, from, to);
        if count > 0 {
            current = next;
            total += count;
        }
    }

    (current, total)
}

/// One substitution pass. Returns the input unchanged (count 0) when `from`
/// is empty or absent.
fn replace_literal(text: &str, from: &str, to: &str) -> (String, usize) {
    if from.is_empty() || from.len() > text.len() {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for (pos, _) in text.match_indices(from) {
        out.push_str(&text[last..pos]);
        out.push_str(to);
        last = pos + from.len();
        count += 1;
    }

    if count == 0 {
        return (text.to_string(), 0);
    }

    out.push_str(&text[last..]);
    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> Mapping {
        let mut m = Mapping::new();
        for (k, v) in pairs {
            m.set(*k, *v).unwrap();
        }
        m
    }

    #[test]
    fn no_match_is_noop() {
        let m = mapping(&[("widget", "gadget"), ("Foo", "Bar")]);
        assert_eq!(apply("nothing to see here", &m), "nothing to see here");
        assert_eq!(apply_counted("", &m), (String::new(), 0));
    }

    #[test]
    fn chained_entries_apply_in_order() {
        let m = mapping(&[("a", "b"), ("b", "c")]);
        assert_eq!(apply("a", &m), "c");

        let reversed = mapping(&[("b", "c"), ("a", "b")]);
        assert_eq!(apply("a", &reversed), "b");
    }

    #[test]
    fn substring_keys_follow_insertion_order() {
        // The shorter key runs first and consumes the prefix of the longer one.
        let m = mapping(&[("Mod", "Pack"), ("ModName", "Title")]);
        assert_eq!(apply("ModName", &m), "PackName");

        let m = mapping(&[("ModName", "Title"), ("Mod", "Pack")]);
        assert_eq!(apply("ModName Mod", &m), "Title Pack");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let m = mapping(&[("widget", "gadget")]);
        assert_eq!(apply("Widget widget WIDGET", &m), "Widget gadget WIDGET");
    }

    #[test]
    fn matches_are_non_overlapping_left_to_right() {
        let m = mapping(&[("aa", "b")]);
        assert_eq!(apply_counted("aaa", &m), ("ba".to_string(), 1));
        assert_eq!(apply_counted("aaaa", &m), ("bb".to_string(), 2));
    }

    #[test]
    fn second_pass_is_idempotent_when_value_lacks_key() {
        let m = mapping(&[("old", "new")]);
        let once = apply("old/old.txt: old", &m);
        assert_eq!(once, "new/new.txt: new");
        assert_eq!(apply(&once, &m), once);
    }

    #[test]
    fn counts_every_replacement() {
        let m = mapping(&[("x", "yy"), ("yy", "z")]);
        let (out, count) = apply_counted("x-x", &m);
        assert_eq!(out, "z-z");
        assert_eq!(count, 4);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let m = mapping(&[("café", "tea")]);
        assert_eq!(apply("«café» ☕ café", &m), "«tea» ☕ tea");
    }
}
