//! Tests for matching

use super::*;

#[test]
fn test_empty_needle_never_matches() {
    assert_eq!(find_match("format", ""), None);
}

#[test]
fn test_finds_first_occurrence() {
    assert_eq!(find_match("commander", "m"), Some(MatchRange::new(2, 3)));
}

#[test]
fn test_case_insensitive() {
    assert_eq!(find_match("Set=7ED", "7ed"), Some(MatchRange::new(4, 7)));
    assert_eq!(find_match("modern", "MOD"), Some(MatchRange::new(0, 3)));
}

#[test]
fn test_no_match_returns_none() {
    assert_eq!(find_match("legacy", "xyz"), None);
}

#[test]
fn test_needle_longer_than_haystack() {
    assert_eq!(find_match("mv", "manavalue"), None);
}

#[test]
fn test_offsets_count_chars_not_bytes() {
    // "é" is two bytes in UTF-8 but one char
    let range = find_match("name:Séance", "ance").unwrap();
    assert_eq!(range, MatchRange::new(7, 11));
}

#[test]
fn test_split_highlight_parts() {
    let range = MatchRange::new(2, 5);
    assert_eq!(range.split("format"), ("fo", "rma", "t"));
}

#[test]
fn test_split_multibyte() {
    let text = "name:Séance";
    let range = find_match(text, "séa").unwrap();
    assert_eq!(range.split(text), ("name:", "Séa", "nce"));
}

#[test]
fn test_split_clamps_out_of_bounds() {
    let range = MatchRange::new(3, 40);
    assert_eq!(range.split("mv>=4"), ("mv>", "=4", ""));
}

#[test]
fn test_full_range() {
    let range = MatchRange::full("manavalue");
    assert_eq!(range, MatchRange::new(0, 9));
    assert_eq!(range.len(), 9);
    assert!(!range.is_empty());
}

#[test]
fn test_eq_ignore_case() {
    assert!(eq_ignore_case("MV", "mv"));
    assert!(eq_ignore_case("ÉDITION", "édition"));
    assert!(!eq_ignore_case("mv", "mvx"));
}

#[test]
fn test_display() {
    assert_eq!(MatchRange::new(1, 4).to_string(), "1..4");
}
