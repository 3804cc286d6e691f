//! Best-effort parsing of raw backend completions into a fixed-size list.
//!
//! Two tiers, tried in order, each a pure function returning `Option`:
//!   1. a strict JSON array of strings
//!   2. non-empty trimmed lines
//! If neither yields enough entries we fall through to rule-based filler.

use crate::fallback::fallback_distractors;

/// Tier 1: interpret `raw` as a JSON array of strings.
fn parse_json_array(raw: &str, count: usize) -> Option<Vec<String>> {
  let items: Vec<String> = serde_json::from_str(raw.trim()).ok()?;
  if items.len() >= count {
    Some(items.into_iter().take(count).collect())
  } else {
    None
  }
}

/// Tier 2: split into non-empty trimmed lines.
fn parse_lines(raw: &str, count: usize) -> Option<Vec<String>> {
  let lines: Vec<String> = raw
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .map(str::to_string)
    .collect();
  if lines.len() >= count {
    Some(lines.into_iter().take(count).collect())
  } else {
    None
  }
}

/// Turn a raw backend reply into exactly `count` strings. Never fails.
///
/// The last resort deliberately derives filler from an empty source rather
/// than the original text, matching the upstream service's behavior.
pub fn parse_distractors(raw: &str, count: usize) -> Vec<String> {
  if let Some(items) = parse_json_array(raw, count) {
    return items;
  }
  if let Some(lines) = parse_lines(raw, count) {
    return lines;
  }
  fallback_distractors("", count)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn json_array_tier_takes_first_count() {
    assert_eq!(parse_distractors(r#"["a","b","c"]"#, 2), vec!["a", "b"]);
  }

  #[test]
  fn lines_tier_when_not_json() {
    assert_eq!(
      parse_distractors("not json\nline2\nline3", 2),
      vec!["not json", "line2"]
    );
  }

  #[test]
  fn lines_tier_skips_blank_lines_and_trims() {
    assert_eq!(
      parse_distractors("  one  \n\n\ttwo\n   \nthree", 3),
      vec!["one", "two", "three"]
    );
  }

  #[test]
  fn short_reply_degrades_to_empty_source_filler() {
    assert_eq!(parse_distractors("x", 5), vec![String::new(); 5]);
  }

  #[test]
  fn undersized_json_array_falls_through() {
    // One JSON line, still fewer entries than requested: ends in filler.
    assert_eq!(parse_distractors(r#"["a"]"#, 2), vec![String::new(); 2]);
  }

  #[test]
  fn json_array_of_non_strings_falls_to_lines() {
    assert_eq!(parse_distractors("[1, 2, 3]", 1), vec!["[1, 2, 3]"]);
  }
}
