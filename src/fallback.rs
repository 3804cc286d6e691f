//! Deterministic rule-based distractor generation.
//!
//! Used when no backend credential is configured and whenever a backend call
//! fails. Pure substring substitution over the source text: offline, total,
//! and identical output for identical input.

/// Primary substitutions, applied in order. Each contributes one candidate
/// when its trigger substring is present (case-insensitive check; the
/// replacement itself is a literal, case-sensitive substitution).
const PRIMARY_SUBS: &[(&str, &str)] = &[
  ("sunlight", "moonlight"),
  ("convert", "absorb"),
  ("glucose", "carbon dioxide"),
];

/// Secondary substitutions used to pad the list, indexed by current length
/// (the last entry repeats once the list is longer than the table).
const SECONDARY_SUBS: &[(&str, &str)] = &[
  ("water", "air"),
  ("oxygen", "nitrogen"),
  ("plants", "animals"),
];

/// Produce exactly `count` distractor variants of `source_text`.
///
/// When a padding trigger is absent the text is appended unchanged, so
/// duplicate entries are possible and acceptable.
pub fn fallback_distractors(source_text: &str, count: usize) -> Vec<String> {
  let lower = source_text.to_lowercase();
  let mut out: Vec<String> = Vec::with_capacity(count);

  for (trigger, replacement) in PRIMARY_SUBS {
    if lower.contains(trigger) {
      out.push(source_text.replace(trigger, replacement));
    }
  }

  while out.len() < count {
    let idx = out.len().min(SECONDARY_SUBS.len() - 1);
    let (trigger, replacement) = SECONDARY_SUBS[idx];
    out.push(source_text.replace(trigger, replacement));
  }

  out.truncate(count);
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  const PHOTOSYNTHESIS: &str = "Plants absorb sunlight and convert it, releasing glucose";

  #[test]
  fn one_substitution_per_applicable_trigger_in_order() {
    let out = fallback_distractors(PHOTOSYNTHESIS, 3);
    assert_eq!(
      out,
      vec![
        "Plants absorb moonlight and convert it, releasing glucose",
        "Plants absorb sunlight and absorb it, releasing glucose",
        "Plants absorb sunlight and convert it, releasing carbon dioxide",
      ]
    );
  }

  #[test]
  fn deterministic_for_identical_input() {
    assert_eq!(
      fallback_distractors(PHOTOSYNTHESIS, 3),
      fallback_distractors(PHOTOSYNTHESIS, 3)
    );
  }

  #[test]
  fn pads_to_count_when_no_trigger_matches() {
    let out = fallback_distractors("no trigger words here", 2);
    assert_eq!(out, vec!["no trigger words here", "no trigger words here"]);
  }

  #[test]
  fn truncates_when_triggers_over_produce() {
    let out = fallback_distractors(PHOTOSYNTHESIS, 2);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], "Plants absorb moonlight and convert it, releasing glucose");
  }

  #[test]
  fn padding_uses_secondary_list_then_repeats_verbatim() {
    let out = fallback_distractors("fish need water and oxygen to live", 4);
    assert_eq!(
      out,
      vec![
        // No primary trigger matches, so everything comes from padding.
        "fish need air and oxygen to live",
        "fish need water and nitrogen to live",
        // "plants" is absent: appended unchanged, twice.
        "fish need water and oxygen to live",
        "fish need water and oxygen to live",
      ]
    );
  }

  #[test]
  fn empty_source_yields_empty_filler() {
    assert_eq!(fallback_distractors("", 3), vec![String::new(); 3]);
  }

  #[test]
  fn trigger_check_is_case_insensitive_but_replacement_is_literal() {
    // "Sunlight" matches the trigger case-insensitively, but the literal
    // replacement finds no lowercase "sunlight" and leaves the text as is.
    let out = fallback_distractors("Sunlight feeds the garden", 1);
    assert_eq!(out, vec!["Sunlight feeds the garden"]);
  }
}
