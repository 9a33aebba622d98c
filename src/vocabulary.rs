use std::collections::HashMap;

use crate::token::LexicalCategory;

/// The lexical dictionary: an ordered list of words and phrases per category.
///
/// Entry order is load-bearing. The grammar turns every entry into a
/// single-terminal rule in this order, and rule order decides which
/// derivation the engine finds first.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
  entries: HashMap<LexicalCategory, Vec<String>>,
}

impl Vocabulary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends words to a category's list, preserving order across calls.
  pub fn define(&mut self, category: LexicalCategory, words: &[&str]) {
    self
      .entries
      .entry(category)
      .or_default()
      .extend(words.iter().map(|w| w.to_string()));
  }

  /// The entries for a category, in definition order. Empty if undefined.
  pub fn entries(&self, category: LexicalCategory) -> &[String] {
    self.entries.get(&category).map_or(&[], Vec::as_slice)
  }

  /// Case-insensitive membership test.
  pub fn contains(&self, category: LexicalCategory, word: &str) -> bool {
    self
      .entries(category)
      .iter()
      .any(|w| w.eq_ignore_ascii_case(word))
  }

  /// The fixed story vocabulary.
  pub fn story() -> Self {
    use LexicalCategory::*;

    let mut vocabulary = Self::new();
    vocabulary.define(
      Determiner,
      &[
        "The", "A", "An", "My", "Her", "His", "a", "the", "an", "my", "her", "his",
      ],
    );
    vocabulary.define(
      Adjective,
      &["brave", "old", "young", "rusty", "enchanted", "mighty", "dark"],
    );
    vocabulary.define(
      Noun,
      &[
        "hero", "wizard", "knight", "dragon", "princess", "treasure", "cave", "sword", "castle",
        "villager", "horse", "forest",
      ],
    );
    vocabulary.define(
      Verb,
      &[
        "fights",
        "searches",
        "searches for",
        "rescues",
        "discovers",
        "rides",
        "finds",
        "opens",
        "calls",
        "holds",
        "protects",
      ],
    );
    vocabulary.define(
      Preposition,
      &["in", "on", "at", "under", "inside", "near", "above", "beside"],
    );
    vocabulary.define(RelativeClause, &["who"]);
    vocabulary.define(Adverbial, &["quickly", "silently", "carefully"]);
    vocabulary.define(
      Location,
      &[
        "castle",
        "mountain",
        "river",
        "cave",
        "forest",
        "at the castle",
        "in the dark forest",
        "near the river",
      ],
    );
    vocabulary.define(
      Condition,
      &[
        "brave",
        "clever",
        "unlocked",
        "sleeps",
        "while the moon rises",
        "while the dragon sleeps",
      ],
    );
    vocabulary.define(Conjunction, &["and", "but", "then", "while"]);
    vocabulary.define(Punctuation, &[".", ",", "!", "?"]);
    vocabulary
  }
}

#[test]
fn test_contains_is_case_insensitive() {
  let vocabulary = Vocabulary::story();
  assert!(vocabulary.contains(LexicalCategory::Noun, "hero"));
  assert!(vocabulary.contains(LexicalCategory::Noun, "HERO"));
  assert!(vocabulary.contains(LexicalCategory::Determiner, "THE"));
  assert!(!vocabulary.contains(LexicalCategory::Noun, "moon"));
}

#[test]
fn test_entries_preserve_definition_order() {
  let vocabulary = Vocabulary::story();
  let determiners = vocabulary.entries(LexicalCategory::Determiner);
  assert_eq!(determiners[0], "The");
  assert_eq!(determiners[1], "A");

  let mut extended = Vocabulary::new();
  extended.define(LexicalCategory::Noun, &["hero"]);
  extended.define(LexicalCategory::Noun, &["dragon"]);
  assert_eq!(extended.entries(LexicalCategory::Noun), ["hero", "dragon"]);
}

#[test]
fn test_undefined_category_is_empty() {
  let vocabulary = Vocabulary::new();
  assert!(vocabulary.entries(LexicalCategory::Noun).is_empty());
  assert!(!vocabulary.contains(LexicalCategory::Noun, "hero"));
}
