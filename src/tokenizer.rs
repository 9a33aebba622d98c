use regex::Regex;

use crate::token::{LexicalCategory, Token};
use crate::vocabulary::Vocabulary;

/// Punctuation marks that always become standalone tokens.
pub const PUNCTUATION_MARKS: [char; 4] = ['.', ',', '!', '?'];

/// Categories whose vocabulary may contain multi-word phrases, in the order
/// the scanner tries them. Order matters when phrases overlap across
/// categories; within one category the longest match wins.
const PHRASAL_CATEGORIES: [LexicalCategory; 4] = [
  LexicalCategory::Location,
  LexicalCategory::Adverbial,
  LexicalCategory::Condition,
  LexicalCategory::Verb,
];

/// Single-word classification priority. A word belonging to several lists is
/// tagged with the first category that claims it.
const WORD_CATEGORIES: [LexicalCategory; 10] = [
  LexicalCategory::Determiner,
  LexicalCategory::Adjective,
  LexicalCategory::Noun,
  LexicalCategory::Verb,
  LexicalCategory::Preposition,
  LexicalCategory::Adverbial,
  LexicalCategory::Location,
  LexicalCategory::Condition,
  LexicalCategory::RelativeClause,
  LexicalCategory::Conjunction,
];

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

/// Splits raw text into word, phrase and punctuation tokens against a
/// vocabulary. Tokenization is total: a word no list claims comes back
/// tagged [`LexicalCategory::Unknown`].
pub struct Tokenizer<'a> {
  vocabulary: &'a Vocabulary,
}

impl<'a> Tokenizer<'a> {
  pub fn new(vocabulary: &'a Vocabulary) -> Self {
    Self { vocabulary }
  }

  /// Scans `input` left to right. At each position: punctuation marks split
  /// off as their own tokens; multi-word phrases are matched longest-first
  /// before any single-word classification; everything else is a single word
  /// classified by category priority.
  pub fn tokenize(&self, input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
      let head = rest.chars().next().unwrap();
      if PUNCTUATION_MARKS.contains(&head) {
        tokens.push(Token::new(head, LexicalCategory::Punctuation));
        rest = rest[head.len_utf8()..].trim_start();
        continue;
      }

      if let Some((len, category)) = self.match_phrase(rest) {
        tokens.push(Token::new(&rest[..len], category));
        rest = rest[len..].trim_start();
        continue;
      }

      let word = next_word(rest);
      tokens.push(Token::new(word, self.classify(word)));
      rest = rest[word.len()..].trim_start();
    }

    tokens
  }

  /// Looks for a multi-word vocabulary phrase at the head of `rest`,
  /// returning its byte length and category. Only entries containing
  /// whitespace participate; bare words go through `classify` instead.
  fn match_phrase(&self, rest: &str) -> Option<(usize, LexicalCategory)> {
    for category in PHRASAL_CATEGORIES {
      let best = self
        .vocabulary
        .entries(category)
        .iter()
        .filter(|phrase| phrase.contains(' ') && starts_with_phrase(rest, phrase))
        .map(|phrase| phrase.len())
        .max();
      if let Some(len) = best {
        return Some((len, category));
      }
    }
    None
  }

  fn classify(&self, word: &str) -> LexicalCategory {
    WORD_CATEGORIES
      .iter()
      .copied()
      .find(|&category| self.vocabulary.contains(category, word))
      .unwrap_or(LexicalCategory::Unknown)
  }
}

/// Case-insensitive prefix match that must end at a word boundary:
/// end of input, whitespace, or a punctuation mark.
fn starts_with_phrase(rest: &str, phrase: &str) -> bool {
  if rest.len() < phrase.len() || !rest.is_char_boundary(phrase.len()) {
    return false;
  }
  let (head, tail) = rest.split_at(phrase.len());
  head.eq_ignore_ascii_case(phrase)
    && tail
      .chars()
      .next()
      .is_none_or(|c| c.is_whitespace() || PUNCTUATION_MARKS.contains(&c))
}

/// The next single word: everything up to whitespace or a punctuation mark.
fn next_word(rest: &str) -> &str {
  regex_static!(WORD, r"[^\s.,!?]+");
  WORD
    .find(rest)
    .map(|m| m.as_str())
    .expect("caller ensures rest starts with a word character")
}

#[cfg(test)]
fn story_tokens(input: &str) -> Vec<Token> {
  let vocabulary = Vocabulary::story();
  Tokenizer::new(&vocabulary).tokenize(input)
}

#[test]
fn test_empty_input_yields_no_tokens() {
  assert!(story_tokens("").is_empty());
  assert!(story_tokens("   \t ").is_empty());
}

#[test]
fn test_single_word_priority_order() {
  use LexicalCategory::*;
  let tokens = story_tokens("the brave hero fights quickly");
  let categories: Vec<_> = tokens.iter().map(|t| t.category).collect();
  // "brave" is both an Adjective and a Condition: Adjective has priority
  assert_eq!(categories, [Determiner, Adjective, Noun, Verb, Adverbial]);
}

#[test]
fn test_unknown_word_is_tagged_not_rejected() {
  let tokens = story_tokens("the xyzzy");
  assert_eq!(tokens[1].value, "xyzzy");
  assert_eq!(tokens[1].category, LexicalCategory::Unknown);
}

#[test]
fn test_multi_word_phrase_beats_single_words() {
  let tokens = story_tokens("the dragon sleeps at the castle");
  let phrase = tokens.last().unwrap();
  // "castle" alone would classify as a Noun; the Location phrase wins
  assert_eq!(phrase.value, "at the castle");
  assert_eq!(phrase.category, LexicalCategory::Location);
}

#[test]
fn test_longest_match_within_category() {
  let tokens = story_tokens("The hero searches for the treasure.");
  assert_eq!(tokens[2].value, "searches for");
  assert_eq!(tokens[2].category, LexicalCategory::Verb);
  assert_eq!(tokens[3].value, "the");
}

#[test]
fn test_phrase_requires_word_boundary() {
  // "searches fortune" must not capture "searches for"
  let tokens = story_tokens("the hero searches fortune");
  assert_eq!(tokens[2].value, "searches");
  assert_eq!(tokens[2].category, LexicalCategory::Verb);
  assert_eq!(tokens[3].value, "fortune");
}

#[test]
fn test_trailing_punctuation_splits_off() {
  use LexicalCategory::*;
  let tokens = story_tokens("The hero fights the dragon in the dark forest.");
  let last_two: Vec<_> = tokens[tokens.len() - 2..]
    .iter()
    .map(|t| (t.value.as_str(), t.category))
    .collect();
  assert_eq!(
    last_two,
    [("in the dark forest", Location), (".", Punctuation)]
  );
}

#[test]
fn test_consecutive_punctuation_marks_each_token() {
  use LexicalCategory::*;
  let tokens = story_tokens("the dragon sleeps!?");
  let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, ["the", "dragon", "sleeps", "!", "?"]);
  assert_eq!(tokens[3].category, Punctuation);
  assert_eq!(tokens[4].category, Punctuation);
}

#[test]
fn test_case_preserved_in_values() {
  let tokens = story_tokens("The Brave HERO");
  let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
  assert_eq!(values, ["The", "Brave", "HERO"]);
  assert_eq!(tokens[2].category, LexicalCategory::Noun);
}

#[test]
fn test_round_trip_modulo_whitespace() {
  let input = "A wizard discovers a cave while the moon rises.";
  let joined = story_tokens(input)
    .iter()
    .map(|t| t.value.as_str())
    .collect::<Vec<_>>()
    .join(" ");
  let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
  assert_eq!(strip(&joined), strip(input));
}
