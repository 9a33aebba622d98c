//! An educational grammar engine: sentences are tokenized against a fixed
//! vocabulary with longest-match rules, then checked by a backtracking
//! search for a leftmost derivation in a small story grammar.

#[macro_use]
extern crate lazy_static;

pub mod derive;
pub mod grammar;
pub mod rules;
pub mod token;
pub mod tokenizer;
pub mod vocabulary;

pub use crate::derive::{DeriveError, Deriver, DEFAULT_MAX_DEPTH};
pub use crate::grammar::Grammar;
pub use crate::rules::{NonTerminal, Rule, Symbol};
pub use crate::token::{LexicalCategory, Token};
pub use crate::tokenizer::Tokenizer;
pub use crate::vocabulary::Vocabulary;

/// Tokenizes `input` and searches for a leftmost derivation of it.
pub fn derive_text(
  vocabulary: &Vocabulary,
  grammar: &Grammar,
  input: &str,
) -> Result<Vec<String>, DeriveError> {
  let tokens = Tokenizer::new(vocabulary).tokenize(input);
  Deriver::new(grammar).derive(&tokens)
}

#[test]
fn test_full_pipeline() {
  let vocabulary = Vocabulary::story();
  let grammar = Grammar::story(&vocabulary);

  let trace = derive_text(
    &vocabulary,
    &grammar,
    "The brave hero fights the dragon in the dark forest.",
  )
  .unwrap();
  assert_eq!(trace[0], "<Sentence>");
  assert!(
    trace
      .last()
      .unwrap()
      .eq_ignore_ascii_case("the brave hero fights the dragon in the dark forest .")
  );

  assert_eq!(
    derive_text(&vocabulary, &grammar, "The the the the the knight"),
    Err(DeriveError::NoDerivation)
  );
}
