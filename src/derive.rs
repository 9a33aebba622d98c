use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{trace, warn};

use crate::grammar::Grammar;
use crate::rules::{NonTerminal, Rule, Symbol};
use crate::token::Token;

/// Recursion ceiling for the derivation search. Recursive rules make the
/// search space infinite; a branch that reaches this depth is abandoned and
/// reported as ordinary exhaustion.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Terminal failure of [`Deriver::derive`]: the search space was exhausted
/// (or cut off at the depth ceiling) without reproducing the token sequence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeriveError {
  #[error("no derivation found")]
  NoDerivation,
}

/// The partially rewritten symbol sequence of one in-flight derivation.
/// Starts as the bare start symbol and, on success, ends as a run of
/// terminals equal to the token sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SententialForm(Vec<Symbol>);

impl SententialForm {
  pub fn start(symbol: NonTerminal) -> Self {
    Self(vec![Symbol::Nonterminal(symbol)])
  }

  fn leftmost_nonterminal(&self) -> Option<(usize, NonTerminal)> {
    self
      .0
      .iter()
      .enumerate()
      .find_map(|(idx, symbol)| symbol.nonterminal().map(|s| (idx, s)))
  }

  /// Splices a rule's right-hand side over the symbol at `idx`.
  fn expand(&self, idx: usize, rule: &Rule) -> Self {
    let mut symbols = Vec::with_capacity(self.0.len() + rule.len() - 1);
    symbols.extend_from_slice(&self.0[..idx]);
    symbols.extend_from_slice(&rule.productions);
    symbols.extend_from_slice(&self.0[idx + 1..]);
    Self(symbols)
  }

  /// The leading run of already-resolved terminals.
  fn terminal_prefix(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map_while(|symbol| symbol.terminal())
  }

  /// Does the resolved prefix agree with the tokens it lines up against?
  /// Pruning on this check is what keeps the search bounded by the input
  /// length instead of blind.
  fn prefix_matches(&self, tokens: &[Token]) -> bool {
    let prefix: Vec<&str> = self.terminal_prefix().collect();
    prefix.len() <= tokens.len()
      && prefix
        .iter()
        .zip(tokens.iter())
        .all(|(terminal, token)| terminal.eq_ignore_ascii_case(&token.value))
  }

  /// Exact, element-for-element, case-insensitive match of a fully resolved
  /// form against the whole token sequence.
  fn matches(&self, tokens: &[Token]) -> bool {
    self.0.len() == tokens.len() && self.prefix_matches(tokens)
  }

  /// Stable key for the visited set: the rendered form. Terminal words never
  /// contain `<`, so a terminal can't collide with a non-terminal tag.
  fn signature(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for SententialForm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (idx, symbol) in self.0.iter().enumerate() {
      if idx > 0 {
        write!(f, " ")?;
      }
      write!(f, "{}", symbol)?;
    }
    Ok(())
  }
}

/// Outcome of expanding one sentential form.
enum Expansion {
  /// A full derivation was found; the trace buffer holds it.
  Derived,
  /// Every rule at every reachable branch was tried and failed.
  Exhausted,
  /// At least one branch was cut off at the depth ceiling.
  DepthExceeded,
}

/// Backtracking leftmost-derivation search over an immutable grammar.
///
/// Each `derive` call owns its trace and visited set, so one deriver can be
/// used for any number of calls, or shared read-only across threads' worth
/// of fresh derivers over the same grammar.
pub struct Deriver<'g> {
  grammar: &'g Grammar,
  max_depth: usize,
}

impl<'g> Deriver<'g> {
  pub fn new(grammar: &'g Grammar) -> Self {
    Self::with_max_depth(grammar, DEFAULT_MAX_DEPTH)
  }

  pub fn with_max_depth(grammar: &'g Grammar, max_depth: usize) -> Self {
    Self { grammar, max_depth }
  }

  /// Searches for a leftmost derivation of `tokens` from the grammar's start
  /// symbol. On success, returns the rendered form after each expansion step,
  /// beginning with the bare start symbol and ending with the fully resolved
  /// terminal sequence. First derivation in rule order wins.
  pub fn derive(&self, tokens: &[Token]) -> Result<Vec<String>, DeriveError> {
    let start = SententialForm::start(self.grammar.start);
    let mut derivation = vec![start.to_string()];
    let mut visited = HashSet::new();

    match self.expand(&start, tokens, &mut derivation, &mut visited, 0) {
      Expansion::Derived => Ok(derivation),
      Expansion::Exhausted => Err(DeriveError::NoDerivation),
      Expansion::DepthExceeded => {
        warn!(
          max_depth = self.max_depth,
          "derivation search abandoned at depth ceiling"
        );
        Err(DeriveError::NoDerivation)
      }
    }
  }

  fn expand(
    &self,
    form: &SententialForm,
    tokens: &[Token],
    derivation: &mut Vec<String>,
    visited: &mut HashSet<String>,
    depth: usize,
  ) -> Expansion {
    if depth > self.max_depth {
      return Expansion::DepthExceeded;
    }

    // fully resolved: succeed only on an exact match with the whole input
    let Some((idx, symbol)) = form.leftmost_nonterminal() else {
      return if form.matches(tokens) {
        Expansion::Derived
      } else {
        Expansion::Exhausted
      };
    };

    if !visited.insert(form.signature()) {
      // already explored via some other sequence of expansions
      return Expansion::Exhausted;
    }

    let Some(rules) = self.grammar.rules_for(symbol) else {
      return Expansion::Exhausted;
    };

    let mut outcome = Expansion::Exhausted;
    for rule in rules {
      let next = form.expand(idx, rule);
      if !next.prefix_matches(tokens) {
        continue;
      }

      trace!(depth, rule = %rule, "expand");
      derivation.push(next.to_string());
      match self.expand(&next, tokens, derivation, visited, depth + 1) {
        Expansion::Derived => return Expansion::Derived,
        Expansion::DepthExceeded => outcome = Expansion::DepthExceeded,
        Expansion::Exhausted => {}
      }
      // dead end: roll this step back and try the next rule
      derivation.pop();
    }

    outcome
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::token::LexicalCategory;
  use crate::tokenizer::Tokenizer;
  use crate::vocabulary::Vocabulary;

  fn story_derive(input: &str) -> Result<Vec<String>, DeriveError> {
    let vocabulary = Vocabulary::story();
    let grammar = Grammar::story(&vocabulary);
    let tokens = Tokenizer::new(&vocabulary).tokenize(input);
    Deriver::new(&grammar).derive(&tokens)
  }

  fn final_step(trace: &[String]) -> &str {
    trace.last().unwrap()
  }

  #[test]
  fn test_derives_corpus_sentence_with_location() {
    let trace = story_derive("The brave hero fights the dragon in the dark forest.").unwrap();
    assert_eq!(trace[0], "<Sentence>");
    assert_eq!(
      trace[1],
      "<NounPhrase> <VerbPhrase> <Extra> <Punctuation>"
    );
    assert!(
      final_step(&trace)
        .eq_ignore_ascii_case("the brave hero fights the dragon in the dark forest .")
    );
  }

  #[test]
  fn test_derives_corpus_sentence_with_condition() {
    let trace = story_derive("A wizard discovers a cave while the moon rises.").unwrap();
    assert!(
      final_step(&trace).eq_ignore_ascii_case("a wizard discovers a cave while the moon rises .")
    );
  }

  #[test]
  fn test_derives_compound_sentence() {
    let trace = story_derive("The hero fights. And the knight rides.").unwrap();
    assert!(final_step(&trace).eq_ignore_ascii_case("the hero fights . and the knight rides ."));
  }

  #[test]
  fn test_soundness_final_step_equals_tokens() {
    let vocabulary = Vocabulary::story();
    let grammar = Grammar::story(&vocabulary);
    let tokens = Tokenizer::new(&vocabulary).tokenize("My enchanted sword opens the castle!");
    let trace = Deriver::new(&grammar).derive(&tokens).unwrap();
    let expected = tokens
      .iter()
      .map(|t| t.value.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    assert!(final_step(&trace).eq_ignore_ascii_case(&expected));
  }

  #[test]
  fn test_malformed_sentence_fails_cleanly() {
    assert_eq!(
      story_derive("The the the the the knight"),
      Err(DeriveError::NoDerivation)
    );
  }

  #[test]
  fn test_relative_clause_rules_are_dead_ends() {
    // "who" tokenizes fine, but the RelativeClause non-terminal has no
    // rules, so every noun-phrase rewrite that needs it must fail
    assert_eq!(
      story_derive("hero who fights."),
      Err(DeriveError::NoDerivation)
    );
  }

  #[test]
  fn test_unknown_token_fails_derivation_not_tokenization() {
    assert_eq!(
      story_derive("The xyzzy fights."),
      Err(DeriveError::NoDerivation)
    );
  }

  #[test]
  fn test_determinism() {
    let input = "A wizard discovers a cave while the moon rises.";
    assert_eq!(story_derive(input).unwrap(), story_derive(input).unwrap());
  }

  #[test]
  fn test_first_rule_in_table_order_wins() {
    // "quickly" fits both VerbPhrase -> Verb Adverbial and
    // Extra -> Adverbial; the sentence rule with <Extra> comes first,
    // so the adverb must land in <Extra>
    let trace = story_derive("The hero fights quickly.").unwrap();
    assert_eq!(trace[1], "<NounPhrase> <VerbPhrase> <Extra> <Punctuation>");
  }

  #[test]
  fn test_growing_recursion_stops_at_depth_ceiling() {
    use NonTerminal::Sentence;

    // Sentence -> Sentence Sentence grows forever and never resolves a
    // terminal, so only the depth ceiling ends the search
    let grammar = Grammar::new(
      Sentence,
      vec![Rule::new(
        Sentence,
        vec![
          Symbol::Nonterminal(Sentence),
          Symbol::Nonterminal(Sentence),
        ],
      )],
    );
    let tokens = [Token::new("hero", LexicalCategory::Noun)];
    let deriver = Deriver::with_max_depth(&grammar, 50);
    assert_eq!(deriver.derive(&tokens), Err(DeriveError::NoDerivation));
  }

  #[test]
  fn test_identical_form_cycle_is_suppressed() {
    use NonTerminal::{NounPhrase, Sentence};

    // Sentence -> NounPhrase -> Sentence revisits the same two forms; the
    // visited set must end the search without help from the depth ceiling
    let grammar = Grammar::new(
      Sentence,
      vec![
        Rule::new(Sentence, vec![Symbol::Nonterminal(NounPhrase)]),
        Rule::new(NounPhrase, vec![Symbol::Nonterminal(Sentence)]),
      ],
    );
    let tokens = [Token::new("hero", LexicalCategory::Noun)];
    let deriver = Deriver::with_max_depth(&grammar, 1_000_000);
    assert_eq!(deriver.derive(&tokens), Err(DeriveError::NoDerivation));
  }

  #[test]
  fn test_missing_rules_fail_the_branch() {
    let grammar = Grammar::new(NonTerminal::Sentence, Vec::new());
    let deriver = Deriver::new(&grammar);
    assert_eq!(deriver.derive(&[]), Err(DeriveError::NoDerivation));
  }

  #[test]
  fn test_empty_tokens_have_no_derivation() {
    assert_eq!(story_derive(""), Err(DeriveError::NoDerivation));
  }
}
