use std::fmt;

use crate::token::LexicalCategory;

/// Non-terminal symbols of the grammar.
///
/// Phrase-level symbols expand through the structural rules; a `Category`
/// symbol expands into the words of the backing lexical category. Keeping
/// the two tag sets apart means "the category Verb" and "the non-terminal
/// VerbPhrase" can never be confused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum NonTerminal {
  Sentence,
  NounPhrase,
  VerbPhrase,
  Extra,
  Category(LexicalCategory),
}

impl fmt::Display for NonTerminal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Sentence => write!(f, "Sentence"),
      Self::NounPhrase => write!(f, "NounPhrase"),
      Self::VerbPhrase => write!(f, "VerbPhrase"),
      Self::Extra => write!(f, "Extra"),
      Self::Category(category) => write!(f, "{}", category),
    }
  }
}

/// One slot on the right-hand side of a rule: either a literal word the
/// input must contain, or a non-terminal still to be expanded.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
  Terminal(String),
  Nonterminal(NonTerminal),
}

impl Symbol {
  pub fn terminal(&self) -> Option<&str> {
    match self {
      Self::Terminal(s) => Some(s),
      Self::Nonterminal(_) => None,
    }
  }

  pub fn nonterminal(&self) -> Option<NonTerminal> {
    match self {
      Self::Nonterminal(s) => Some(*s),
      Self::Terminal(_) => None,
    }
  }

  pub fn is_terminal(&self) -> bool {
    self.terminal().is_some()
  }

  pub fn is_nonterminal(&self) -> bool {
    self.nonterminal().is_some()
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Terminal(s) => write!(f, "{}", s),
      Self::Nonterminal(s) => write!(f, "<{}>", s),
    }
  }
}

/// One admissible rewrite of a non-terminal into a sequence of symbols.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
  pub symbol: NonTerminal,
  pub productions: Vec<Symbol>,
}

impl Rule {
  pub fn new(symbol: NonTerminal, productions: Vec<Symbol>) -> Self {
    Self {
      symbol,
      productions,
    }
  }

  pub fn len(&self) -> usize {
    self.productions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ->", self.symbol)?;
    for p in self.productions.iter() {
      write!(f, " {}", p)?;
    }
    Ok(())
  }
}

#[test]
fn test_symbol_predicates() {
  let terminal = Symbol::Terminal("hero".to_string());
  let nonterminal = Symbol::Nonterminal(NonTerminal::NounPhrase);
  assert!(terminal.is_terminal() && !terminal.is_nonterminal());
  assert!(nonterminal.is_nonterminal() && !nonterminal.is_terminal());
  assert_eq!(terminal.terminal(), Some("hero"));
  assert_eq!(nonterminal.nonterminal(), Some(NonTerminal::NounPhrase));
}

#[test]
fn test_rule_display() {
  let rule = Rule::new(
    NonTerminal::Sentence,
    vec![
      Symbol::Nonterminal(NonTerminal::NounPhrase),
      Symbol::Nonterminal(NonTerminal::VerbPhrase),
      Symbol::Nonterminal(NonTerminal::Category(LexicalCategory::Punctuation)),
    ],
  );
  assert_eq!(
    rule.to_string(),
    "Sentence -> <NounPhrase> <VerbPhrase> <Punctuation>"
  );
}
