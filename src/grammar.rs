use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::rules::{NonTerminal, Rule, Symbol};
use crate::token::LexicalCategory;
use crate::vocabulary::Vocabulary;

/// Categories that get one generated single-terminal rule per vocabulary
/// entry. RelativeClause is deliberately absent: the noun-phrase rules that
/// mention it are dead ends, and the engine must treat a ruleless
/// non-terminal as a failed branch.
const LEXICAL_RULE_CATEGORIES: [LexicalCategory; 10] = [
  LexicalCategory::Determiner,
  LexicalCategory::Adjective,
  LexicalCategory::Noun,
  LexicalCategory::Verb,
  LexicalCategory::Preposition,
  LexicalCategory::Adverbial,
  LexicalCategory::Location,
  LexicalCategory::Condition,
  LexicalCategory::Conjunction,
  LexicalCategory::Punctuation,
];

/// A context-free grammar: a start symbol and an ordered list of rules per
/// non-terminal. Immutable once built, safe to share across derivations.
///
/// Rule order is load-bearing: the deriver tries rules first to last and
/// returns the first derivation that works, so reordering rules changes
/// which parse a sentence gets.
#[derive(Debug)]
pub struct Grammar {
  pub start: NonTerminal,
  pub rules: HashMap<NonTerminal, Vec<Rc<Rule>>>,
}

impl Grammar {
  pub fn new(start: NonTerminal, rules: Vec<Rule>) -> Self {
    let rules: HashMap<NonTerminal, Vec<Rc<Rule>>> =
      rules.into_iter().fold(HashMap::new(), |mut map, rule| {
        map.entry(rule.symbol).or_default().push(Rc::new(rule));
        map
      });

    Self { start, rules }
  }

  /// The rules for a non-terminal, in declaration order. None for symbols
  /// the grammar has no rewrite for.
  pub fn rules_for(&self, symbol: NonTerminal) -> Option<&[Rc<Rule>]> {
    self.rules.get(&symbol).map(Vec::as_slice)
  }

  /// The fixed story grammar, seeded with one rule per vocabulary entry.
  pub fn story(vocabulary: &Vocabulary) -> Self {
    use LexicalCategory::*;
    use NonTerminal::{Extra, NounPhrase, Sentence, VerbPhrase};

    let nt = |s: NonTerminal| Symbol::Nonterminal(s);
    let cat = |c: LexicalCategory| Symbol::Nonterminal(NonTerminal::Category(c));

    let mut rules = vec![
      Rule::new(
        Sentence,
        vec![nt(NounPhrase), nt(VerbPhrase), nt(Extra), cat(Punctuation)],
      ),
      Rule::new(Sentence, vec![nt(NounPhrase), nt(VerbPhrase), cat(Punctuation)]),
      Rule::new(Sentence, vec![nt(Sentence), cat(Conjunction), nt(Sentence)]),
      Rule::new(
        NounPhrase,
        vec![cat(Noun), cat(RelativeClause), cat(Verb), nt(NounPhrase)],
      ),
      Rule::new(
        NounPhrase,
        vec![cat(Noun), cat(RelativeClause), nt(VerbPhrase)],
      ),
      Rule::new(NounPhrase, vec![cat(Determiner), cat(Adjective), cat(Noun)]),
      Rule::new(NounPhrase, vec![cat(Determiner), cat(Noun)]),
      Rule::new(NounPhrase, vec![cat(Noun)]),
      Rule::new(VerbPhrase, vec![cat(Verb), nt(NounPhrase)]),
      Rule::new(VerbPhrase, vec![cat(Verb), cat(Location)]),
      Rule::new(VerbPhrase, vec![cat(Verb), cat(Adverbial)]),
      Rule::new(VerbPhrase, vec![cat(Verb)]),
      Rule::new(
        VerbPhrase,
        vec![nt(VerbPhrase), cat(Conjunction), nt(VerbPhrase)],
      ),
      Rule::new(Extra, vec![cat(Location)]),
      Rule::new(Extra, vec![cat(Condition)]),
      Rule::new(Extra, vec![cat(Adverbial)]),
    ];

    for category in LEXICAL_RULE_CATEGORIES {
      for word in vocabulary.entries(category) {
        rules.push(Rule::new(
          NonTerminal::Category(category),
          vec![Symbol::Terminal(word.clone())],
        ));
      }
    }

    // "and then" derives as one connective
    rules.push(Rule::new(
      NonTerminal::Category(Conjunction),
      vec![
        Symbol::Terminal("and".to_string()),
        Symbol::Terminal("then".to_string()),
      ],
    ));

    Self::new(NonTerminal::Sentence, rules)
  }
}

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "//** start: {}", self.start)?;
    for rule in self.rules.values().flatten() {
      writeln!(f, "{}", rule)?;
    }
    Ok(())
  }
}

#[cfg(test)]
use NonTerminal::Category;

#[test]
fn test_structural_rule_order_is_preserved() {
  let grammar = Grammar::story(&Vocabulary::story());
  let sentence_rules = grammar.rules_for(NonTerminal::Sentence).unwrap();
  assert_eq!(sentence_rules.len(), 3);
  assert_eq!(
    sentence_rules[0].to_string(),
    "Sentence -> <NounPhrase> <VerbPhrase> <Extra> <Punctuation>"
  );
  assert_eq!(
    sentence_rules[2].to_string(),
    "Sentence -> <Sentence> <Conjunction> <Sentence>"
  );
}

#[test]
fn test_vocabulary_rules_follow_entry_order() {
  let vocabulary = Vocabulary::story();
  let grammar = Grammar::story(&vocabulary);
  let determiners = grammar
    .rules_for(Category(LexicalCategory::Determiner))
    .unwrap();
  assert_eq!(determiners.len(), 12);
  assert_eq!(determiners[0].productions[0].terminal(), Some("The"));
  assert_eq!(determiners[1].productions[0].terminal(), Some("A"));
}

#[test]
fn test_conjunction_has_trailing_compound_rule() {
  let grammar = Grammar::story(&Vocabulary::story());
  let conjunctions = grammar
    .rules_for(Category(LexicalCategory::Conjunction))
    .unwrap();
  let compound = conjunctions.last().unwrap();
  assert_eq!(compound.to_string(), "Conjunction -> and then");
}

#[test]
fn test_relative_clause_has_no_rules() {
  let grammar = Grammar::story(&Vocabulary::story());
  assert!(
    grammar
      .rules_for(Category(LexicalCategory::RelativeClause))
      .is_none()
  );
}
