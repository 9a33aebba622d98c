use std::fmt;

/// Closed set of lexical categories a token can be tagged with.
///
/// These are the terminal-side tags: the tokenizer assigns one to every token
/// it emits, and the vocabulary table is keyed by them. Phrase-level grammar
/// symbols live in [`crate::rules::NonTerminal`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LexicalCategory {
  Determiner,
  Adjective,
  Noun,
  Verb,
  Preposition,
  Adverbial,
  Location,
  Condition,
  RelativeClause,
  Conjunction,
  Punctuation,
  /// Fallback for words no vocabulary list knows. Tokenization never fails;
  /// classification judgment is deferred to the derivation engine.
  Unknown,
}

impl LexicalCategory {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Determiner => "Determiner",
      Self::Adjective => "Adjective",
      Self::Noun => "Noun",
      Self::Verb => "Verb",
      Self::Preposition => "Preposition",
      Self::Adverbial => "Adverbial",
      Self::Location => "Location",
      Self::Condition => "Condition",
      Self::RelativeClause => "RelativeClause",
      Self::Conjunction => "Conjunction",
      Self::Punctuation => "Punctuation",
      Self::Unknown => "Unknown",
    }
  }
}

impl fmt::Display for LexicalCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

/// One token of input: the literal surface text (possibly a multi-word
/// phrase, e.g. "in the dark forest") and its lexical category.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub value: String,
  pub category: LexicalCategory,
}

impl Token {
  pub fn new(value: impl Into<String>, category: LexicalCategory) -> Self {
    Self {
      value: value.into(),
      category,
    }
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} <{}>", self.value, self.category)
  }
}

#[test]
fn test_token_display() {
  let token = Token::new("hero", LexicalCategory::Noun);
  assert_eq!(token.to_string(), "hero <Noun>");
  assert_eq!(
    Token::new(".", LexicalCategory::Punctuation).to_string(),
    ". <Punctuation>"
  );
}
