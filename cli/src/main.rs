use std::env;
use std::io;
use std::io::Write;
use std::process;

use fabula::{derive_text, DeriveError, Grammar, Tokenizer, Vocabulary};

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} [options]

Reads sentences from stdin and prints their leftmost derivation.

Options:
  -h, --help      Print this message
  -t, --tokens    Print the token sequence (defaults to not printing)
  -n, --no-trace  Only report whether the sentence derives, not the steps",
    prog_name
  )
}

fn classify(
  vocabulary: &Vocabulary,
  grammar: &Grammar,
  sentence: &str,
  print_tokens: bool,
  print_trace: bool,
) {
  if print_tokens {
    for token in Tokenizer::new(vocabulary).tokenize(sentence) {
      println!("  {}", token);
    }
  }

  match derive_text(vocabulary, grammar, sentence) {
    Ok(trace) => {
      if print_trace {
        let mut steps = trace.iter();
        if let Some(start) = steps.next() {
          println!("{}", start);
        }
        for step in steps {
          println!("=> {}", step);
        }
      } else {
        println!("Derivation found.");
      }
    }
    Err(DeriveError::NoDerivation) => println!("No derivation found."),
  }
}

struct Args {
  print_tokens: bool,
  print_trace: bool,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    if v.is_empty() {
      return Err(Self::make_error_message("bad argument vector", "fabula"));
    }

    let mut iter = v.into_iter();
    let prog_name = iter.next().unwrap();

    let mut print_tokens = false;
    let mut print_trace = true; // default to printing the derivation

    for o in iter {
      if o == "-h" || o == "--help" {
        println!("{}", usage(&prog_name));
        process::exit(0);
      } else if o == "-t" || o == "--tokens" {
        print_tokens = true;
      } else if o == "-n" || o == "--no-trace" {
        print_trace = false;
      } else {
        return Err(Self::make_error_message("invalid arguments", prog_name));
      }
    }

    Ok(Self {
      print_tokens,
      print_trace,
    })
  }
}

fn main() -> Result<(), io::Error> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let opts = match Args::parse(env::args().collect()) {
    Ok(opts) => opts,
    Err(msg) => {
      eprintln!("{}", msg);
      process::exit(255);
    }
  };

  let vocabulary = Vocabulary::story();
  let grammar = Grammar::story(&vocabulary);

  let mut input = String::new();
  loop {
    print!("> ");
    io::stdout().flush()?;

    match io::stdin().read_line(&mut input) {
      Ok(0) => return Ok(()), // ctrl+d
      Ok(_) if input.trim().is_empty() => input.clear(),
      Ok(_) => {
        classify(
          &vocabulary,
          &grammar,
          input.trim(),
          opts.print_tokens,
          opts.print_trace,
        );
        input.clear();
      }
      Err(error) => return Err(error),
    }
  }
}
