use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fabula::{derive_text, Grammar, Vocabulary};

fn derive(vocabulary: &Vocabulary, grammar: &Grammar, input: &str) -> usize {
  derive_text(vocabulary, grammar, input)
    .map(|trace| trace.len())
    .unwrap_or(0)
}

fn criterion_benchmark(c: &mut Criterion) {
  let vocabulary = Vocabulary::story();
  let grammar = Grammar::story(&vocabulary);
  let location_input = "The brave hero fights the dragon in the dark forest.";
  let condition_input = "A wizard discovers a cave while the moon rises.";
  let rejected_input = "The the the the the knight";

  c.bench_function("derive location sentence", |b| {
    b.iter(|| {
      derive(
        black_box(&vocabulary),
        black_box(&grammar),
        black_box(location_input),
      )
    })
  });

  c.bench_function("derive condition sentence", |b| {
    b.iter(|| {
      derive(
        black_box(&vocabulary),
        black_box(&grammar),
        black_box(condition_input),
      )
    })
  });

  c.bench_function("reject malformed sentence", |b| {
    b.iter(|| {
      derive(
        black_box(&vocabulary),
        black_box(&grammar),
        black_box(rejected_input),
      )
    })
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
