//! Performance benchmarks for PreverbEngine
//!
//! Run with: cargo bench --bench engine_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use preverb_core::{EngineConfig, PreverbEngine, RuleRevision};
use std::hint::black_box;

const HEADER: [&str; 4] = ["form", "lemma", "xpostag", "anas"];

const WORDS: &[(&str, &str, &str)] = &[
    ("a", "a", "[/Det|Art.Def]"),
    ("gépet", "gép", "[/N][Acc]"),
    ("szét", "szét", "[/Prev]"),
    ("kell", "kell", "[/V][Prs.NDef.3Sg]"),
    ("szerelni", "szerel", "[/V][Inf]"),
    ("és", "és", "[/Cnj]"),
    ("rágta", "rág", "[/V][Pst.Def.3Sg]"),
    ("volna", "van", "[/V][Cond.NDef.3Sg]"),
    ("meg", "meg", "[/Prev]"),
    (".", ".", "[Punct]"),
];

/// Generate a sentence of the given length from a fixed word cycle
fn generate_sentence(len: usize) -> Vec<Vec<String>> {
    WORDS
        .iter()
        .cycle()
        .take(len)
        .map(|&(form, lemma, tag)| {
            let anas = format!(r#"[{{"lemma": "{lemma}", "tag": "{tag}"}}]"#);
            vec![form.to_string(), lemma.to_string(), tag.to_string(), anas]
        })
        .collect()
}

/// Benchmark different sentence lengths
fn bench_sentence_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentence_lengths");

    for len in [10, 40, 160] {
        let sentence = generate_sentence(len);
        let mut engine = PreverbEngine::new(&HEADER, EngineConfig::default()).unwrap();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("process", len), &sentence, |b, sentence| {
            b.iter(|| {
                let _ = engine
                    .process_sentence(black_box(sentence.clone()))
                    .unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark the rule table revisions against each other
fn bench_revisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("revisions");
    let sentence = generate_sentence(40);

    for revision in RuleRevision::ALL {
        let config = EngineConfig {
            revision,
            ..Default::default()
        };
        let mut engine = PreverbEngine::new(&HEADER, config).unwrap();

        group.bench_with_input(
            BenchmarkId::new("revision", revision),
            &sentence,
            |b, sentence| {
                b.iter(|| {
                    let _ = engine
                        .process_sentence(black_box(sentence.clone()))
                        .unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_sentence_lengths, bench_revisions);
criterion_main!(benches);
