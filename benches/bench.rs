use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use termdex::{IndexBuilder, IndexFormat, InvertedIndex};

const VOCABULARY: usize = 2000;
const WORDS_PER_DOCUMENT: usize = 40;

fn generate_documents(count: usize) -> Vec<(u64, String)> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|i| {
            let words: Vec<String> = (0..WORDS_PER_DOCUMENT)
                .map(|_| format!("word{}", rng.random_range(0..VOCABULARY)))
                .collect();
            (i as u64, words.join(" "))
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Index Build");
    group.sample_size(10);

    for count in [1000usize, 10000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let documents = generate_documents(count);
            let builder = IndexBuilder::new();
            b.iter(|| builder.build(documents.iter().map(|(id, text)| (*id, text.as_str()))))
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("Conjunctive Query");
    let documents = generate_documents(10000);
    let index = IndexBuilder::new().build(documents);

    for terms in [1usize, 2, 4].iter() {
        let query: Vec<String> = (0..*terms).map(|i| format!("word{}", i * 7)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(terms), &query, |b, query| {
            b.iter(|| index.query(query))
        });
    }
    group.finish();
}

fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("Codec");
    group.sample_size(20);
    let index = IndexBuilder::new().build(generate_documents(10000));

    for format in [IndexFormat::Text, IndexFormat::Binary] {
        let mut bytes = Vec::new();
        index.save(&mut bytes, format).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_function(BenchmarkId::new("encode", format), |b| {
            b.iter(|| {
                let mut buffer = Vec::with_capacity(bytes.len());
                index.save(&mut buffer, format).unwrap();
                buffer
            })
        });
        group.bench_function(BenchmarkId::new("decode", format), |b| {
            b.iter(|| InvertedIndex::load(bytes.as_slice(), format).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query, bench_codecs);
criterion_main!(benches);
