//! Benchmarks for the chunk pipeline (decode, frame, parse).
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use resume_chat::stream::ChunkProcessor;

/// A response body of `tokens` content events plus the sentinel.
fn generate_wire(tokens: usize) -> Vec<u8> {
    let mut wire = String::new();
    for i in 0..tokens {
        let token = if i % 3 == 0 { "多字节 " } else { "token " };
        wire.push_str(&format!(
            "data: {}\n\n",
            serde_json::json!({ "content": token })
        ));
    }
    wire.push_str("data: [DONE]\n\n");
    wire.into_bytes()
}

fn bench_chunk_sizes(c: &mut Criterion) {
    let wire = generate_wire(500);
    let mut group = c.benchmark_group("chunk_processor");
    group.throughput(Throughput::Bytes(wire.len() as u64));

    for chunk_size in [1usize, 7, 64, 1024, 16 * 1024] {
        group.bench_with_input(
            BenchmarkId::new("chunk_size", chunk_size),
            &chunk_size,
            |b, &size| {
                b.iter(|| {
                    let mut processor = ChunkProcessor::new();
                    let mut events = 0;
                    for chunk in wire.chunks(size) {
                        events += processor.feed(black_box(chunk)).events.len();
                    }
                    events += processor.finish().events.len();
                    black_box(events)
                })
            },
        );
    }

    group.finish();
}

fn bench_answer_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("answer_length");

    for tokens in [10usize, 100, 1000] {
        let wire = generate_wire(tokens);
        group.throughput(Throughput::Elements(tokens as u64));
        group.bench_with_input(BenchmarkId::from_parameter(tokens), &wire, |b, wire| {
            b.iter(|| {
                let mut processor = ChunkProcessor::new();
                let mut answer = String::new();
                for chunk in wire.chunks(256) {
                    for event in processor.feed(chunk).events {
                        if let resume_chat::stream::StreamEvent::Content(token) = event {
                            answer.push_str(&token);
                        }
                    }
                }
                black_box(answer)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunk_sizes, bench_answer_lengths);
criterion_main!(benches);
