//! Benchmarks for note extraction.
//!
//! Run with: cargo bench --bench extract_benchmarks

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use notegit::domain::{FileStats, SourceFile, StartPosition, extract_links, infer_extents};
use notegit::infra::{Extractor, Format, parse_markdown_note, parse_yaml_notes};
use std::path::Path;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Tags to assign to notes
const TAGS: &[&str] = &[
    "draft",
    "review",
    "rust",
    "cli",
    "async",
    "database",
    "http",
    "design",
];

/// Sample words for generating note bodies
const WORDS: &[&str] = &[
    "architecture",
    "design",
    "pattern",
    "system",
    "component",
    "interface",
    "module",
    "function",
    "abstraction",
    "dependency",
    "testing",
    "performance",
];

fn body(index: usize) -> String {
    let words: Vec<&str> = (0..40).map(|j| WORDS[(index + j) % WORDS.len()]).collect();
    format!(
        "{}\nSee [[note-{}]] and [[note-{}]].",
        words.join(" "),
        index + 1,
        index + 2
    )
}

/// Generate a multi-note YAML file with `count` notes
fn generate_yaml(count: usize) -> String {
    let mut out = String::from("notes:\n");
    for i in 0..count {
        out.push_str(&format!(
            "  - id: note-{i}\n    title: Note {i} about {}\n    tags: [{}, {}]\n    note: |\n",
            WORDS[i % WORDS.len()],
            TAGS[i % TAGS.len()],
            TAGS[(i + 3) % TAGS.len()],
        ));
        for line in body(i).lines() {
            out.push_str("      ");
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

fn generate_markdown() -> String {
    format!(
        "---\nid: note-0\ntitle: A Markdown note\ntags: [rust, cli]\n---\n\n# Heading\n\n{}\n",
        body(0)
    )
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_yaml_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("yaml_parse");

    for size in [10, 100, 1000] {
        let content = generate_yaml(size);

        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &content, |b, content| {
            b.iter(|| parse_yaml_notes(content).unwrap());
        });
    }

    group.finish();
}

fn bench_markdown_parse(c: &mut Criterion) {
    let content = generate_markdown();

    c.bench_function("markdown_parse", |b| {
        b.iter(|| parse_markdown_note(&content).unwrap())
    });
}

fn bench_link_extraction(c: &mut Criterion) {
    let text = (0..100).map(body).collect::<Vec<_>>().join("\n");

    c.bench_function("extract_links", |b| b.iter(|| extract_links(&text)));
}

// =============================================================================
// Extent Benchmarks
// =============================================================================

fn bench_infer_extents(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer_extents");

    for size in [100, 1000, 10_000] {
        // Evenly spaced notes, eight lines and 200 bytes apart
        let starts: Vec<StartPosition> = (0..size)
            .map(|i| StartPosition {
                line: i * 8 + 2,
                offset: i * 200 + 10,
            })
            .collect();
        let stats = FileStats {
            lines: size * 8 + 1,
            bytes: size * 200 + 10,
        };

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("notes", size), &starts, |b, starts| {
            b.iter(|| infer_extents(starts, stats));
        });
    }

    group.finish();
}

// =============================================================================
// Extraction Benchmarks
// =============================================================================

fn bench_extract_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_content");
    let extractor = Extractor::new();

    for size in [10, 100, 1000] {
        let content = generate_yaml(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("yaml", size), &content, |b, content| {
            b.iter(|| {
                extractor
                    .extract_content(
                        SourceFile::new(Path::new("/notes"), "notes.yaml"),
                        Format::Yaml,
                        content,
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Groups
// =============================================================================

criterion_group!(
    parse_benches,
    bench_yaml_parse,
    bench_markdown_parse,
    bench_link_extraction,
);

criterion_group!(extract_benches, bench_infer_extents, bench_extract_content);

criterion_main!(parse_benches, extract_benches);
