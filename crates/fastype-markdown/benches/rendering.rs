//! Benchmarks for the markdown pipeline.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fastype_markdown::{
    PLATFORM_HEADING_OFFSET, RenderConfig, collect_images, parse, render, render_batch,
    render_markdown, shift_headings,
};

/// Generate a post with front matter, sections, images, and code.
fn generate_markdown(sections: usize, paragraphs_per_section: usize) -> String {
    let mut md = String::with_capacity(sections * paragraphs_per_section * 200);
    md.push_str("---\ntitle: Benchmark\ntags:\n  - rust\n  - bench\n---\n\n");
    md.push_str("# Document Title\n\n");

    for i in 0..sections {
        md.push_str(&format!("## Section {i}\n\n"));
        for j in 0..paragraphs_per_section {
            md.push_str(&format!(
                "Paragraph {j} in section {i} has **bold**, *italic*, `code` and a \
                 [link](https://example.com/{i}/{j}).\n\n"
            ));
        }
        md.push_str(&format!("![figure {i}](https://cdn.example.com/{i}.png)\n\n"));
        md.push_str("> A quoted remark.\n\n");
        md.push_str("```python\ndef f(x):\n    return x * 2\n```\n\n");
    }
    md
}

fn bench_parse(c: &mut Criterion) {
    let markdown = generate_markdown(20, 3);

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(markdown.len() as u64));
    group.bench_function("post_20_sections", |b| {
        b.iter(|| parse(black_box(&markdown)));
    });
    group.finish();
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_by_size");

    for (sections, paragraphs) in [(5, 2), (20, 3), (50, 5)] {
        let markdown = generate_markdown(sections, paragraphs);
        let mut doc = parse(&markdown);
        shift_headings(&mut doc, PLATFORM_HEADING_OFFSET);

        group.throughput(Throughput::Bytes(markdown.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("html", format!("{sections}s_{paragraphs}p")),
            &doc,
            |b, doc| b.iter(|| render(doc)),
        );
    }

    group.finish();
}

fn bench_collect_images(c: &mut Criterion) {
    let doc = parse(&generate_markdown(50, 2));

    c.bench_function("collect_images_50_sections", |b| {
        b.iter(|| collect_images(black_box(&doc)));
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let markdown = generate_markdown(20, 3);
    let config = RenderConfig::default();

    c.bench_function("render_markdown", |b| {
        b.iter(|| render_markdown(black_box(&markdown), &config));
    });
}

fn bench_batch(c: &mut Criterion) {
    let sources: Vec<String> = (0..32).map(|_| generate_markdown(10, 3)).collect();
    let config = RenderConfig::default();

    let mut group = c.benchmark_group("batch");
    group.bench_function("sequential_32_posts", |b| {
        b.iter(|| {
            sources
                .iter()
                .map(|s| render_markdown(s, &config))
                .collect::<Vec<_>>()
        });
    });
    group.bench_function("parallel_32_posts", |b| {
        b.iter(|| render_batch(&sources, &config));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_render_varying_sizes,
    bench_collect_images,
    bench_full_pipeline,
    bench_batch,
);

criterion_main!(benches);
