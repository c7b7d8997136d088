//! Benchmarks for relayout reconstruction performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic token trees, so no external extractor runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use relayout::model::{Fragment, Page, Run};
use relayout::parser::{LineGrouper, PdfExtraction, ReconstructOptions};
use relayout::render::{normalize_docx_text, to_html};

/// Creates synthetic pages with `lines` lines of `words` fragments each,
/// emitted in a scrambled order.
fn create_test_pages(page_count: usize, lines: usize, words: usize) -> Vec<Page> {
    (0..page_count)
        .map(|p| {
            let mut fragments = Vec::with_capacity(lines * words);
            for l in 0..lines {
                for w in 0..words {
                    let run = match (l, w % 7) {
                        (0, _) => Run::new("Heading%20text").with_size(20.0),
                        (_, 3) => Run::new("bold").bold(),
                        (_, 5) => Run::new("italic").italic(),
                        _ => Run::new("word%20"),
                    };
                    fragments.push(Fragment::new(w as f64 * 4.5, l as f64 * 1.25, vec![run]));
                }
            }
            // Scramble deterministically so grouping has real work to do
            fragments.reverse();
            fragments.rotate_left(words / 2);
            Page::with_fragments(p as u32 + 1, fragments)
        })
        .collect()
}

/// Benchmark line grouping on a single dense page.
fn bench_line_grouping(c: &mut Criterion) {
    let pages = create_test_pages(1, 60, 12);
    let grouper = LineGrouper::default();

    c.bench_function("group_lines_720_fragments", |b| {
        b.iter(|| grouper.group_page(black_box(&pages[0])));
    });
}

/// Benchmark HTML emission at various sizes, sequential and parallel.
fn bench_html_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("html_rendering");

    for page_count in [1, 10, 50].iter() {
        let pages = create_test_pages(*page_count, 40, 10);
        let parallel = ReconstructOptions::default();
        let sequential = ReconstructOptions::default().sequential();

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| to_html(black_box(&pages), &parallel));
        });
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            b.iter(|| to_html(black_box(&pages), &sequential));
        });
    }

    group.finish();
}

/// Benchmark raw text derivation from tokens.
fn bench_raw_text(c: &mut Criterion) {
    let pages = create_test_pages(10, 40, 10);

    c.bench_function("derive_raw_text_10_pages", |b| {
        b.iter(|| PdfExtraction::from_pages(black_box(pages.clone())));
    });
}

/// Benchmark DOCX text normalization.
fn bench_docx_normalization(c: &mut Criterion) {
    let text = "Paragraph  with\t\tspacing.\r\n\r\n\r\n\r\n".repeat(2_000);

    c.bench_function("normalize_docx_text", |b| {
        b.iter(|| normalize_docx_text(black_box(&text)));
    });
}

criterion_group!(
    benches,
    bench_line_grouping,
    bench_html_rendering,
    bench_raw_text,
    bench_docx_normalization,
);
criterion_main!(benches);
