//! Benchmarks for heading extraction vs a full pulldown-cmark pass
//!
//! Run with: cargo bench -p mdtoc-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mdtoc_core::{build_toc, extract_headings, fix_indented_code_blocks, Outline};
use pulldown_cmark::{Event, Options, Parser as MdParser, Tag};

const SAMPLE: &str = r#"# Project Guide {#guide}

This is a paragraph with *emphasis*, **strong text**, and `inline code`.

## Installation

1. Fetch the sources:

   ```bash
   git clone https://example.com/project.git

   cd project
   ```

2. Build:

   ```bash
   cargo build --release
   ```

## Usage

```rust
fn fibonacci(n: u64) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        // # not a heading
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}
```

### The `run` **command**

Runs the [default target](https://example.com/targets).

### 2.0 Release Notes

- Faster startup
- Fewer allocations

## Usage

| Name    | Speed   | Memory |
| ------- | ------- | ------ |
| Fast    | 100ms   | 10MB   |
| Slow    | 1000ms  | 100MB  |

# Appendix

End of document.
"#;

/// Heading scan through a full CommonMark event stream.
fn pulldown_headings(input: &str) -> usize {
    MdParser::new_ext(input, Options::all())
        .filter(|event| matches!(event, Event::Start(Tag::Heading { .. })))
        .count()
}

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    group.throughput(Throughput::Bytes(SAMPLE.len() as u64));

    group.bench_function("extract_headings", |b| {
        b.iter(|| black_box(extract_headings(black_box(SAMPLE)).len()))
    });

    group.bench_function("fix_indented_code_blocks", |b| {
        b.iter(|| black_box(fix_indented_code_blocks(black_box(SAMPLE.as_bytes())).len()))
    });

    group.bench_function("full_outline", |b| {
        b.iter(|| {
            let outline = Outline::from_markdown(black_box(SAMPLE.as_bytes()));
            black_box(outline.toc().len())
        })
    });

    group.bench_function("markdown_pulldown", |b| {
        b.iter(|| black_box(pulldown_headings(black_box(SAMPLE))))
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for size in [1, 5, 10, 20, 50].iter() {
        let content = SAMPLE.repeat(*size);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("mdtoc", size), &content, |b, content| {
            b.iter(|| {
                let headings = extract_headings(black_box(content));
                black_box(build_toc(&headings).len())
            })
        });

        group.bench_with_input(BenchmarkId::new("markdown", size), &content, |b, content| {
            b.iter(|| black_box(pulldown_headings(black_box(content))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outline, bench_scaling);
criterion_main!(benches);
