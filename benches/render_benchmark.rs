//! Benchmarks for adaptdoc parsing and rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic lessons of growing size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use adaptdoc::RenderOptions;

/// Creates a synthetic lesson with the given number of sections.
fn create_test_lesson(section_count: usize) -> String {
    let mut lesson = String::from("# Benchmark Lesson\n\n");

    for i in 0..section_count {
        lesson.push_str(&format!("## Section {}\n\n", i + 1));
        lesson.push_str("Plants use **light energy** to make *glucose* from $CO_2$ and water.\n\n");
        lesson.push_str("- First key point\n- Second **key** point\n- Third point\n\n");
        lesson.push_str("| Term | Meaning |\n|------|---------|\n| chlorophyll | green pigment |\n| stomata | leaf pores |\n\n");
        lesson.push_str("> Remember to label your diagram.\n\n");
        lesson.push_str("$$6CO_2 + 6H_2O \\rightarrow C_6H_{12}O_6 + 6O_2$$\n\n");
    }

    lesson
}

/// Benchmark block parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [1, 10, 50].iter() {
        let lesson = create_test_lesson(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| adaptdoc::parse(black_box(&lesson)));
        });
    }

    group.finish();
}

/// Benchmark the inline tokenizer on one emphasis-heavy line.
fn bench_tokenizing(c: &mut Criterion) {
    let line = "A **bold *and italic* run**, some _underscored_ text and $x^2$ math.".repeat(10);

    c.bench_function("tokenize_line", |b| {
        b.iter(|| adaptdoc::parser::tokenize_plain(black_box(&line)));
    });
}

/// Benchmark every output target on a mid-sized lesson.
fn bench_targets(c: &mut Criterion) {
    let lesson = create_test_lesson(10);
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("targets");

    group.bench_function("html", |b| {
        b.iter(|| adaptdoc::to_html(black_box(&lesson), &options));
    });

    group.bench_function("docx", |b| {
        b.iter(|| adaptdoc::to_docx(black_box(&lesson), &options).unwrap());
    });

    group.bench_function("pptx", |b| {
        b.iter(|| adaptdoc::to_pptx(black_box(&lesson), &options).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_tokenizing, bench_targets);
criterion_main!(benches);
