use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lexiscope_core::keywords::KeywordRanker;
use lexiscope_core::{Analyzer, AnalyzerConfig, ContentSelector, Document, NullSink, linguistics, normalize};

fn bench_parse(c: &mut Criterion) {
    let article = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap();
    let gallery = std::fs::read_to_string("../../tests/fixtures/no_content.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("article", "2KB"), &article, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("gallery", "300B"), &gallery, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_full_analysis(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap();
    let analyzer = Analyzer::offline(NullSink, AnalyzerConfig::default()).unwrap();

    c.bench_function("full_analysis", |b| {
        b.iter(|| analyzer.analyze_html("https://example.com", black_box(&html), "nologinuser"))
    });
}

fn clean_article_text() -> (String, String) {
    let html = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap();
    let doc = Document::parse(&html);
    let selector = ContentSelector::from_config(&AnalyzerConfig::default()).unwrap();
    let raw = selector.extract(&doc).raw_text;
    (normalize(&raw), raw)
}

fn bench_linguistics(c: &mut Criterion) {
    let (clean, raw) = clean_article_text();

    c.bench_function("linguistics", |b| {
        b.iter(|| linguistics::analyze(black_box(&clean), black_box(&raw)))
    });
}

fn bench_keywords(c: &mut Criterion) {
    let (clean, _) = clean_article_text();
    let ranker = KeywordRanker::default();

    c.bench_function("keyword_ranking", |b| b.iter(|| ranker.rank(black_box(&clean))));
}

criterion_group!(benches, bench_parse, bench_full_analysis, bench_linguistics, bench_keywords);
criterion_main!(benches);
