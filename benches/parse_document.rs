use criterion::{Criterion, black_box, criterion_group, criterion_main};

use annual_calendar::EphemerisParser;
use annual_calendar::app::services::ephemeris_parser::HeaderLayout;

const COMPLETE_EXPORT: &str = include_str!("../tests/fixtures/complete-10d.txt");

/// Build a year of daily sun rows from the first block of the fixture
fn daily_export() -> String {
    let mut lines = COMPLETE_EXPORT.lines();
    let metadata = lines.next().unwrap_or_default();
    let header = lines.nth(2).unwrap_or_default();
    let row = lines.next().unwrap_or_default();

    let mut document = format!("{}\n\nSonne\n{}\n", metadata, header);
    for _ in 0..365 {
        document.push_str(row);
        document.push('\n');
    }
    document
}

fn bench_parse_complete_export(c: &mut Criterion) {
    let parser = EphemerisParser::default();

    c.bench_function("parse_str/complete-10d", |b| {
        b.iter(|| parser.parse_str(black_box(COMPLETE_EXPORT)))
    });
}

fn bench_parse_daily_export(c: &mut Criterion) {
    let parser = EphemerisParser::default();
    let document = daily_export();

    c.bench_function("parse_str/sun-365-rows", |b| {
        b.iter(|| parser.parse_str(black_box(&document)))
    });
}

fn bench_resolve_header(c: &mut Criterion) {
    let header = COMPLETE_EXPORT.lines().nth(3).unwrap_or_default();

    c.bench_function("HeaderLayout::resolve/sun", |b| {
        b.iter(|| HeaderLayout::resolve(black_box(header)))
    });
}

criterion_group!(
    benches,
    bench_parse_complete_export,
    bench_parse_daily_export,
    bench_resolve_header
);
criterion_main!(benches);
