//! Performance benchmarks for address book queries.
//!
//! These benchmarks measure:
//! - Upcoming-birthday queries over books of different sizes
//! - Contact search with different confidence thresholds

use chrono::{Days, NaiveDate};
use contact_book::matching::ContactMatcher;
use contact_book::{AddressBook, Birthday, Record};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

/// Build a book of `size` contacts with birthdays spread over the year.
fn create_test_book(size: usize) -> AddressBook {
    let base = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
    (0..size)
        .map(|i| {
            let mut record = Record::with_name(&format!("Contact {:05}", i)).unwrap();
            record.add_phone(&format!("{:010}", i)).unwrap();
            let born = base.checked_add_days(Days::new((i * 37 % 365) as u64)).unwrap();
            record.add_birthday(&Birthday::from_date(born).to_string()).unwrap();
            record
        })
        .collect()
}

/// Benchmark the upcoming-birthday query with different book sizes.
fn bench_upcoming_birthdays(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let mut group = c.benchmark_group("upcoming_birthdays");

    for size in [100, 1_000, 10_000].iter() {
        let book = create_test_book(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &book, |b, book| {
            b.iter(|| black_box(book.upcoming_birthdays(black_box(today), 7)));
        });
    }

    group.finish();
}

/// Benchmark search with different confidence thresholds.
fn bench_search_confidence_thresholds(c: &mut Criterion) {
    let book = create_test_book(1_000);
    let matcher = ContactMatcher::new();
    let mut group = c.benchmark_group("search_confidence_thresholds");

    for confidence in [30, 50, 70, 90].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(confidence),
            confidence,
            |b, &confidence| {
                b.iter(|| {
                    black_box(matcher.find_matches(
                        black_box("contact 0042"),
                        book.records(),
                        10,
                        confidence,
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = bench_upcoming_birthdays,
        bench_search_confidence_thresholds
}

criterion_main!(benches);
