use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taxui_core::options::filter_options;
use taxui_core::page::OptionEntry;
use taxui_core::sort::{sorted_order, SortDirection};

fn bench_filter(c: &mut Criterion) {
    let mut options = vec![OptionEntry::placeholder("Select an association")];
    options.extend((0..200).map(|i| OptionEntry::new(i.to_string(), format!("Association {i}"))));

    c.bench_function("filter_options/200", |b| {
        b.iter(|| filter_options(black_box(&options), black_box("1")))
    });
}

fn bench_sort(c: &mut Criterion) {
    let rows: Vec<(String, String)> = (0..200)
        .map(|i| (format!("r{i}"), ((i * 37) % 211).to_string()))
        .collect();

    c.bench_function("sorted_order/200", |b| {
        b.iter(|| sorted_order(black_box(&rows), "units", SortDirection::Ascending))
    });
}

criterion_group!(benches, bench_filter, bench_sort);
criterion_main!(benches);
