use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use storedesk_core::{Money, ProductId};
use storedesk_sales::SaleDraft;

fn draft_with_lines(n: usize) -> SaleDraft {
    let mut draft = SaleDraft::open();
    draft.set_seller_name("Bench");
    for i in 0..n {
        let idx = draft.add_line();
        let id = ProductId::new(format!("PRD{i:04}")).unwrap();
        draft.set_line_product(idx, id, format!("Product {i}"), Money::new(1_000 + i as u64));
        draft.set_line_quantity(idx, (i % 7) as i64);
    }
    draft
}

/// Cost of one quantity edit (which recomputes the whole total) as the form grows.
fn bench_quantity_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity_edit");
    for lines in [5usize, 50, 500] {
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &lines, |b, &lines| {
            let mut draft = draft_with_lines(lines);
            let mut qty = 0i64;
            b.iter(|| {
                qty = (qty + 1) % 10;
                draft.set_line_quantity(black_box(lines / 2), black_box(qty));
                black_box(draft.total())
            });
        });
    }
    group.finish();
}

fn bench_build_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_payload");
    for lines in [5usize, 50, 500] {
        let draft = draft_with_lines(lines);
        group.bench_with_input(BenchmarkId::from_parameter(lines), &draft, |b, draft| {
            b.iter(|| black_box(draft.build_payload()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_quantity_edit, bench_build_payload);
criterion_main!(benches);
