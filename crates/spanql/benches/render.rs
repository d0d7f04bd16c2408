use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use spanql::prelude::*;
use spanql::{insert, select};

/// SELECT col0, col1, ... FROM t WHERE col0 = 0 AND col1 = 1 ...
fn build_select(n: usize) -> spanql::SelectStmt {
    let columns: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let conds: Vec<Condition> = (0..n)
        .map(|i| eq(ident([format!("col{i}")]), i as i64))
        .collect();
    select("t", columns).and_where_all(conds).limit(100)
}

fn bench_select_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/select");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        let config = RenderConfig::new().disable_logging();
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.sql_with(&config)));
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/insert_rows");

    for n in [1, 10, 100, 1000] {
        let rows: Vec<(i64, String, Option<f64>)> = (0..n)
            .map(|i| (i, format!("name \"{i}\""), (i % 2 == 0).then_some(i as f64 / 3.0)))
            .collect();
        let config = RenderConfig::new().disable_logging();
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| {
                let stmt = insert("t", ["id", "name", "score"]).values(rows.iter().cloned());
                black_box(stmt.sql_with(&config))
            });
        });
    }

    group.finish();
}

fn bench_nested_conditions(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/nested_conditions");

    for depth in [2, 8, 32] {
        let mut cond = eq(ident(["a"]), 0);
        for i in 1..depth {
            let leaf = eq(ident(["a"]), i);
            cond = if i % 2 == 0 {
                and([cond, leaf])
            } else {
                or([leaf, cond])
            };
        }
        group.bench_with_input(BenchmarkId::from_parameter(depth), &cond, |b, cond| {
            b.iter(|| black_box(spanql::expr_to_sql(cond)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_select_render,
    bench_insert_rows,
    bench_nested_conditions
);
criterion_main!(benches);
