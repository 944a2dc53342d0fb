use criterion::{black_box, criterion_group, criterion_main, Criterion};
use handles::{HandleKind, HandleTable};

#[derive(Default)]
struct Channel {
    _index: u8,
}

fn resolve(c: &mut Criterion) {
    let table: HandleTable<Channel, 16> = HandleTable::new(HandleKind::AnalogOutput);
    let handle = table.allocate(3).unwrap();

    c.bench_function("get live handle", |b| {
        b.iter(|| table.get(black_box(handle)).is_some())
    });

    let stale = handle;
    table.free(handle);
    c.bench_function("get stale handle", |b| {
        b.iter(|| table.get(black_box(stale)).is_none())
    });
}

fn churn(c: &mut Criterion) {
    let table: HandleTable<Channel, 16> = HandleTable::new(HandleKind::AnalogOutput);

    c.bench_function("allocate + free", |b| {
        b.iter(|| {
            let handle = table.allocate_any().unwrap();
            table.free(black_box(handle));
        })
    });
}

criterion_group!(benches, resolve, churn);
criterion_main!(benches);
