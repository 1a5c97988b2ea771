use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use icall_core::{CallEntry, CallFlags, LookupStrategy, NativeFn, Registry, RegistryConfig};
use strum::IntoEnumIterator;

extern "C" fn native_stub() {}

/// A corlib-sized table: ~400 ids spread over a sparse token range.
fn corlib_like_table() -> Vec<CallEntry> {
    (0..400u32)
        .map(|i| {
            let id = 186 + i * 28 + (i % 5);
            let flags = if i % 3 == 0 { 0 } else { 4 };
            CallEntry::new(id, NativeFn::new(native_stub as *const ()), CallFlags::from_raw(flags))
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let table = corlib_like_table();
    let probes: Vec<u32> = table.iter().map(|entry| entry.id.get()).collect();
    let config = RegistryConfig {
        max_direct_span: 1 << 20,
        ..RegistryConfig::default()
    };

    let mut group = c.benchmark_group("lookup");
    for strategy in LookupStrategy::iter().filter(|s| *s != LookupStrategy::Auto) {
        let registry = Registry::builder("corlib")
            .config(config.clone().with_strategy(strategy))
            .entries(table.iter().copied())
            .build()
            .expect("benchmark table is valid");

        group.bench_with_input(BenchmarkId::from_parameter(strategy), &registry, |b, registry| {
            b.iter(|| {
                for &id in &probes {
                    black_box(registry.lookup(black_box(id)).ok());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
