//! Criterion benchmarks for the per-key-event hot path.
//!
//! Every key event goes through a mapping index lookup followed by one
//! action resolution per matching mapping.  Both should stay far below the
//! cost of the board round-trip they may trigger.
//!
//! Run with:
//! ```bash
//! cargo bench --package relayctrl-core --bench mapping_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use relayctrl_core::{
    resolve_action, ChordMapping, KeyCode, MappingIndex, ModifierKey, ModifierSet,
};

/// Builds `count` mappings spread over the letter keys, alternating modes.
fn mappings(count: u32) -> Vec<ChordMapping> {
    (0..count)
        .map(|i| {
            let key = 0x41 + (i % 26) as KeyCode;
            let mut m = ChordMapping::blank(i);
            m.key = key;
            m.relay_number = (i % 16 + 1) as u16;
            m.toggle = i % 2 == 0;
            if i % 3 == 0 {
                m.modifiers = ModifierSet::new().with(ModifierKey::LeftCtrl, true);
            }
            m
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for count in [16u32, 128, 1024] {
        let source = mappings(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, src| {
            b.iter(|| MappingIndex::build(black_box(src)));
        });
    }
    group.finish();
}

fn bench_lookup_and_resolve(c: &mut Criterion) {
    let index = MappingIndex::build(&mappings(128));
    let live = ModifierSet::new().with(ModifierKey::LeftCtrl, true);

    c.bench_function("lookup_and_resolve", |b| {
        b.iter(|| {
            let mut switches = 0usize;
            for key in 0x41..=0x5A {
                for m in index.lookup(black_box(key)) {
                    if matches!(
                        resolve_action(m, &live, 0, 0),
                        relayctrl_core::RelayAction::Switch(_)
                    ) {
                        switches += 1;
                    }
                }
            }
            switches
        });
    });

    c.bench_function("lookup_unmapped_key", |b| {
        b.iter(|| index.lookup(black_box(0x7B)).len());
    });
}

criterion_group!(benches, bench_index_build, bench_lookup_and_resolve);
criterion_main!(benches);
