use std::sync::Arc;

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use jammer_core::{Catalog, MAX_MODULES, Session, Tier};

// Ten modules spread over the grid, alternating tiers, with a battery so
// every derived value is populated.
fn full_session(catalog: &Arc<Catalog>) -> Session {
    let mut s = Session::new(Arc::clone(catalog)).unwrap_or_else(|e| panic!("{e}"));
    let ids: Vec<String> = s
        .bands()
        .iter()
        .step_by(5)
        .take(MAX_MODULES)
        .map(|b| b.id.clone())
        .collect();
    for (i, id) in ids.iter().enumerate() {
        let tier = if i % 2 == 0 { Tier::W50 } else { Tier::W100 };
        s.set_band_tier(id, tier).unwrap_or_else(|e| panic!("{e}"));
    }
    s.set_battery("6kW").unwrap_or_else(|e| panic!("{e}"));
    s
}

pub fn bench_quote(c: &mut Criterion) {
    let mut g = c.benchmark_group("quote");
    //   BENCH_SAMPLE_SIZE=10 BENCH_MEAS_MS=50 cargo bench -p jammer_core --bench quote
    if let Ok(ss) = std::env::var("BENCH_SAMPLE_SIZE") {
        if let Ok(n) = ss.parse::<usize>() {
            g.sample_size(n.max(1));
        }
    } else {
        g.sample_size(50);
    }
    if let Ok(ms) = std::env::var("BENCH_MEAS_MS")
        && let Ok(ms_u64) = ms.parse::<u64>()
    {
        g.measurement_time(std::time::Duration::from_millis(ms_u64));
    }

    let catalog = Arc::new(Catalog::builtin().unwrap_or_else(|e| panic!("{e}")));
    let session = full_session(&catalog);

    g.bench_function("price_full_build", |b| {
        b.iter(|| black_box(black_box(&session).price()))
    });
    g.bench_function("quote_full_build", |b| {
        b.iter(|| black_box(black_box(&session).quote()))
    });
    g.bench_function("toggle_and_price", |b| {
        b.iter_batched(
            || full_session(&catalog),
            |mut s| {
                let _ = s.set_band_tier("400-500", Tier::None);
                let _ = s.set_band_tier("5900-6000", Tier::W100);
                black_box(s.price())
            },
            BatchSize::SmallInput,
        )
    });
    g.finish();
}

criterion_group!(quote, bench_quote);
criterion_main!(quote);
