//! Hostname ordering and matching benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hostname::Hostname;
use std::collections::BTreeSet;

fn hosts() -> Vec<Hostname> {
    let tlds = ["com", "net", "org", "io", "co.uk"];
    let mut out = Vec::new();
    for (i, tld) in tlds.iter().cycle().take(1000).enumerate() {
        let text = format!("host{}.zone{}.{}", i, i % 37, tld);
        out.push(Hostname::parse(&text).unwrap());
    }
    out
}

fn sort_hosts(c: &mut Criterion) {
    let input = hosts();

    c.bench_function("sort_1000_hosts", |b| {
        b.iter(|| {
            let mut sorted = input.clone();
            sorted.sort();
            black_box(sorted)
        })
    });

    c.bench_function("btreeset_1000_hosts", |b| {
        b.iter(|| black_box(input.iter().cloned().collect::<BTreeSet<_>>()))
    });
}

fn matching(c: &mut Criterion) {
    let input = hosts();
    let zone = Hostname::parse("zone3.com").unwrap();

    c.bench_function("subdomain_scan_1000", |b| {
        b.iter(|| input.iter().filter(|h| h.is_subdomain_of(&zone)).count())
    });

    c.bench_function("has_any_tld_1000", |b| {
        b.iter(|| {
            input
                .iter()
                .filter(|h| h.has_any_tld(black_box(["io", "uk"])))
                .count()
        })
    });
}

criterion_group!(benches, sort_hosts, matching);
criterion_main!(benches);
