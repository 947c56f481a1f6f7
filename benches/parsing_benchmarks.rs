use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use coin_explorer::blockchain::response_parser::{BLOCKCHAIN_INFO_ERRORS, SATOSHI_DIVISOR};
use coin_explorer::blockchain::{ConfirmationResolver, ErrorClassifier, ResponseParser};
use coin_explorer::models::{QueryKind, BITCOIN_ADDRESS_RULE};

fn bench_address_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("address_validation");

    let addresses = [
        ("genesis", "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
        ("p2sh", "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy"),
        ("bad_prefix", "VA1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa"),
        ("bad_chars", "1A1zP1eP5QGefi2DMPTfTL5SLmv7Div-Na"),
        ("too_short", "1A1zP1eP5"),
    ];

    for (name, address) in addresses.iter() {
        group.bench_with_input(BenchmarkId::new("is_valid", name), address, |b, address| {
            b.iter(|| BITCOIN_ADDRESS_RULE.is_valid(black_box(address)));
        });
    }

    group.finish();
}

fn bench_response_parsing(c: &mut Criterion) {
    let parser = ResponseParser::new(SATOSHI_DIVISOR, ErrorClassifier::new(BLOCKCHAIN_INFO_ERRORS));
    let mut group = c.benchmark_group("response_parsing");

    let bodies = [
        ("balance", "6812000000", QueryKind::Balance),
        ("padded_balance", "  500000000\n", QueryKind::Balance),
        ("checksum_error", "Checksum does not validate", QueryKind::Balance),
        ("rate_limited", "Maximum concurrent requests reached. Try later.", QueryKind::Balance),
        ("block_count", "850000", QueryKind::BlockCount),
        ("difficulty", "86871474313761.95", QueryKind::Difficulty),
    ];

    for (name, body, kind) in bodies.iter() {
        group.bench_with_input(BenchmarkId::new("parse", name), body, |b, body| {
            b.iter(|| {
                let _ = parser.parse(black_box(body), *kind);
            });
        });
    }

    group.finish();
}

fn bench_confirmations(c: &mut Criterion) {
    let resolver = ConfirmationResolver::with_ceiling(120);

    c.bench_function("confirmations_between", |b| {
        b.iter(|| {
            for target in (800_000u64..800_200).step_by(7) {
                black_box(resolver.confirmations_between(black_box(800_150), target));
            }
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(100);
    targets = bench_address_validation, bench_response_parsing, bench_confirmations
);
criterion_main!(benches);
