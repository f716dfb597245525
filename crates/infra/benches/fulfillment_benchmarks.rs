use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use stockroom_core::{OrderId, ProductId};
use stockroom_infra::clock::FixedClock;
use stockroom_infra::fulfillment::FulfillmentEngine;
use stockroom_infra::notify::TracingNotifier;
use stockroom_infra::stores::{
    InMemoryBackend, InMemoryOrderStore, InMemoryProductStore, OrderStore, ProductStore,
};
use stockroom_orders::Order;
use stockroom_products::{Product, ProductCategory};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

fn bench_rule_evaluation_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_evaluation_latency");
    group.sample_size(1000);

    // Stock stays deep in the in-stock path for the whole run.
    let cases = [
        ("normal", ProductCategory::Normal { lead_time_days: 15 }),
        (
            "seasonal",
            ProductCategory::Seasonal {
                season_start_date: today() - Duration::days(2),
                season_end_date: today() + Duration::days(58),
            },
        ),
        (
            "expirable",
            ProductCategory::Expirable {
                expiry_date: today() + Duration::days(26),
            },
        ),
        (
            "flash_sale",
            ProductCategory::FlashSale {
                season_start_date: today() - Duration::days(1),
                season_end_date: today() + Duration::days(7),
            },
        ),
    ];

    for (name, category) in cases {
        group.bench_function(name, |b| {
            let product =
                Product::new(ProductId::new(), "Bench Product", 1_000_000_000, category).unwrap();
            b.iter(|| black_box(product.fulfill(black_box(today()))));
        });
    }

    group.finish();
}

fn bench_order_processing_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_processing_throughput");

    for item_count in [1usize, 10, 100].iter() {
        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("process_order", item_count),
            item_count,
            |b, &count| {
                let backend = Arc::new(InMemoryBackend::new());
                let products = InMemoryProductStore::new(backend.clone());
                let orders = InMemoryOrderStore::new(backend.clone());

                let mut items = Vec::with_capacity(count);
                for i in 0..count {
                    let product = Product::new(
                        ProductId::new(),
                        format!("Bench Product {i}"),
                        1_000_000_000,
                        ProductCategory::Normal { lead_time_days: 15 },
                    )
                    .unwrap();
                    items.push(products.save(product).unwrap());
                }
                let order_id = OrderId::new();
                orders.save(Order::new(order_id, items)).unwrap();

                let engine = FulfillmentEngine::new(
                    orders,
                    products,
                    TracingNotifier::new(),
                    FixedClock::new(today()),
                );

                b.iter(|| black_box(engine.process_order(black_box(order_id)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rule_evaluation_latency,
    bench_order_processing_throughput
);
criterion_main!(benches);
