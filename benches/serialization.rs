use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigUint;
use serde::Serialize;
use serde_hamster::{base32, to_string, Dictionary};

#[derive(Serialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price_cents: u64,
    quantity: u32,
}

#[derive(Serialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products: Vec<Product> = (0..*size)
            .map(|i| Product {
                sku: format!("SKU{}", i),
                name: format!("Product {}", i),
                price_cents: 999 + u64::from(i),
                quantity: i,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_serialize_nested(c: &mut Criterion) {
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    };

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });
}

fn benchmark_string_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_strings");

    let short = "short";
    let medium = "This is a medium length string with some content";
    let long = "This is a very long string that contains a lot of text and might require more processing time";

    group.bench_function("short_string", |b| b.iter(|| to_string(black_box(&short))));

    group.bench_function("medium_string", |b| {
        b.iter(|| to_string(black_box(&medium)))
    });

    group.bench_function("long_string", |b| b.iter(|| to_string(black_box(&long))));

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<u32> = (0..100).collect();
    let bools: Vec<bool> = (0..100).map(|i| i % 2 == 0).collect();
    let floats: Vec<f64> = (0..100).map(f64::from).collect();

    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });

    group.bench_function("serialize_booleans", |b| {
        b.iter(|| to_string(black_box(&bools)))
    });

    group.bench_function("serialize_whole_floats", |b| {
        b.iter(|| to_string(black_box(&floats)))
    });

    group.finish();
}

fn benchmark_digit_packing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_digits");

    for width in [1u32, 4, 8, 11, 64].iter() {
        let max = if *width == 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        let digits: Vec<u64> = (1..=256u64).map(|i| i.wrapping_mul(0x9e37) & max).collect();

        group.bench_with_input(BenchmarkId::from_parameter(width), width, |b, width| {
            b.iter(|| base32::digits_to_base32(black_box(&digits), *width))
        });
    }
    group.finish();
}

fn benchmark_decimal_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_to_base32");

    for bits in [64u32, 128, 256, 1024].iter() {
        let decimal = (BigUint::from(1u32) << *bits).to_string();

        group.bench_with_input(BenchmarkId::from_parameter(bits), &decimal, |b, decimal| {
            b.iter(|| base32::decimal_to_base32(black_box(decimal)))
        });
    }
    group.finish();
}

fn benchmark_dictionary(c: &mut Criterion) {
    let corpus: Vec<String> = (0..500).map(|i| format!("field_name_{}", i)).collect();
    let dict = Dictionary::new(&corpus);

    let mut group = c.benchmark_group("dictionary");

    group.bench_function("build", |b| {
        b.iter(|| Dictionary::new(black_box(&corpus)))
    });

    group.bench_function("encode_string", |b| {
        b.iter(|| dict.encode(black_box("field_name_499")))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    let mut group = c.benchmark_group("comparison");

    group.bench_function("hamster_serialize", |b| {
        b.iter(|| serde_hamster::to_string(black_box(&user)))
    });

    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_serialize_array,
    benchmark_serialize_nested,
    benchmark_string_serialization,
    benchmark_primitive_array,
    benchmark_digit_packing,
    benchmark_decimal_conversion,
    benchmark_dictionary,
    benchmark_comparison_with_json
);
criterion_main!(benches);
