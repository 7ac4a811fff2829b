use bytelay_core::{from_bytes, to_bytes, Layout, Len, PrimKind, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn counted_records(n: usize) -> (Layout, Value) {
    let entry = Layout::record([
        ("id", Layout::primitive(PrimKind::U32)),
        ("score", Layout::primitive(PrimKind::F64)),
        ("tag", Layout::ascii(8)),
    ]);
    let layout = Layout::record([
        ("count", Layout::primitive(PrimKind::U32)),
        ("entries", Layout::array(entry, Len::of_field("count"))),
    ]);

    let value = Value::record([
        ("count", Value::UInt(n as u64)),
        (
            "entries",
            Value::seq((0..n).map(|i| {
                Value::record([
                    ("id", Value::UInt(i as u64)),
                    ("score", Value::Float(i as f64 * 0.5)),
                    ("tag", Value::Str("entry 00".to_owned())),
                ])
            })),
        ),
    ]);

    (layout, value)
}

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");

    for n in [16, 256, 4096] {
        let (layout, value) = counted_records(n);
        let encoded_len = to_bytes(&layout, &value).unwrap().len();

        group.throughput(Throughput::Bytes(encoded_len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| to_bytes(black_box(&layout), black_box(&value)).unwrap());
        });
    }

    group.finish();
}

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");

    for n in [16, 256, 4096] {
        let (layout, value) = counted_records(n);
        let encoded = to_bytes(&layout, &value).unwrap();

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &encoded, |b, data| {
            b.iter(|| from_bytes(black_box(data), &layout).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_write, bench_read);
criterion_main!(benches);
