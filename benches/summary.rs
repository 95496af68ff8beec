use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_xlsxwriter::Workbook;

use sheet_summary::ingestion::parse;
use sheet_summary::processing::summarize;
use sheet_summary::types::ColumnRequest;

const ROWS: u32 = 10_000;

fn synthetic_workbook() -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    for (col, name) in ["id", "amount", "label"].iter().enumerate() {
        ws.write_string(0, col as u16, *name).unwrap();
    }
    for row in 1..=ROWS {
        ws.write_number(row, 0, row).unwrap();
        if row % 10 == 0 {
            ws.write_string(row, 1, "n/a").unwrap();
        } else {
            ws.write_number(row, 1, f64::from(row) * 1.25).unwrap();
        }
        ws.write_string(row, 2, "row").unwrap();
    }
    wb.save_to_buffer().unwrap()
}

fn bench_summary(c: &mut Criterion) {
    let bytes = synthetic_workbook();
    let doc = parse(&bytes).unwrap();
    let request = ColumnRequest::new(["amount", "id", "missing"]);

    let mut group = c.benchmark_group("summary");
    group.sample_size(20);
    group.throughput(Throughput::Elements(u64::from(ROWS)));

    group.bench_function("parse", |b| b.iter(|| parse(black_box(&bytes)).unwrap()));
    group.bench_function("summarize", |b| {
        b.iter(|| summarize(black_box(&doc), black_box(&request)).unwrap())
    });
    group.bench_function("summarize_all", |b| {
        b.iter(|| summarize(black_box(&doc), &ColumnRequest::all()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
