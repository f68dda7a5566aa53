use std::fmt::Write;

use area_stats::ingestion::{ImportFilters, SourceFormat, YearRange, datasets, populate};
use area_stats::model::AreaStore;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const YEARS: std::ops::RangeInclusive<u32> = 1991..=2020;

fn area_code(i: usize) -> String {
    format!("W{:08}", 6_000_000 + i)
}

fn names_csv(areas: usize) -> String {
    let mut out = String::from("Local authority code,Name (eng),Name (cym)\n");
    for i in 0..areas {
        let _ = writeln!(out, "{},Area {i},Ardal {i}", area_code(i));
    }
    out
}

fn wide_csv(areas: usize) -> String {
    let mut out = String::from("AuthorityCode");
    for y in YEARS {
        let _ = write!(out, ",{y}");
    }
    out.push('\n');
    for i in 0..areas {
        out.push_str(&area_code(i));
        for y in YEARS {
            let _ = write!(out, ",{}", (i as u32 * 31 + y) as f64 * 1.5);
        }
        out.push('\n');
    }
    out
}

fn stats_json(areas: usize) -> String {
    let mut records = Vec::new();
    for i in 0..areas {
        for (m, label) in [("Pop", "Population"), ("Dens", "Population density")] {
            for y in YEARS {
                records.push(serde_json::json!({
                    "Localauthority_Code": area_code(i),
                    "Localauthority_ItemName_ENG": format!("Area {i}"),
                    "Measure_Code": m,
                    "Measure_ItemName_ENG": label,
                    "Year_Code": y.to_string(),
                    "Data": ((i as u32) + y).to_string(),
                }));
            }
        }
    }
    serde_json::json!({ "value": records }).to_string()
}

fn bench_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingestion");
    let areas = datasets::areas();
    let pop = datasets::find("complete-pop").expect("registry has complete-pop");
    let popden = datasets::find("popden").expect("registry has popden");
    let filtered = ImportFilters::all().with_years(YearRange::new(2010, 2015));

    for n in [22usize, 500] {
        let names = names_csv(n);
        group.bench_with_input(BenchmarkId::new("authority_code_csv", n), &names, |b, input| {
            b.iter(|| {
                let mut store = AreaStore::new();
                populate(&mut store, input.as_bytes(), areas.format, &areas.columns, &ImportFilters::all())
                    .unwrap();
                black_box(store.len())
            })
        });

        let wide = wide_csv(n);
        group.bench_with_input(BenchmarkId::new("authority_by_year_csv", n), &wide, |b, input| {
            b.iter(|| {
                let mut store = AreaStore::new();
                populate(&mut store, input.as_bytes(), pop.format, &pop.columns, &filtered).unwrap();
                black_box(store.len())
            })
        });

        let json = stats_json(n);
        group.bench_with_input(BenchmarkId::new("stats_json", n), &json, |b, input| {
            b.iter(|| {
                let mut store = AreaStore::new();
                populate(&mut store, input.as_bytes(), SourceFormat::StatsJson, &popden.columns, &filtered)
                    .unwrap();
                black_box(store.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ingestion);
criterion_main!(benches);
