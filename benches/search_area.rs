use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::NaiveDate;
use track_climate::{rank_stations, travel, LatLon, SearchArea, Track, TrackPoint};

/// A winding track of `n` points starting in Boulder, CO.
fn long_track(n: usize) -> Track {
    let start = LatLon(40.015, -105.2705);
    let points = (0..n)
        .map(|i| {
            let bearing = (i as f64 * 7.0) % 360.0;
            travel(start, bearing, i as f64 * 15.0).into()
        })
        .collect::<Vec<TrackPoint>>();
    let start_time = NaiveDate::from_ymd_opt(2023, 7, 14)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap();
    Track::new(points, start_time)
}

fn search_response(n: usize) -> Vec<u8> {
    let results: Vec<String> = (0..n)
        .map(|i| {
            let p = travel(LatLon(40.015, -105.2705), (i * 37 % 360) as f64, i as f64 * 900.0);
            format!(
                r#"{{"id":"ST{i:05}","name":"Station {i}","latitude":"{}","longitude":"{}"}}"#,
                p.0, p.1
            )
        })
        .collect();
    format!(r#"{{"results":[{}]}}"#, results.join(",")).into_bytes()
}

fn bench_search_area(c: &mut Criterion) {
    let track = long_track(20_000);
    c.bench_function("search_area_from_track", |b| {
        b.iter(|| SearchArea::from_track(black_box(&track)))
    });

    let area = SearchArea::from_track(&track).unwrap();
    let body = search_response(500);
    c.bench_function("rank_stations", |b| {
        b.iter(|| rank_stations(black_box(&body), black_box(&area)))
    });
}

criterion_group!(benches, bench_search_area);
criterion_main!(benches);
