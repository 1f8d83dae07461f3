// Criterion benchmarks for Area Advisor

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use area_advisor::core::{
    apply_filters, nearest_stop_distance_km, Advisor, Amenity, AreaFilters, DatasetStore,
    SuggestionQuery,
};
use area_advisor::models::{IncomeEntry, Listing, TransitStop};

fn create_listing(id: usize) -> Listing {
    Listing {
        location: format!("Area {}", id),
        latitude: 25.0 + (id as f64 * 0.0007) % 0.3,
        longitude: 55.1 + (id as f64 * 0.0011) % 0.3,
        price: 40000.0 + (id % 50) as f64 * 6000.0,
        property_type: if id % 3 == 0 { "Villa" } else { "Apartment" }.to_string(),
        bedrooms: (id % 7) as u32,
        school: id % 2 == 0,
        park: id % 3 != 0,
        supermarket: id % 5 != 0,
        furnished: id % 4 == 0,
        pet_friendly: id % 2 == 1,
        new_listing: id % 6 == 0,
        family_friendly: id % 3 == 1,
    }
}

fn create_stops(count: usize) -> Vec<TransitStop> {
    (0..count)
        .map(|i| TransitStop {
            stop_name: format!("Stop {}", i),
            latitude: 25.0 + i as f64 * 0.3 / count as f64,
            longitude: 55.1 + i as f64 * 0.3 / count as f64,
        })
        .collect()
}

fn create_store(listings: usize) -> DatasetStore {
    DatasetStore::new(
        (0..listings).map(create_listing).collect(),
        vec![
            IncomeEntry {
                profession: "Teacher".to_string(),
                avg_income: 120000.0,
            },
            IncomeEntry {
                profession: "Engineer".to_string(),
                avg_income: 240000.0,
            },
        ],
        create_stops(50),
    )
}

fn bench_nearest_stop(c: &mut Criterion) {
    let listing = create_listing(42);
    let stops = create_stops(50);

    c.bench_function("nearest_stop_50_stops", |b| {
        b.iter(|| nearest_stop_distance_km(black_box(&listing), black_box(&stops)))
    });
}

fn bench_filtering(c: &mut Criterion) {
    let store = create_store(1000);
    let filters = AreaFilters {
        amenities: vec![Amenity::School, Amenity::Park],
        property_type: Some("Apartment".to_string()),
        furnished: true,
        ..Default::default()
    };

    c.bench_function("filtering_1000_listings", |b| {
        b.iter(|| apply_filters(black_box(store.listings()), black_box(&filters)))
    });
}

fn bench_affordability(c: &mut Criterion) {
    let store = create_store(1000);
    let advisor = Advisor::default();

    c.bench_function("affordability_1000_listings", |b| {
        b.iter(|| advisor.compute_affordability(black_box(&store), &AreaFilters::default(), "teacher"))
    });
}

fn bench_suggestions(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggestions");
    let advisor = Advisor::default();

    for listing_count in [100, 500, 1000].iter() {
        let store = create_store(*listing_count);
        let query = SuggestionQuery {
            filters: AreaFilters {
                amenities: vec![Amenity::School],
                ..Default::default()
            },
            income: 150000.0,
            family_size: 5,
            max_proximity_km: 10.0,
        };

        group.bench_with_input(
            BenchmarkId::new("compute_suggestions", listing_count),
            listing_count,
            |b, _| {
                b.iter(|| advisor.compute_suggestions(black_box(&store), black_box(&query)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_nearest_stop,
    bench_filtering,
    bench_affordability,
    bench_suggestions
);

criterion_main!(benches);
