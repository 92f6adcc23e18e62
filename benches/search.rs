use criterion::{criterion_group, criterion_main, Criterion};

use alchemist::{Catalog, IngredientEffectTable, SortKey, SortOrder, SortState};

/// A synthetic table shaped like the game's: 120 ingredients with four
/// effects each, drawn from 40 effects.
fn make_catalog() -> Catalog {
    let mut builder = IngredientEffectTable::builder();
    for i in 0..120u32 {
        let effects: Vec<(String, f64, f64)> = (0..4u32)
            .map(|k| {
                let effect = (i * 7 + k * 11) % 40;
                (
                    format!("Effect {effect:02}"),
                    f64::from(1 + (i + k) % 9),
                    f64::from(5 * ((i * k) % 13)),
                )
            })
            .collect();
        builder = builder.ingredient(format!("Ingredient {i:03}"), effects);
    }
    Catalog::new(builder.build().unwrap())
}

fn bench_search(c: &mut Criterion) {
    let catalog = make_catalog();

    c.bench_function("search/one_effect", |b| {
        b.iter(|| catalog.search_candidates(&["Effect 07"]));
    });

    c.bench_function("search/three_effects", |b| {
        b.iter(|| catalog.search_candidates(&["Effect 07", "Effect 18", "Effect 29"]));
    });

    let sort = SortState::new(SortKey::Magnitude("Effect 07".to_string()), SortOrder::Descending);
    c.bench_function("search/find_potions_sorted", |b| {
        b.iter(|| catalog.find_potions(&["Effect 07", "Effect 18"], &sort));
    });
}

fn bench_queries(c: &mut Criterion) {
    let catalog = make_catalog();

    c.bench_function("query/selectable_after_two", |b| {
        b.iter(|| catalog.selectable_ingredients(&["Ingredient 001", "Ingredient 002"], ""));
    });
}

criterion_group!(benches, bench_search, bench_queries);
criterion_main!(benches);
