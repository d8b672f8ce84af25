use criterion::{Criterion, black_box, criterion_group, criterion_main};
use receitario_core::{Dataset, NutritionFacts, RawRecipe, RecipeEnricher, render};

fn sample(title: &str, steps: usize) -> RawRecipe {
    RawRecipe {
        title: title.to_string(),
        ingredients: vec![
            "2 ovos".to_string(),
            "1 xícara de aveia".to_string(),
            "adoçante a gosto".to_string(),
        ],
        instructions: (1..=steps).map(|i| format!("Passo {i}")).collect(),
        nutrition: NutritionFacts {
            carbs: Some("12g".to_string()),
            calories: Some("150 kcal".to_string()),
            ..NutritionFacts::default()
        },
    }
}

fn bench_enrichment(c: &mut Criterion) {
    let enricher = RecipeEnricher::builtin().unwrap();

    let raws = vec![
        sample("Bolo de Cenoura Fit", 3),
        sample("Mousse de Maracujá Light", 5),
        sample("Frango Assado com Legumes", 8),
        sample("Pão de Queijo de Frigideira", 4),
        sample("Tapioca Recheada", 2),
    ];

    c.bench_function("enrich_single", |b| {
        b.iter(|| enricher.enrich(black_box(&raws[0]), 1));
    });

    c.bench_function("enrich_batch_5", |b| {
        b.iter(|| Dataset::build(&enricher, black_box(&raws)));
    });

    let dataset = Dataset::build(&enricher, &raws);
    c.bench_function("render_batch_5", |b| {
        b.iter(|| render(black_box(&dataset.recipes)).unwrap());
    });
}

criterion_group!(benches, bench_enrichment);
criterion_main!(benches);
