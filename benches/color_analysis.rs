use criterion::{black_box, criterion_group, criterion_main, Criterion};
use color_census::{
    rgb_to_lab, AnalysisConfig, ColorAnalyzer, DistanceFormula, KMeansClusterer, PaletteMatcher,
    ReferencePalette, Rgb,
};

fn samples(n: usize) -> Vec<Rgb> {
    let mut state = 0x2545_f491_u32;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            Rgb::new(r, g, b)
        })
        .collect()
}

fn benchmark_conversion(c: &mut Criterion) {
    c.bench_function("rgb_to_lab", |b| {
        b.iter(|| rgb_to_lab(black_box(Rgb::new(200, 120, 40))))
    });
}

fn benchmark_delta_e(c: &mut Criterion) {
    let x = rgb_to_lab(Rgb::new(200, 120, 40));
    let y = rgb_to_lab(Rgb::new(30, 90, 160));

    let mut group = c.benchmark_group("delta_e");
    for formula in DistanceFormula::ALL {
        group.bench_function(formula.name(), |b| {
            b.iter(|| formula.distance(black_box(x), black_box(y)))
        });
    }
    group.finish();
}

fn benchmark_tally(c: &mut Criterion) {
    let palette = ReferencePalette::builtin();
    let matcher = PaletteMatcher::new(&palette);
    let samples = samples(1600);

    c.bench_function("tally_1600_ciede2000", |b| {
        b.iter(|| matcher.tally(black_box(&samples), DistanceFormula::Ciede2000))
    });
}

fn benchmark_kmeans(c: &mut Criterion) {
    let clusterer = KMeansClusterer::default();
    let samples = samples(1600);

    c.bench_function("kmeans_1600_k5_i6", |b| {
        b.iter(|| clusterer.cluster(black_box(&samples)))
    });
}

fn benchmark_full_pass(c: &mut Criterion) {
    let palette = ReferencePalette::builtin();
    let analyzer = ColorAnalyzer::new(AnalysisConfig::default()).unwrap();
    let samples = samples(1600);

    c.bench_function("analyze_1600", |b| {
        b.iter(|| analyzer.analyze(&palette, black_box(&samples)))
    });
}

criterion_group!(
    benches,
    benchmark_conversion,
    benchmark_delta_e,
    benchmark_tally,
    benchmark_kmeans,
    benchmark_full_pass
);
criterion_main!(benches);
