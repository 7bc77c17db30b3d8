use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mlkit::{traits::Fit, Dataset};
use mlkit_nn::{distance::L2Dist, KnnParams};
use ndarray::{Array1, Array2};
use ndarray_rand::{rand::SeedableRng, rand_distr::Uniform, RandomExt};
use rand_xoshiro::Xoshiro256Plus;

fn predict_batch_bench(c: &mut Criterion) {
    let mut rng = Xoshiro256Plus::seed_from_u64(40);
    let mut benchmark = c.benchmark_group("predict_batch");
    let n_features = 3;
    let n_queries = 100;
    let distr = Uniform::new(-500., 500.);

    for &(n_points, k) in &[(1000, 5), (10000, 5), (10000, 100)] {
        let records = Array2::random_using((n_points, n_features), distr, &mut rng);
        let targets = Array1::random_using(n_points, Uniform::new(0usize, 4), &mut rng);
        let train = Dataset::new(records, targets);
        let queries = Array2::random_using((n_queries, n_features), distr, &mut rng);

        let model = KnnParams::with_distance(L2Dist).k(k).fit(&train).unwrap();
        benchmark.bench_with_input(
            BenchmarkId::new("linear search", format!("{}-{}", n_points, k)),
            &queries,
            |bencher, queries| {
                bencher.iter(|| {
                    let out = model.predict_batch(queries).unwrap();
                    assert_eq!(out.len(), n_queries);
                });
            },
        );
    }

    benchmark.finish();
}

criterion_group!(benches, predict_batch_bench);
criterion_main!(benches);
