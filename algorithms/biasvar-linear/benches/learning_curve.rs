use biasvar::traits::Fit;
use biasvar::ParamGuard;
use biasvar_linear::{default_lambdas, RegularizedLinearRegression};
use biasvar_preprocessing::PolynomialPipeline;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench(c: &mut Criterion) {
    let data = biasvar_datasets::water_level().unwrap();
    let params = RegularizedLinearRegression::params().check().unwrap();
    let lambdas = default_lambdas::<f64>();

    let mut group = c.benchmark_group("biasvar_linear");
    for degree in [1, 4, 8] {
        let pipeline = PolynomialPipeline::params(degree)
            .check()
            .unwrap()
            .fit(&data.train)
            .unwrap();
        let train = pipeline.transform_dataset(data.train.clone()).unwrap();
        let valid = pipeline.transform_dataset(data.validation.clone()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("learning_curve", degree),
            &(&train, &valid),
            |b, (train, valid)| b.iter(|| params.learning_curve(*train, *valid).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("validation_curve", degree),
            &(&train, &valid),
            |b, (train, valid)| {
                b.iter(|| {
                    params
                        .validation_curve(&lambdas, *train, *valid)
                        .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
