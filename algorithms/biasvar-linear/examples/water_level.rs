use std::error::Error;

use biasvar::metrics::Regression;
use biasvar::traits::{Fit, Predict};
use biasvar::{Dataset, ParamGuard};
use biasvar_linear::{
    add_intercept, regularized_cost, regularized_gradient, LearningCurve,
    RegularizedLinearRegression, DEFAULT_LAMBDAS,
};
use biasvar_preprocessing::PolynomialPipeline;
use ndarray::{array, Array, Array1, ArrayView1, Axis};
use textplots::{Chart, Plot, Shape};

const DEGREE: usize = 8;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Read in the training, validation and test splits
    let data = biasvar_datasets::water_level()?;
    let (xmin, xmax) = range(&data.train);

    println!("Water flowing out of the dam against change in water level");
    Chart::new(180, 60, xmin as f32, xmax as f32)
        .lineplot(&Shape::Points(&points(&data.train)))
        .display();

    // Cost and gradient of the regularized hypothesis at θ = [1, 1] with λ = 1
    //
    // cost: 303.993192
    // gradient: [-15.303016, 598.250744]
    let design = add_intercept(data.train.records());
    let theta = array![1., 1.];
    let cost = regularized_cost(&theta, &design, data.train.targets(), 1.)?;
    let gradient = regularized_gradient(&theta, &design, data.train.targets(), 1.)?;
    println!("cost at theta = [1, 1]: {:.6}", cost);
    println!("gradient at theta = [1, 1]: {:.6}", gradient);

    // A straight line underfits the data
    //
    // params: [13.087904, 0.367779]
    let linear = RegularizedLinearRegression::params().lambda(0.).check()?;
    let model = linear.fit(&data.train)?;
    println!("linear fit params: {:.6}", model.theta());
    println!(
        "linear fit R2 on the validation set: {:.6}",
        model
            .predict(&data.validation)
            .r2(data.validation.targets())?
    );

    let grid = Array::range(xmin, xmax, 0.05).insert_axis(Axis(1));
    let line = model.predict(&grid);
    println!("Linear fit");
    Chart::new(180, 60, xmin as f32, xmax as f32)
        .lineplot(&Shape::Points(&points(&data.train)))
        .lineplot(&Shape::Lines(&curve(grid.column(0), line.view())))
        .display();

    // Both errors stay high for larger training sets: high bias
    let learning_curve = linear.learning_curve(&data.train, &data.validation)?;
    println!("Learning curve for linear regression");
    print_learning_curve(&learning_curve);

    // Map onto polynomial features and normalize with the training statistics
    let pipeline = PolynomialPipeline::params(DEGREE)
        .check()?
        .fit(&data.train)?;
    let train = pipeline.transform_dataset(data.train.clone())?;
    let valid = pipeline.transform_dataset(data.validation.clone())?;
    let test = pipeline.transform_dataset(data.test.clone())?;
    println!(
        "first normalized training example: {:.6}",
        train.records().row(0)
    );

    // Without regularization the polynomial follows the training data closely
    let polynomial = RegularizedLinearRegression::params().lambda(0.).check()?;
    let model = polynomial.fit(&train)?;

    let grid = Array::range(xmin - 15., xmax + 25., 0.05).insert_axis(Axis(1));
    let fitted = model.predict(&pipeline.transform(&grid)?);
    println!("Polynomial regression fit (lambda = 0)");
    Chart::new(180, 60, (xmin - 15.) as f32, (xmax + 25.) as f32)
        .lineplot(&Shape::Points(&points(&data.train)))
        .lineplot(&Shape::Lines(&curve(grid.column(0), fitted.view())))
        .display();

    // Small training error with a large gap to the validation error: high variance
    let learning_curve = polynomial.learning_curve(&train, &valid)?;
    println!("Polynomial regression learning curve (lambda = 0)");
    print_learning_curve(&learning_curve);

    // Select the regularization strength on the validation set
    let validation_curve = polynomial.validation_curve(&DEFAULT_LAMBDAS, &train, &valid)?;
    println!("lambda\t\tTrain Error\tValidation Error");
    for (lambda, train_error, valid_error) in validation_curve.iter() {
        println!("{}\t\t{:.6}\t{:.6}", lambda, train_error, valid_error);
    }

    let lambdas = validation_curve.lambdas.view();
    let lambda_max = lambdas.fold(0., |max: f64, &lambda| max.max(lambda));
    Chart::new(180, 60, 0., lambda_max as f32)
        .lineplot(&Shape::Lines(&curve(
            lambdas,
            validation_curve.train_errors.view(),
        )))
        .lineplot(&Shape::Lines(&curve(
            lambdas,
            validation_curve.validation_errors.view(),
        )))
        .display();

    // Report the test error once, with and without the penalty of the selected model
    let evaluation = validation_curve.evaluate(&train, &test)?;
    println!("best lambda: {}", evaluation.lambda);
    println!("test error: {:.6}", evaluation.test_error);
    println!(
        "test error including penalty: {:.6}",
        evaluation.regularized_test_error
    );

    Ok(())
}

fn range(dataset: &Dataset<f64>) -> (f64, f64) {
    dataset
        .records()
        .column(0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &x| {
            (min.min(x), max.max(x))
        })
}

fn points(dataset: &Dataset<f64>) -> Vec<(f32, f32)> {
    curve(dataset.records().column(0), dataset.targets().view())
}

fn curve(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Vec<(f32, f32)> {
    x.iter()
        .zip(y.iter())
        .map(|(&x, &y)| (x as f32, y as f32))
        .collect()
}

fn print_learning_curve(learning_curve: &LearningCurve<f64>) {
    println!("# Training Examples\tTrain Error\tValidation Error");
    for (size, train_error, valid_error) in learning_curve.iter() {
        println!("  \t{}\t\t{:.6}\t{:.6}", size, train_error, valid_error);
    }

    let sizes = learning_curve
        .sizes
        .iter()
        .map(|&size| size as f64)
        .collect::<Array1<f64>>();
    Chart::new(180, 60, 0., learning_curve.len() as f32)
        .lineplot(&Shape::Lines(&curve(
            sizes.view(),
            learning_curve.train_errors.view(),
        )))
        .lineplot(&Shape::Lines(&curve(
            sizes.view(),
            learning_curve.validation_errors.view(),
        )))
        .display();
}
