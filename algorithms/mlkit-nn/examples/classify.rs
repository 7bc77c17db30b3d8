use std::env;
use std::error::Error;

use mlkit::{dataset::Records, metrics::ToConfusionMatrix, traits::Fit, Dataset, Label};
use mlkit_datasets::{from_csv, generate};
use mlkit_nn::KnnParams;
use ndarray::array;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // usage: classify [file.csv], the label is read from the last column
    match env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading dataset");
            classify(from_csv(&path, true, None)?)
        }
        None => {
            info!("no CSV file given, generating three labelled blobs");
            let mut rng = Xoshiro256Plus::seed_from_u64(42);
            let centroids = array![[0., 0., 0.], [5., 5., 0.], [0., 5., 5.]];
            classify(generate::labelled_blobs(100, &centroids, &mut rng))
        }
    }
}

fn classify<L: Label>(mut dataset: Dataset<f64, L>) -> Result<(), Box<dyn Error>> {
    info!(
        nsamples = dataset.nsamples(),
        nfeatures = dataset.nfeatures(),
        labels = ?dataset.label_frequencies(),
        "dataset ready"
    );

    dataset.normalize();
    let (train, test) = dataset.train_test_split(0.2, 41)?;

    let model = KnnParams::new().k(5).fit(&train)?;

    if let Some((sample, label)) = test.sample_iter().next() {
        let prediction = model.predict_sample(&sample)?;
        info!(?sample, ?prediction, truth = ?label, "predicted single sample");
    }

    let prediction = model.predict_batch(test.records())?;
    let cm = prediction.confusion_matrix(&test)?;
    println!("{:?}", cm);

    let accuracy = model.score(&test)?;
    info!(
        ntrain = train.nsamples(),
        ntest = test.nsamples(),
        accuracy,
        "classified held-out samples"
    );

    Ok(())
}
