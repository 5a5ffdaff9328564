use env_logger::Env;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use graphite_mlp::{Activation, Matrix, Mlp, MlpConfig};

/// Two jittered clusters in the plane, one per class, pre-shuffled.
fn make_blobs(n_per_class: usize, rng: &mut StdRng) -> (Matrix, Vec<usize>) {
    let centers = [(-1.0, -1.0), (1.0, 1.0)];
    let mut samples: Vec<(Vec<f64>, usize)> = Vec::with_capacity(2 * n_per_class);

    for (class, &(cx, cy)) in centers.iter().enumerate() {
        for _ in 0..n_per_class {
            let x = cx + rng.gen_range(-0.4..0.4);
            let y = cy + rng.gen_range(-0.4..0.4);
            samples.push((vec![x, y], class));
        }
    }

    samples.shuffle(rng);

    let labels = samples.iter().map(|(_, class)| *class).collect();
    let features = Matrix::from_rows(samples.into_iter().map(|(row, _)| row).collect());
    (features, labels)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(42);
    let (x, y) = make_blobs(100, &mut rng);

    // 3:1 train/test split.
    let split = 150;
    let x_train = x.slice_rows(0..split);
    let y_train = &y[..split];
    let x_test = x.slice_rows(split..x.rows);
    let y_test = &y[split..];

    let config = MlpConfig::new(2, 2)
        .with_hidden_layers(vec![8])
        .with_batch_size(16)
        .with_activation(Activation::Sigmoid)
        .with_learning_rate(0.05)
        .with_verbose(10);

    let mut network = Mlp::new(config).expect("configuration is valid");
    network
        .fit(&x_train, y_train, 100, true)
        .expect("shapes are aligned");

    let accuracy = network.score(&x_test, y_test);
    println!("Test accuracy: {accuracy}");
}
