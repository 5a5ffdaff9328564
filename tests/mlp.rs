use graphite_mlp::{Activation, Matrix, Mlp, MlpConfig, MlpError};

/// Eight linearly separable points, four per class.
fn separable_data() -> (Matrix, Vec<usize>) {
    let x = Matrix::from_rows(vec![
        vec![-1.0, -1.0],
        vec![-1.2, -0.8],
        vec![-0.8, -1.1],
        vec![-1.1, -1.2],
        vec![1.0, 1.0],
        vec![1.2, 0.8],
        vec![0.8, 1.1],
        vec![1.1, 1.2],
    ]);
    (x, vec![0, 0, 0, 0, 1, 1, 1, 1])
}

fn small_config() -> MlpConfig {
    MlpConfig::new(2, 2)
        .with_hidden_layers(vec![4])
        .with_batch_size(4)
        .with_activation(Activation::Sigmoid)
        .with_learning_rate(0.3)
        .with_verbose(10)
}

#[test]
fn fit_is_deterministic_for_identical_config_and_data() {
    let (x, y) = separable_data();

    let mut a = Mlp::new(small_config()).unwrap();
    let mut b = Mlp::new(small_config()).unwrap();
    a.fit(&x, &y, 20, true).unwrap();
    b.fit(&x, &y, 20, true).unwrap();

    // Bit-identical parameters: same seed drives init and shuffling alike.
    assert_eq!(a.weights(), b.weights());
    assert_eq!(a.biases(), b.biases());
}

#[test]
fn shape_mismatch_fails_before_weight_allocation() {
    let x = Matrix::zeros(10, 2);
    let y = vec![0; 9];

    let mut mlp = Mlp::new(small_config()).unwrap();
    let err = mlp.fit(&x, &y, 5, false).unwrap_err();
    assert!(matches!(err, MlpError::Shape(_)));
    assert!(mlp.weights().is_empty());
    assert!(mlp.biases().is_empty());
}

#[test]
fn unsupported_activation_is_a_config_error() {
    let err = "relu".parse::<Activation>().unwrap_err();
    assert!(matches!(err, MlpError::Config(_)));
}

#[test]
fn predict_rows_are_probability_distributions() {
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();
    mlp.fit(&x, &y, 5, false).unwrap();

    let probs = mlp.predict(&x);
    assert_eq!((probs.rows, probs.cols), (8, 2));
    for row in &probs.data {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }
}

#[test]
fn predict_is_idempotent_between_fits() {
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();
    mlp.fit(&x, &y, 5, false).unwrap();

    let first = mlp.predict(&x);
    let second = mlp.predict(&x);
    assert_eq!(first, second);
}

#[test]
fn score_is_a_fraction() {
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();
    mlp.fit(&x, &y, 1, false).unwrap();

    let acc = mlp.score(&x, &y);
    assert!((0.0..=1.0).contains(&acc));
}

#[test]
fn separable_accuracy_trajectory_improves_to_perfect() {
    // 50 epochs, one at a time with shuffling off, recording the training
    // accuracy after each. On linearly separable data the trajectory must
    // either climb strictly or hit 1.0 before the end.
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();

    let mut accuracies = Vec::with_capacity(50);
    for _ in 0..50 {
        mlp.fit(&x, &y, 1, false).unwrap();
        accuracies.push(mlp.score(&x, &y));
    }

    let reached_perfect = accuracies.iter().any(|&a| a == 1.0);
    let strictly_increasing = accuracies.windows(2).all(|w| w[1] > w[0]);
    assert!(
        reached_perfect || strictly_increasing,
        "accuracy neither reached 1.0 nor climbed monotonically: {accuracies:?}"
    );

    let first = accuracies[0];
    let last = *accuracies.last().unwrap();
    assert!(last >= first, "accuracy regressed: {first} -> {last}");
    assert!(last >= 0.875, "separable data should be nearly solved, got {last}");
}

#[test]
fn biases_never_change_after_initialization() {
    // The update rule only touches weights; biases keep their initial draw.
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();

    mlp.fit(&x, &y, 1, false).unwrap();
    let initial = mlp.biases().to_vec();

    mlp.fit(&x, &y, 25, true).unwrap();
    assert_eq!(mlp.biases(), &initial[..]);
}

#[test]
fn weights_update_but_count_stays_fixed() {
    let (x, y) = separable_data();
    let mut mlp = Mlp::new(small_config()).unwrap();

    mlp.fit(&x, &y, 1, false).unwrap();
    let initial = mlp.weights().to_vec();
    assert_eq!(initial.len(), 2);

    mlp.fit(&x, &y, 5, false).unwrap();
    assert_eq!(mlp.weights().len(), 2);
    assert_ne!(mlp.weights(), &initial[..]);
}
