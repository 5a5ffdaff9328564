// This binary crate is intentionally minimal.
// All MLP logic lives in the library (src/lib.rs and its modules).
// Run the demo with:
//   cargo run --example two_blobs
fn main() {
    println!("graphite-mlp: a minimal batched multilayer perceptron trainer in Rust.");
    println!("Run `cargo run --example two_blobs` to train on a synthetic dataset.");
}
