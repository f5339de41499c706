// This binary crate is intentionally minimal.
// All numerical and training logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example blobs
fn main() {
    println!("lodestone-nn: a minimal numerical core with a hand-written feed-forward trainer.");
    println!("Run `cargo run --example blobs` to see the synthetic training demo.");
}
