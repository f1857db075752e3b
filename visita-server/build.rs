//! Rebuild when the migrations directory changes, since `sqlx::migrate!`
//! embeds it into the binary.
fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
