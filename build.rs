fn main() {
    // Stamped into `turnkit::BUILD_DATE` and printed by the CLI at startup
    let stamp = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BUILD_DATE={}", stamp);
    println!("cargo:rerun-if-changed=build.rs");
}
