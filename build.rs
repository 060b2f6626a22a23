#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]
fn main() {
    println!("cargo:rerun-if-env-changed=DEFMT_LOG");

    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    // Compile-time override of the boot banner seeded into the liquid, like
    // the badge's `NAME` for the name tag.
    println!("cargo:rerun-if-env-changed=LIQUID_TEXT");
    if let Ok(text) = std::env::var("LIQUID_TEXT") {
        if !text.is_ascii() {
            eprintln!();
            eprintln!("💡 `LIQUID_TEXT` must be ASCII; non-ASCII glyphs render as blanks");
            eprintln!();
            std::process::exit(1);
        }
    }
}
