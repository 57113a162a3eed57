#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // P3 2x1: red, green
    fs::write(format!("{dir}/p3_2x1.ppm"), b"P3\n2 1\n255\n255 0 0 0 255 0\n").unwrap();

    // P3 2x2 with comments and ragged layout
    let commented = b"P3 # seed\n2 2\n# max\n15\n15 0 0  0 15 0\n0 0 15\n15 15 15\n";
    fs::write(format!("{dir}/p3_comments.ppm"), commented).unwrap();

    // Samples above maxval and above 255
    fs::write(format!("{dir}/p3_out_of_range.ppm"), b"P3 1 1 100 101 256 7").unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p3.bin"), b"P3").unwrap();
    fs::write(format!("{dir}/p6_magic.bin"), b"P6\n1 1\n255\n\xff\x00\x00").unwrap();
    fs::write(format!("{dir}/short_pixels.bin"), b"P3 2 2 255 1 2 3").unwrap();
    fs::write(format!("{dir}/huge_dims.bin"), b"P3 4294967295 4294967295 255").unwrap();

    println!("Generated seed corpus in {dir}/");
}
