//! Dump codec test vectors as JSON for cross-implementation comparison.
//!
//! Writes representative packed colours and compressed rotations alongside
//! their decoded forms, so the output can be diffed against what a reference
//! implementation produces for the same archive values.
//!
//! Run: `cargo run -p relic-codec --features test-tools --bin dump_test_vectors`

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use glam::DMat3;
use relic_codec::{
    CompressedRotation, PackedColor16, PackedColorArchive32, archive_to_argb, pack_rotation,
    unpack_color16, unpack_rotation,
};

const OUTPUT_DIR: &str = "test_vectors";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new(OUTPUT_DIR);
    fs::create_dir_all(output_path)?;

    println!("Dumping codec test vectors...\n");

    dump_colors(output_path)?;
    dump_rotations(output_path)?;

    println!("\n=== Summary ===");
    println!("Saved test vectors to '{OUTPUT_DIR}/':");
    println!("  - colors.json: 16-bit and archive-order words with ARGB expansions");
    println!("  - rotations.json: compressed rotations with decoded matrices");
    println!("\nNext steps:");
    println!("1. Load the same values in the reference editor");
    println!("2. Diff its output against these files");

    Ok(())
}

fn dump_colors(output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Dumping colour vectors...");

    let words: &[u16] = &[
        0x0000, 0x8000, 0x001f, 0x03e0, 0x7c00, 0x7fff, 0xffff, 0x1234, 0x5ace,
    ];
    let archive_words: &[u32] = &[0x0000_0000, 0xff12_3456, 0x00ff_00ff, 0xdead_beef];

    let json = serde_json::json!({
        "packed16": words.iter().map(|&word| {
            let argb = unpack_color16(PackedColor16(word));
            serde_json::json!({ "word": word, "argb": argb.0 })
        }).collect::<Vec<_>>(),
        "archive32": archive_words.iter().map(|&word| {
            let argb = archive_to_argb(PackedColorArchive32(word));
            serde_json::json!({ "word": word, "argb": argb.0 })
        }).collect::<Vec<_>>(),
    });

    let path = output_path.join("colors.json");
    File::create(&path)?.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    println!(
        "   Saved {} colour vectors to {}",
        words.len() + archive_words.len(),
        path.display()
    );

    Ok(())
}

fn dump_rotations(output_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Dumping rotation vectors...");

    let rotations: &[CompressedRotation] = &[
        CompressedRotation::new(0, 0, 0),
        CompressedRotation::new(256, 0, 0),
        CompressedRotation::new(0, 256, 0),
        CompressedRotation::new(0, 0, 256),
        CompressedRotation::new(0, 300, 200),
        CompressedRotation::new(250, 0, 180),
        CompressedRotation::new(-512, 0, 300),
        // Malformed on purpose: no conforming encoder emits three nonzero
        // axes, but decode still produces a matrix.
        CompressedRotation::new(100, 200, 300),
    ];

    let json = serde_json::json!({
        "rotations": rotations.iter().map(|&rotation| {
            let matrix = unpack_rotation(rotation);
            let recoded = pack_rotation(matrix);
            serde_json::json!({
                "compressed": [rotation.x, rotation.y, rotation.z],
                "matrix_columns": matrix_columns(matrix),
                "recoded": [recoded.x, recoded.y, recoded.z],
            })
        }).collect::<Vec<_>>(),
    });

    let path = output_path.join("rotations.json");
    File::create(&path)?.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    println!(
        "   Saved {} rotation vectors to {}",
        rotations.len(),
        path.display()
    );

    Ok(())
}

fn matrix_columns(matrix: DMat3) -> Vec<Vec<f64>> {
    (0..3)
        .map(|col| {
            let column = matrix.col(col);
            vec![column.x, column.y, column.z]
        })
        .collect()
}
