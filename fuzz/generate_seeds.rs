//! Generate seed corpus for fuzzing

use std::fs::{self, File};
use std::io::Write;
use zip::unstable::write::FileOptionsExt;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus_dir = "fuzz/corpus/fuzz_archive_parse";
    fs::create_dir_all(corpus_dir)?;

    println!("Generating seed corpus...");

    // Seed 1: Empty archive (no entries)
    {
        let path = format!("{}/seed_empty.zip", corpus_dir);
        let zip = ZipWriter::new(File::create(&path)?);
        zip.finish()?;
        println!("Generated: {}", path);
    }

    // Seed 2: Single small file, stored
    {
        let path = format!("{}/seed_single_stored.zip", corpus_dir);
        let mut zip = ZipWriter::new(File::create(&path)?);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("test.txt", options)?;
        zip.write_all(b"Hello, World!")?;
        zip.finish()?;
        println!("Generated: {}", path);
    }

    // Seed 3: Implicit and explicit directories
    {
        let path = format!("{}/seed_dirs.zip", corpus_dir);
        let mut zip = ZipWriter::new(File::create(&path)?);
        let options = SimpleFileOptions::default();
        zip.start_file("a.txt", options)?;
        zip.write_all(b"A")?;
        zip.start_file("1/nested.txt", options)?;
        zip.write_all(b"nested")?;
        zip.add_directory("empty/", options)?;
        zip.finish()?;
        println!("Generated: {}", path);
    }

    // Seed 4: Archive comment (exercises the slow end-record search)
    {
        let path = format!("{}/seed_comment.zip", corpus_dir);
        let mut zip = ZipWriter::new(File::create(&path)?);
        zip.set_comment("seed corpus archive with a trailing comment");
        zip.start_file("c.txt", SimpleFileOptions::default())?;
        zip.write_all(b"commented")?;
        zip.finish()?;
        println!("Generated: {}", path);
    }

    // Seed 5: Encrypted entry
    {
        let path = format!("{}/seed_encrypted.zip", corpus_dir);
        let mut zip = ZipWriter::new(File::create(&path)?);
        let options = SimpleFileOptions::default().with_deprecated_encryption(b"password");
        zip.start_file("secret.txt", options)?;
        zip.write_all(b"classified")?;
        zip.finish()?;
        println!("Generated: {}", path);
    }

    println!("Seed corpus generated in {}", corpus_dir);
    Ok(())
}
