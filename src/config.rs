use std::path::PathBuf;

/// Parsed command-line configuration: one or more image paths to load, in
/// the order they should be applied (later images overwrite earlier ones on
/// overlap). Argument parsing itself lives in `main.rs` via `clap`; this
/// struct is the validated result handed to `load`.
#[derive(Debug, PartialEq)]
pub struct Config {
    pub image_paths: Vec<PathBuf>,
}

impl Config {
    pub fn new(image_paths: Vec<PathBuf>) -> Self {
        Self { image_paths }
    }
}
