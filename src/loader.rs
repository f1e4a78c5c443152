use crate::machine::Machine;
use byteorder::{BigEndian, ReadBytesExt};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

#[derive(Debug)]
pub enum LoadError {
    Io { path: String, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "failed to load image {path}: {source}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
        }
    }
}

/// Reads a big-endian LC-3 object file: the first word is the origin, every
/// word after is the payload. There is no length field; reading stops at EOF.
fn read_image(path: &Path) -> Result<(u16, Vec<u16>), LoadError> {
    let wrap = |source: io::Error| LoadError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(wrap)?);
    let origin = reader.read_u16::<BigEndian>().map_err(wrap)?;

    let mut payload = Vec::new();
    loop {
        match reader.read_u16::<BigEndian>() {
            Ok(word) => payload.push(word),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(wrap(err)),
        }
    }

    Ok((origin, payload))
}

/// Loads the image at `path` into `machine`'s memory starting at the image's
/// origin. Words that would fall past the end of the address space are
/// silently dropped, matching the reference implementation's bounded read.
/// Later loads overwrite earlier ones on overlap.
pub fn load_into(machine: &mut Machine, path: &Path) -> Result<(), LoadError> {
    let (origin, payload) = read_image(path)?;

    let max_words = (1usize << 16).saturating_sub(origin as usize);
    for (offset, word) in payload.into_iter().take(max_words).enumerate() {
        let address = origin.wrapping_add(offset as u16);
        machine.memory.write(address, word);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;

    fn write_image(words: &[u16]) -> tempfile_like::TempImage {
        tempfile_like::TempImage::new(words)
    }

    mod tempfile_like {
        use super::*;
        use std::env;
        use std::fs;

        /// A minimal throwaway file in the OS temp directory, removed on drop.
        /// Avoids pulling in a `tempfile` dependency for just this test helper.
        pub struct TempImage {
            pub path: std::path::PathBuf,
        }

        impl TempImage {
            pub fn new(words: &[u16]) -> Self {
                let mut path = env::temp_dir();
                path.push(format!(
                    "lc3-loader-test-{}-{}.obj",
                    std::process::id(),
                    words.len()
                ));

                let mut file = fs::File::create(&path).unwrap();
                for word in words {
                    file.write_u16::<BigEndian>(*word).unwrap();
                }
                file.flush().unwrap();

                Self { path }
            }
        }

        impl Drop for TempImage {
            fn drop(&mut self) {
                let _ = fs::remove_file(&self.path);
            }
        }
    }

    #[test]
    fn loads_payload_at_origin() {
        let image = write_image(&[0x3000, 0xAAAA, 0xBBBB, 0xCCCC]);
        let mut machine = Machine::new();

        load_into(&mut machine, &image.path).unwrap();

        assert_eq!(machine.memory.read(0x3000), 0xAAAA);
        assert_eq!(machine.memory.read(0x3001), 0xBBBB);
        assert_eq!(machine.memory.read(0x3002), 0xCCCC);
    }

    #[test]
    fn later_image_overwrites_earlier_one_on_overlap() {
        let first = write_image(&[0x3000, 0x1111, 0x2222]);
        let second = write_image(&[0x3001, 0x9999]);
        let mut machine = Machine::new();

        load_into(&mut machine, &first.path).unwrap();
        load_into(&mut machine, &second.path).unwrap();

        assert_eq!(machine.memory.read(0x3000), 0x1111);
        assert_eq!(machine.memory.read(0x3001), 0x9999);
    }

    #[test]
    fn oversized_image_is_silently_truncated_at_the_end_of_memory() {
        let origin = 0xFFFE;
        let image = write_image(&[origin, 0x1111, 0x2222, 0x3333]);
        let mut machine = Machine::new();

        // Only two words fit before address space wraps past 0xFFFF; the
        // third word in the payload must be dropped, not wrapped around.
        load_into(&mut machine, &image.path).unwrap();

        assert_eq!(machine.memory.read(0xFFFE), 0x1111);
        assert_eq!(machine.memory.read(0xFFFF), 0x2222);
        assert_eq!(machine.memory.read(0x0000), 0);
    }

    #[test]
    fn missing_file_is_reported_as_a_load_error() {
        let result = read_image(Path::new("/nonexistent/path/to/an.obj"));
        assert!(result.is_err());
    }
}
