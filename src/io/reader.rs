//! Story file reading and writing.
//!
//! Small story files are read directly; large ones are memory mapped.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Maximum story file size (16MB).
pub const MAX_STORY_SIZE: u64 = 16 * 1024 * 1024;

/// UTF-8 encoded byte-order mark.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes story bytes, dropping a leading byte-order mark.
fn decode_story(mut bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(UTF8_BOM) {
        bytes.drain(..UTF8_BOM.len());
    }
    String::from_utf8(bytes).map_err(|e| IoError::from(e).into())
}

/// Story file reader.
///
/// Automatically chooses the reading strategy based on file size:
/// - Small files (< 1MB): Read directly into memory
/// - Large files (>= 1MB): Use memory mapping
///
/// # Examples
///
/// ```no_run
/// use panelize::io::FileReader;
///
/// let reader = FileReader::open("story.txt").unwrap();
/// let story = reader.read_to_string().unwrap();
/// ```
pub struct FileReader {
    /// File handle.
    file: File,
    /// File size in bytes.
    size: u64,
    /// File path for error messages.
    path: String,
}

impl FileReader {
    /// Opens a story file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist, can't be opened, or is
    /// larger than [`MAX_STORY_SIZE`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        if size > MAX_STORY_SIZE {
            return Err(IoError::ReadFailed {
                path: path_str,
                reason: format!("file too large: {size} bytes (max: {MAX_STORY_SIZE} bytes)"),
            }
            .into());
        }

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the file content as a UTF-8 string.
    ///
    /// A leading byte-order mark is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or content is not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = if self.size >= MMAP_THRESHOLD {
            tracing::debug!(path = %self.path, size = self.size, "memory mapping story file");
            self.read_mmap_bytes()?
        } else {
            self.read_direct_bytes()?
        };
        decode_story(bytes)
    }

    /// Reads bytes using memory mapping.
    fn read_mmap_bytes(&self) -> Result<Vec<u8>> {
        // Safety: We're only reading from the file, which is safe
        let mmap = unsafe {
            Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
        };

        Ok(mmap.to_vec())
    }

    /// Reads bytes directly into memory.
    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

/// Reads a story file to string.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Reads a story from any reader (usually stdin).
///
/// # Errors
///
/// Returns an error if reading fails or the input is not valid UTF-8.
pub fn read_story<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| IoError::Generic(e.to_string()))?;
    decode_story(bytes)
}

/// Writes content to a file, creating parent directories if needed.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }

    std::fs::write(path_ref, content).map_err(|e| IoError::WriteFailed {
        path: path_str,
        reason: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;
    use test_case::test_case;

    #[test]
    fn test_read_small_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("story.txt");
        std::fs::write(&file_path, "Once. Upon. A time.").unwrap();

        let content = read_file(&file_path).unwrap();
        assert_eq!(content, "Once. Upon. A time.");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_file("/nonexistent/path/story.txt");
        assert!(matches!(result, Err(Error::Io(IoError::FileNotFound { .. }))));
    }

    #[test]
    fn test_file_reader_size_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("story.txt");
        std::fs::write(&file_path, "Hello").unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert_eq!(reader.size(), 5);
        assert!(reader.path().contains("story.txt"));
    }

    #[test]
    fn test_read_hebrew_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("hebrew.txt");
        std::fs::write(&file_path, crate::core::SAMPLE_STORY).unwrap();

        let content = read_file(&file_path).unwrap();
        assert_eq!(content, crate::core::SAMPLE_STORY);
    }

    #[test]
    fn test_read_large_file_mmap_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large.txt");

        let large_content = "Sentence. ".repeat(150_000);
        std::fs::write(&file_path, &large_content).unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert!(reader.size() >= MMAP_THRESHOLD);

        let content = reader.read_to_string().unwrap();
        assert_eq!(content.len(), large_content.len());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("invalid.bin");
        std::fs::write(&file_path, [b'a', 0xff, 0xfe]).unwrap();

        let result = read_file(&file_path);
        assert!(matches!(
            result,
            Err(Error::Io(IoError::InvalidUtf8 { offset: 1 }))
        ));
    }

    #[test]
    fn test_read_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.txt");
        std::fs::write(&file_path, "").unwrap();

        assert!(read_file(&file_path).unwrap().is_empty());
    }

    #[test_case(b"\xEF\xBB\xBFHello. World." ; "with byte order mark")]
    #[test_case(b"Hello. World." ; "without byte order mark")]
    fn test_read_file_drops_leading_bom(bytes: &[u8]) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bom.txt");
        std::fs::write(&file_path, bytes).unwrap();

        let content = read_file(&file_path).unwrap();
        assert_eq!(content, "Hello. World.");
        assert_eq!(crate::segmenting::segment(&content), vec!["Hello. World"]);
    }

    #[test]
    fn test_read_story_drops_leading_bom() {
        let story = read_story("\u{FEFF}A. B.".as_bytes()).unwrap();
        assert_eq!(story, "A. B.");
    }

    #[test]
    fn test_read_story_from_reader() {
        let story = read_story("A. B.".as_bytes()).unwrap();
        assert_eq!(story, "A. B.");

        let invalid: &[u8] = &[0xc3, 0x28];
        assert!(read_story(invalid).is_err());
    }

    #[test]
    fn test_write_file_to_nested_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a/b/c/deep.txt");

        write_file(&file_path, "Deep content").unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "Deep content");
    }
}
