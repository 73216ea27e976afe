use std::path::Path;

use crate::{
    error::{Error, Result},
    stemmer::ScriptCounts,
};

/// Read a file and require its contents to be valid UTF-8.
pub fn read_utf8_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
        path: path.to_path_buf(),
    })
}

/// Final path component for display, falling back to the full path.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Language the answer to `query` should be written in.
///
/// Russian when Cyrillic letters outnumber Latin ones, English otherwise.
pub fn answer_language(query: &str) -> &'static str {
    let counts = ScriptCounts::of(query);
    if counts.cyrillic > counts.latin {
        "russian"
    } else {
        "english"
    }
}

/// Similarity in `[0, 1]` derived from the Levenshtein distance of the
/// lower-cased inputs, normalized by the longer length in chars.
///
/// Two empty strings are identical; an empty string against a non-empty
/// one scores 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    let distance = strsim::levenshtein(&a, &b);
    1.0 - distance as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_valid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("note.txt");
        std::fs::write(&path, "привет, world").unwrap();
        assert_eq!(read_utf8_file(&path).unwrap(), "привет, world");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("blob.bin");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_utf8_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err =
            read_utf8_file(Path::new("/nonexistent/nope.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn file_label_is_basename() {
        assert_eq!(file_label(Path::new("/tmp/dir/report.md")), "report.md");
    }

    #[test]
    fn answer_language_by_script() {
        assert_eq!(answer_language("Где лиса?"), "russian");
        assert_eq!(answer_language("Where is the fox?"), "english");
        assert_eq!(answer_language("12345"), "english");
    }

    #[test]
    fn similarity_bounds() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("Hello", "hello"), 1.0);
        let s = similarity("kitten", "sitting");
        assert!((s - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
    }

    #[test]
    fn similarity_counts_chars() {
        // one substitution over four Cyrillic letters
        let s = similarity("лиса", "лица");
        assert!((s - 0.75).abs() < 1e-12);
    }
}
