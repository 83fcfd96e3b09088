//! Known binary file extensions

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// Global set of binary file extensions (lower-case, without the dot)
pub static BINARY_EXTENSIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Executables, libraries and bytecode
    set.insert("exe");
    set.insert("dll");
    set.insert("so");
    set.insert("dylib");
    set.insert("bin");
    set.insert("pyc");
    set.insert("pyo");

    // Images
    set.insert("png");
    set.insert("jpg");
    set.insert("jpeg");
    set.insert("gif");
    set.insert("bmp");
    set.insert("ico");
    set.insert("webp");

    // Documents
    set.insert("pdf");
    set.insert("doc");
    set.insert("docx");
    set.insert("xls");
    set.insert("xlsx");

    // Archives
    set.insert("zip");
    set.insert("tar");
    set.insert("gz");
    set.insert("7z");
    set.insert("rar");

    // JVM artifacts
    set.insert("class");
    set.insert("jar");
    set.insert("war");
    set.insert("ear");

    set
});

/// Check the lower-cased extension of `path` against the known binary set
pub fn is_binary_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| BINARY_EXTENSIONS.contains(ext.as_str()))
}
