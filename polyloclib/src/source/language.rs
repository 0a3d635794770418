//! Extension-based language classification.

use std::path::Path;

/// Known extensions (lowercase, without the dot) and their language labels.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("go", "Go"),
    ("py", "Python"),
    ("js", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("ts", "TypeScript"),
    ("java", "Java"),
    ("cpp", "C++"),
    ("cc", "C++"),
    ("cxx", "C++"),
    ("hpp", "C++"),
    ("c", "C"),
    ("h", "C"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("rs", "Rust"),
    ("swift", "Swift"),
    ("kt", "Kotlin"),
    ("kts", "Kotlin"),
];

/// Map a file path to its language label.
///
/// The extension is compared case-insensitively, so `Main.GO` and `main.go`
/// are both Go. Returns `None` for files without an extension or with one
/// that is not in [`LANGUAGES`].
pub fn classify(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    language_for_extension(&ext)
}

/// Look up a bare, lowercase extension (`"py"`, not `".py"`).
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, label)| *label)
}
