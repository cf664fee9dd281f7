/// Rule-table categoriser.
///
/// Maps a file's extension, name, size and permission bits to exactly one
/// [`Category`]. Rules are checked in table order and the first match wins.
/// Every extension rule precedes every name rule, so name heuristics only
/// apply when the extension is unknown. No I/O, no state.
use crate::model::{Category, PermissionBits};

/// Attributes the categoriser looks at. Nothing else influences the result.
#[derive(Debug, Clone, Copy)]
pub struct CategoryInput<'a> {
    pub extension: &'a str,
    pub name: &'a str,
    pub size_bytes: u64,
    pub permissions: PermissionBits,
}

/// How a rule decides whether it applies.
#[derive(Debug)]
enum Matcher {
    /// Extension is one of these (lower-case, no dot).
    Extension(&'static [&'static str]),
    /// Lower-cased name contains any of these.
    NameContains(&'static [&'static str]),
    /// Lower-cased name starts with any of these.
    NamePrefix(&'static [&'static str]),
    /// Lower-cased name ends with any of these.
    NameSuffix(&'static [&'static str]),
    /// Dot-file ending in `rc` (`.bashrc`, `.npmrc`).
    RcFile,
    /// Owner executable bit is set.
    Executable,
    /// Zero-byte file.
    Empty,
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    category: Category,
}

const fn rule(matcher: Matcher, category: Category) -> Rule {
    Rule { matcher, category }
}

/// The rule table, in priority order.
static RULES: &[Rule] = &[
    // ── Extension rules ──────────────────────────────────────────────
    rule(
        Matcher::Extension(&[
            "pdf", "doc", "docx", "txt", "rtf", "odt", "md", "epub", "tex", "pages",
        ]),
        Category::Documents,
    ),
    rule(
        Matcher::Extension(&["xls", "xlsx", "csv", "tsv", "ods", "numbers"]),
        Category::Spreadsheets,
    ),
    rule(
        Matcher::Extension(&["ppt", "pptx", "odp", "key"]),
        Category::Presentations,
    ),
    rule(
        Matcher::Extension(&[
            "jpg", "jpeg", "png", "gif", "bmp", "svg", "webp", "ico", "tiff", "tif", "psd", "raw",
            "cr2", "nef", "heic", "heif",
        ]),
        Category::Images,
    ),
    rule(
        Matcher::Extension(&["mp3", "wav", "flac", "aac", "ogg", "oga", "wma", "m4a", "opus"]),
        Category::Audio,
    ),
    rule(
        Matcher::Extension(&[
            "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v", "mpg", "mpeg", "3gp",
        ]),
        Category::Video,
    ),
    rule(
        Matcher::Extension(&[
            "zip", "rar", "7z", "tar", "gz", "tgz", "bz2", "xz", "zst", "cab", "iso", "dmg",
        ]),
        Category::Archives,
    ),
    rule(
        Matcher::Extension(&[
            "rs", "py", "js", "ts", "jsx", "tsx", "c", "cc", "cpp", "h", "hpp", "cs", "java", "go",
            "rb", "php", "swift", "kt", "scala", "html", "htm", "css", "scss", "json", "xml",
            "yaml", "yml", "toml", "sql", "sh", "bat", "ps1",
        ]),
        Category::Code,
    ),
    rule(
        Matcher::Extension(&["ttf", "otf", "woff", "woff2"]),
        Category::Fonts,
    ),
    rule(
        Matcher::Extension(&["db", "sqlite", "sqlite3", "mdb", "accdb"]),
        Category::Databases,
    ),
    rule(
        Matcher::Extension(&["exe", "msi", "dll", "so", "dylib", "app", "com", "bin"]),
        Category::Executables,
    ),
    rule(
        Matcher::Extension(&["sys", "drv", "inf", "log", "etl", "dat", "reg"]),
        Category::System,
    ),
    rule(
        Matcher::Extension(&["ini", "cfg", "conf", "config"]),
        Category::Configuration,
    ),
    rule(
        Matcher::Extension(&["bak", "backup", "old"]),
        Category::Backup,
    ),
    rule(
        Matcher::Extension(&["tmp", "temp", "swp"]),
        Category::Temporary,
    ),
    // ── Name heuristics ──────────────────────────────────────────────
    rule(Matcher::NameContains(&["backup"]), Category::Backup),
    rule(Matcher::NameSuffix(&["~"]), Category::Backup),
    rule(Matcher::NamePrefix(&["tmp"]), Category::Temporary),
    rule(Matcher::NameContains(&["temp", "cache"]), Category::Temporary),
    rule(Matcher::NamePrefix(&["config"]), Category::Configuration),
    rule(Matcher::NameSuffix(&["config"]), Category::Configuration),
    rule(Matcher::RcFile, Category::Configuration),
    // ── Attribute heuristics ─────────────────────────────────────────
    rule(Matcher::Executable, Category::Executables),
    rule(Matcher::Empty, Category::Empty),
];

/// Categorise a file. Deterministic: equal inputs give equal output.
pub fn categorize(input: &CategoryInput<'_>) -> Category {
    // Lowercase the extension into a stack buffer, no heap allocation.
    // Anything longer than 16 bytes is not in any table.
    let bytes = input.extension.as_bytes();
    let mut buf = [0u8; 16];
    let ext = if bytes.len() <= buf.len() {
        for (dest, &src) in buf.iter_mut().zip(bytes) {
            *dest = src.to_ascii_lowercase();
        }
        std::str::from_utf8(&buf[..bytes.len()]).unwrap_or("")
    } else {
        ""
    };

    let name = input.name.to_lowercase();

    RULES
        .iter()
        .find(|r| matches(&r.matcher, ext, &name, input))
        .map_or(Category::Uncategorized, |r| r.category)
}

/// Categorise by extension alone (no name, size or permission heuristics).
pub fn categorize_extension(ext: &str) -> Category {
    categorize(&CategoryInput {
        extension: ext,
        name: "",
        size_bytes: 1,
        permissions: PermissionBits::default(),
    })
}

fn matches(matcher: &Matcher, ext: &str, name: &str, input: &CategoryInput<'_>) -> bool {
    match matcher {
        Matcher::Extension(set) => !ext.is_empty() && set.iter().any(|e| *e == ext),
        Matcher::NameContains(needles) => needles.iter().any(|n| name.contains(n)),
        Matcher::NamePrefix(prefixes) => prefixes.iter().any(|p| name.starts_with(p)),
        Matcher::NameSuffix(suffixes) => suffixes.iter().any(|s| name.ends_with(s)),
        Matcher::RcFile => name.len() > 3 && name.starts_with('.') && name.ends_with("rc"),
        Matcher::Executable => input.permissions.executable,
        Matcher::Empty => input.size_bytes == 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(ext: &'a str, name: &'a str, size: u64, exec: bool) -> CategoryInput<'a> {
        CategoryInput {
            extension: ext,
            name,
            size_bytes: size,
            permissions: PermissionBits {
                readable: true,
                writable: true,
                executable: exec,
            },
        }
    }

    /// (extension, name, size, executable) → expected category.
    #[test]
    fn rule_table_fixtures() {
        let cases: &[(&str, &str, u64, bool, Category)] = &[
            ("pdf", "report.pdf", 10, false, Category::Documents),
            ("txt", "notes.txt", 10, false, Category::Documents),
            ("xlsx", "budget.xlsx", 10, false, Category::Spreadsheets),
            ("csv", "data.csv", 10, false, Category::Spreadsheets),
            ("pptx", "deck.pptx", 10, false, Category::Presentations),
            ("png", "logo.png", 10, false, Category::Images),
            ("flac", "song.flac", 10, false, Category::Audio),
            ("mkv", "film.mkv", 10, false, Category::Video),
            ("7z", "bundle.7z", 10, false, Category::Archives),
            ("rs", "main.rs", 10, false, Category::Code),
            ("woff2", "inter.woff2", 10, false, Category::Fonts),
            ("sqlite", "app.sqlite", 10, false, Category::Databases),
            ("dll", "lib.dll", 10, false, Category::Executables),
            ("log", "syslog.log", 10, false, Category::System),
            ("ini", "desktop.ini", 10, false, Category::Configuration),
            ("bak", "db.bak", 10, false, Category::Backup),
            ("tmp", "x.tmp", 10, false, Category::Temporary),
            // Name heuristics apply only without a known extension.
            ("", "backup_2023", 10, false, Category::Backup),
            ("", "draft~", 10, false, Category::Backup),
            ("", "tmpfile", 10, false, Category::Temporary),
            ("xyz", "page_cache.xyz", 10, false, Category::Temporary),
            ("", "config", 10, false, Category::Configuration),
            ("", ".bashrc", 10, false, Category::Configuration),
            // Extension wins over name patterns.
            ("zip", "backup.zip", 10, false, Category::Archives),
            ("txt", "config.txt", 10, false, Category::Documents),
            // Executable bit without a known extension.
            ("", "run", 10, true, Category::Executables),
            ("sh", "deploy.sh", 10, true, Category::Code),
            // Zero-size fallback, then the default.
            ("", "LICENSE", 0, false, Category::Empty),
            ("", "LICENSE", 10, false, Category::Uncategorized),
            ("qqq", "thing.qqq", 10, false, Category::Uncategorized),
        ];

        for &(ext, name, size, exec, expected) in cases {
            assert_eq!(
                categorize(&input(ext, name, size, exec)),
                expected,
                "({ext:?}, {name:?}, {size}, exec={exec})"
            );
        }
    }

    /// Extension matching must be case-insensitive so "JPG" == "jpg".
    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(categorize_extension("JPG"), Category::Images);
        assert_eq!(categorize_extension("RS"), Category::Code);
        assert_eq!(categorize_extension("ZIP"), Category::Archives);
    }

    #[test]
    fn overlong_extension_is_not_matched() {
        assert_eq!(
            categorize_extension("averyveryverylongextension"),
            Category::Uncategorized
        );
        assert_eq!(categorize_extension(""), Category::Uncategorized);
    }

    #[test]
    fn same_inputs_same_category() {
        let a = categorize(&input("", "cache-index", 0, true));
        for _ in 0..10 {
            assert_eq!(categorize(&input("", "cache-index", 0, true)), a);
        }
        assert_eq!(a, Category::Temporary);
    }
}
