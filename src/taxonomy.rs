//! File classification taxonomy for organizing files by type.
//!
//! Maps file extensions to a two-level `main/sub` category layout. The
//! table is declared statically, flattened once into a lookup map on first
//! use, and only ever read afterwards, so it is safe to share across
//! concurrent planning calls.
//!
//! Categories with exactly one subcategory collapse to the bare main
//! category as the destination folder (e.g. `archives`, not
//! `archives/common`); every other known extension maps to `main/sub`;
//! unrecognized extensions map to the sentinel `others` folder.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Folder used for files whose extension is not in the taxonomy.
pub const UNCLASSIFIED_FOLDER: &str = "others";

/// Top-level file categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MainCategory {
    Images,
    Documents,
    Audio,
    Video,
    Archives,
    Code,
    Data,
    Executables,
    Design,
    Fonts,
    Web,
    System,
}

impl MainCategory {
    /// Returns the directory name for this category.
    pub fn dir_name(&self) -> &'static str {
        match self {
            MainCategory::Images => "images",
            MainCategory::Documents => "documents",
            MainCategory::Audio => "audio",
            MainCategory::Video => "video",
            MainCategory::Archives => "archives",
            MainCategory::Code => "code",
            MainCategory::Data => "data",
            MainCategory::Executables => "executables",
            MainCategory::Design => "design",
            MainCategory::Fonts => "fonts",
            MainCategory::Web => "web",
            MainCategory::System => "system",
        }
    }
}

/// The static category declaration: main category, then `(subcategory,
/// extensions)` pairs. Extensions carry a leading dot and are lowercase.
///
/// Declaration order matters: an extension listed under two categories
/// (e.g. `.php`, `.bak`, `.log`) resolves to the later declaration.
const CATEGORY_TABLE: &[(MainCategory, &[(&str, &[&str])])] = &[
    (
        MainCategory::Images,
        &[
            (
                "raster_images",
                &[
                    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".tif", ".webp", ".heic",
                    ".heif", ".raw", ".cr2", ".nef", ".arw",
                ],
            ),
            ("vector_images", &[".svg", ".ai", ".eps", ".cdr"]),
            ("photoshop", &[".psd", ".psb", ".xcf"]),
            ("icons", &[".ico", ".icns"]),
        ],
    ),
    (
        MainCategory::Documents,
        &[
            (
                "plain_text",
                &[".txt", ".md", ".markdown", ".rst", ".rtf", ".tex", ".log"],
            ),
            ("word_processing", &[".doc", ".docx", ".odt", ".pages", ".wpd"]),
            (
                "spreadsheets",
                &[".xls", ".xlsx", ".xlsm", ".ods", ".numbers", ".csv", ".tsv"],
            ),
            ("presentations", &[".ppt", ".pptx", ".odp", ".key"]),
            ("pdf", &[".pdf"]),
            (
                "ebooks",
                &[".epub", ".mobi", ".azw", ".azw3", ".fb2", ".djvu", ".cbr", ".cbz"],
            ),
            (
                "technical_docs",
                &[".xml", ".xhtml", ".dtd", ".sgml", ".yaml", ".yml", ".json", ".toml"],
            ),
        ],
    ),
    (
        MainCategory::Audio,
        &[
            (
                "music",
                &[".mp3", ".aac", ".flac", ".alac", ".wav", ".wma", ".ogg", ".opus"],
            ),
            ("voice", &[".m4a", ".amr", ".aiff", ".aif", ".aifc"]),
            ("production", &[".mid", ".midi", ".aup", ".sesx", ".band"]),
        ],
    ),
    (
        MainCategory::Video,
        &[
            (
                "common",
                &[
                    ".mp4", ".mov", ".avi", ".mkv", ".wmv", ".flv", ".webm", ".m4v", ".mpg",
                    ".mpeg", ".3gp",
                ],
            ),
            (
                "professional",
                &[".mxf", ".r3d", ".braw", ".prproj", ".fcpx", ".dav"],
            ),
        ],
    ),
    (
        MainCategory::Archives,
        &[(
            "common",
            &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".tgz", ".iso"],
        )],
    ),
    (
        MainCategory::Code,
        &[
            (
                "scripts",
                &[".py", ".js", ".php", ".rb", ".pl", ".sh", ".bash", ".ps1", ".bat", ".cmd"],
            ),
            ("markup", &[".html", ".htm", ".css", ".scss", ".sass", ".less"]),
            (
                "compiled",
                &[".c", ".cpp", ".h", ".hpp", ".cs", ".java", ".go", ".rs", ".swift"],
            ),
            ("data_science", &[".ipynb", ".r", ".rmd", ".jl"]),
            ("config", &[".ini", ".conf", ".cfg", ".properties"]),
        ],
    ),
    (
        MainCategory::Data,
        &[
            (
                "databases",
                &[".db", ".sqlite", ".sqlite3", ".mdb", ".accdb", ".sql", ".bak"],
            ),
            (
                "data_formats",
                &[".dat", ".sav", ".bin", ".pkl", ".parquet", ".avro", ".orc"],
            ),
        ],
    ),
    (
        MainCategory::Executables,
        &[
            (
                "programs",
                &[".exe", ".app", ".dmg", ".pkg", ".deb", ".rpm", ".msi", ".apk", ".ipa"],
            ),
            ("libraries", &[".dll", ".so", ".dylib"]),
        ],
    ),
    (
        MainCategory::Design,
        &[
            (
                "3d_models",
                &[".obj", ".stl", ".fbx", ".blend", ".3ds", ".c4d", ".max"],
            ),
            ("cad", &[".dwg", ".dxf", ".skp"]),
            ("design", &[".indd", ".sketch", ".fig", ".xd"]),
        ],
    ),
    (
        MainCategory::Fonts,
        &[("font_files", &[".ttf", ".otf", ".woff", ".woff2", ".eot"])],
    ),
    (
        MainCategory::Web,
        &[(
            "web_assets",
            &[".asp", ".aspx", ".jsp", ".php", ".htaccess", ".htpasswd", ".url", ".webloc"],
        )],
    ),
    (
        MainCategory::System,
        &[(
            "system_files",
            &[
                ".sys", ".tmp", ".cache", ".swp", ".bak", ".old", ".log", ".lnk", ".shortcut",
                ".plist",
            ],
        )],
    ),
];

/// Shared taxonomy instance, built once on first use.
static GLOBAL: LazyLock<Taxonomy> = LazyLock::new(Taxonomy::new);

/// Flattened extension lookup over the static category table.
#[derive(Debug)]
pub struct Taxonomy {
    by_extension: HashMap<&'static str, (MainCategory, &'static str)>,
    single_subcategory: HashSet<MainCategory>,
}

impl Taxonomy {
    /// Builds the flattened lookup from [`CATEGORY_TABLE`].
    pub fn new() -> Self {
        let mut by_extension = HashMap::new();
        let mut single_subcategory = HashSet::new();

        for (main, subcategories) in CATEGORY_TABLE {
            if subcategories.len() == 1 {
                single_subcategory.insert(*main);
            }
            for (sub, extensions) in *subcategories {
                for ext in *extensions {
                    by_extension.insert(*ext, (*main, *sub));
                }
            }
        }

        Self {
            by_extension,
            single_subcategory,
        }
    }

    /// Returns the process-wide shared taxonomy.
    pub fn global() -> &'static Taxonomy {
        &GLOBAL
    }

    /// Returns true if the path's basename marks it as hidden.
    pub fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }

    /// Classifies a path into its destination folder.
    ///
    /// Returns `None` for hidden files, which are excluded from by-type
    /// planning entirely. For everything else the folder is
    /// `main/subcategory`, collapsed to `main` when the category has a
    /// single subcategory, or [`UNCLASSIFIED_FOLDER`] for unknown
    /// extensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use reshelf::taxonomy::Taxonomy;
    /// use std::path::{Path, PathBuf};
    ///
    /// let taxonomy = Taxonomy::global();
    /// assert_eq!(
    ///     taxonomy.classify(Path::new("/pics/a.jpg")),
    ///     Some(PathBuf::from("images/raster_images"))
    /// );
    /// assert_eq!(
    ///     taxonomy.classify(Path::new("/backups/a.zip")),
    ///     Some(PathBuf::from("archives"))
    /// );
    /// assert_eq!(taxonomy.classify(Path::new("/tmp/.hidden")), None);
    /// ```
    pub fn classify(&self, path: &Path) -> Option<PathBuf> {
        if Self::is_hidden(path) {
            return None;
        }

        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        let folder = match self.by_extension.get(extension.as_str()) {
            Some((main, sub)) => {
                if self.single_subcategory.contains(main) {
                    PathBuf::from(main.dir_name())
                } else {
                    Path::new(main.dir_name()).join(sub)
                }
            }
            None => PathBuf::from(UNCLASSIFIED_FOLDER),
        };

        Some(folder)
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}
