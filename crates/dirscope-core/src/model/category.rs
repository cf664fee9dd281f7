/// Category labels attached to every file record.
///
/// The set is closed: the categoriser always returns one of these, and
/// `Uncategorized` is reserved for files no rule matched.
use serde::Serialize;
use std::fmt;

/// Icon for labels without a more specific one.
pub const GENERIC_ICON: &str = "file";

/// Broad semantic category of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Documents,
    Spreadsheets,
    Presentations,
    Images,
    Audio,
    Video,
    Archives,
    Code,
    Fonts,
    Databases,
    Executables,
    System,
    Configuration,
    Backup,
    Temporary,
    Empty,
    Uncategorized,
}

impl Category {
    /// Every category, in rule-table order.
    pub const ALL: [Category; 17] = [
        Self::Documents,
        Self::Spreadsheets,
        Self::Presentations,
        Self::Images,
        Self::Audio,
        Self::Video,
        Self::Archives,
        Self::Code,
        Self::Fonts,
        Self::Databases,
        Self::Executables,
        Self::System,
        Self::Configuration,
        Self::Backup,
        Self::Temporary,
        Self::Empty,
        Self::Uncategorized,
    ];

    /// Human-readable label for display. Also the serialised form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Spreadsheets => "Spreadsheets",
            Self::Presentations => "Presentations",
            Self::Images => "Images",
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::Archives => "Archives",
            Self::Code => "Code",
            Self::Fonts => "Fonts",
            Self::Databases => "Databases",
            Self::Executables => "Executables",
            Self::System => "System",
            Self::Configuration => "Configuration",
            Self::Backup => "Backup",
            Self::Temporary => "Temporary",
            Self::Empty => "Empty",
            Self::Uncategorized => "Uncategorized",
        }
    }

    /// Parse a label, ignoring ASCII case. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Display hint for the presentation layer (icon name). Falls back to
    /// [`GENERIC_ICON`].
    pub fn icon(self) -> &'static str {
        match self {
            Self::Documents => "file-text",
            Self::Spreadsheets => "file-spreadsheet",
            Self::Presentations => "file-presentation",
            Self::Images => "file-image",
            Self::Audio => "file-audio",
            Self::Video => "file-video",
            Self::Archives => "file-archive",
            Self::Code => "file-code",
            Self::Fonts => "file-type",
            Self::Databases => "database",
            Self::Executables => "cpu",
            Self::System => "settings",
            Self::Configuration => "sliders",
            Self::Backup => "archive-restore",
            Self::Temporary => "clock",
            Self::Empty | Self::Uncategorized => GENERIC_ICON,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
