//! The closed set of source languages a notebook knows how to display.

use std::fmt;

/// A supported source language, selecting which highlighting grammar applies.
///
/// Adding a language means adding a variant here and extending the lookup
/// tables below; traversal and rendering dispatch through those tables and
/// never branch on concrete kinds themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    Cpp,
    Java,
}

impl SourceKind {
    /// Every supported kind.
    pub const ALL: &'static [SourceKind] = &[SourceKind::Cpp, SourceKind::Java];

    /// Maps a file extension to the source kind it denotes.
    pub fn from_extension(extension: &str) -> Option<SourceKind> {
        match extension {
            "cpp" => Some(SourceKind::Cpp),
            "java" => Some(SourceKind::Java),
            _ => None,
        }
    }

    /// The file extension associated with this kind.
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::Cpp => "cpp",
            SourceKind::Java => "java",
        }
    }

    /// The highlighting grammar for this kind, by the name syntect knows it as.
    pub fn syntax_name(self) -> &'static str {
        match self {
            SourceKind::Cpp => "C++",
            SourceKind::Java => "Java",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.extension())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn maps_extensions_to_kinds() {
        assert_eq!(Some(SourceKind::Cpp), SourceKind::from_extension("cpp"));
        assert_eq!(Some(SourceKind::Java), SourceKind::from_extension("java"));
        assert_eq!(None, SourceKind::from_extension("txt"));
        assert_eq!(None, SourceKind::from_extension("py"));
    }

    #[test]
    fn extension_round_trips_for_every_kind() {
        for kind in SourceKind::ALL {
            assert_eq!(Some(*kind), SourceKind::from_extension(kind.extension()));
        }
    }
}
