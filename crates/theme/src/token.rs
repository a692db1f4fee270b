use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Keyword classes are named `kwa` through `kwz`, one lowercase letter each.
pub const MAX_KEYWORDS: usize = 26;

/// Number of token kinds that every theme styles, keywords excluded.
pub const FIXED_KIND_COUNT: usize = 12;

/// Position of a keyword class inside a theme's keyword list.
///
/// Always lower than [`MAX_KEYWORDS`], so the class letter stays in `a..=z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeywordSlot(u8);

impl KeywordSlot {
    pub fn new(index: usize) -> Option<Self> {
        if index < MAX_KEYWORDS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'a' + self.0) as char
    }
}

/// A lexical category (or the canvas) that a theme can style.
#[derive(Debug, Clone, Copy)]
pub enum TokenKind {
    Plain,
    Canvas,
    Number,
    String,
    Escape,
    PreProcessor,
    StringPreProc,
    BlockComment,
    LineComment,
    LineNum,
    Operator,
    Interpolation,
    Keyword(KeywordSlot),
}

impl TokenKind {
    /// Fixed kinds in storage index order.
    pub const FIXED: [TokenKind; FIXED_KIND_COUNT] = [
        TokenKind::Plain,
        TokenKind::Canvas,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Escape,
        TokenKind::PreProcessor,
        TokenKind::StringPreProc,
        TokenKind::BlockComment,
        TokenKind::LineComment,
        TokenKind::LineNum,
        TokenKind::Operator,
        TokenKind::Interpolation,
    ];

    /// Rule order of the generated stylesheet.
    pub const CSS_ORDER: [TokenKind; FIXED_KIND_COUNT] = [
        TokenKind::Canvas,
        TokenKind::Plain,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Escape,
        TokenKind::PreProcessor,
        TokenKind::StringPreProc,
        TokenKind::BlockComment,
        TokenKind::LineComment,
        TokenKind::LineNum,
        TokenKind::Operator,
        TokenKind::Interpolation,
    ];

    /// Row order of the HTML preview document.
    pub const PREVIEW_ORDER: [TokenKind; FIXED_KIND_COUNT] = [
        TokenKind::Plain,
        TokenKind::Canvas,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Escape,
        TokenKind::PreProcessor,
        TokenKind::StringPreProc,
        TokenKind::BlockComment,
        TokenKind::LineComment,
        TokenKind::LineNum,
        TokenKind::Operator,
        TokenKind::Interpolation,
    ];

    /// Line order of thumbnails; the canvas is the background, not a line.
    pub const THUMBNAIL_ORDER: [TokenKind; FIXED_KIND_COUNT - 1] = [
        TokenKind::Plain,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Escape,
        TokenKind::PreProcessor,
        TokenKind::StringPreProc,
        TokenKind::BlockComment,
        TokenKind::LineComment,
        TokenKind::LineNum,
        TokenKind::Operator,
        TokenKind::Interpolation,
    ];

    /// Entry order of the exported theme file. Differs from [`Self::CSS_ORDER`]
    /// and consumers of the file rely on it.
    pub const THEME_FILE_ORDER: [TokenKind; FIXED_KIND_COUNT] = [
        TokenKind::Plain,
        TokenKind::Canvas,
        TokenKind::Number,
        TokenKind::Escape,
        TokenKind::String,
        TokenKind::StringPreProc,
        TokenKind::BlockComment,
        TokenKind::LineComment,
        TokenKind::PreProcessor,
        TokenKind::LineNum,
        TokenKind::Operator,
        TokenKind::Interpolation,
    ];

    /// Keyword kind for the given list position, `None` past [`MAX_KEYWORDS`].
    pub fn keyword(index: usize) -> Option<Self> {
        KeywordSlot::new(index).map(TokenKind::Keyword)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < FIXED_KIND_COUNT {
            Some(Self::FIXED[index])
        } else {
            Self::keyword(index - FIXED_KIND_COUNT)
        }
    }

    pub fn index(self) -> usize {
        match self {
            TokenKind::Plain => 0,
            TokenKind::Canvas => 1,
            TokenKind::Number => 2,
            TokenKind::String => 3,
            TokenKind::Escape => 4,
            TokenKind::PreProcessor => 5,
            TokenKind::StringPreProc => 6,
            TokenKind::BlockComment => 7,
            TokenKind::LineComment => 8,
            TokenKind::LineNum => 9,
            TokenKind::Operator => 10,
            TokenKind::Interpolation => 11,
            TokenKind::Keyword(slot) => FIXED_KIND_COUNT + slot.index(),
        }
    }

    pub fn display_name(self) -> String {
        match self {
            TokenKind::Plain => "Default".into(),
            TokenKind::Canvas => "Background".into(),
            TokenKind::Number => "Number".into(),
            TokenKind::String => "String".into(),
            TokenKind::Escape => "Escape".into(),
            TokenKind::PreProcessor => "Preprocessor".into(),
            TokenKind::StringPreProc => "String preprocessor".into(),
            TokenKind::BlockComment => "Block comment".into(),
            TokenKind::LineComment => "Line comment".into(),
            TokenKind::LineNum => "Line number".into(),
            TokenKind::Operator => "Operator".into(),
            TokenKind::Interpolation => "Interpolation".into(),
            TokenKind::Keyword(slot) => format!("Keyword {}", slot.index() + 1),
        }
    }

    /// Ordered CSS classes carried by elements of this kind.
    pub fn css_classes(self) -> Vec<String> {
        let fixed: &[&str] = match self {
            TokenKind::Plain | TokenKind::Canvas => &["hl"],
            TokenKind::Number => &["hl", "num"],
            TokenKind::String => &["hl", "str"],
            TokenKind::Escape => &["hl", "esc"],
            TokenKind::PreProcessor => &["hl", "ppc"],
            TokenKind::StringPreProc => &["hl", "pps"],
            TokenKind::BlockComment => &["hl", "com"],
            TokenKind::LineComment => &["hl", "slc"],
            TokenKind::LineNum => &["hl", "lin"],
            TokenKind::Operator => &["hl", "opt"],
            TokenKind::Interpolation => &["hl", "ipl"],
            TokenKind::Keyword(slot) => {
                return vec!["hl".into(), "kw".into(), format!("kw{}", slot.letter())];
            }
        };
        fixed.iter().map(|class| class.to_string()).collect()
    }

    /// Class selector such as `.hl.num`.
    pub fn css_selector(self) -> String {
        let mut selector = String::new();
        for class in self.css_classes() {
            selector.push('.');
            selector.push_str(&class);
        }
        selector
    }

    /// Entry name in the exported theme file; keywords live in an unnamed list.
    pub fn theme_file_key(self) -> Option<&'static str> {
        match self {
            TokenKind::Plain => Some("Default"),
            TokenKind::Canvas => Some("Canvas"),
            TokenKind::Number => Some("Number"),
            TokenKind::String => Some("String"),
            TokenKind::Escape => Some("Escape"),
            TokenKind::PreProcessor => Some("PreProcessor"),
            TokenKind::StringPreProc => Some("StringPreProc"),
            TokenKind::BlockComment => Some("BlockComment"),
            TokenKind::LineComment => Some("LineComment"),
            TokenKind::LineNum => Some("LineNum"),
            TokenKind::Operator => Some("Operator"),
            TokenKind::Interpolation => Some("Interpolation"),
            TokenKind::Keyword(_) => None,
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    pub fn keyword_index(self) -> Option<usize> {
        match self {
            TokenKind::Keyword(slot) => Some(slot.index()),
            _ => None,
        }
    }
}

impl PartialEq for TokenKind {
    fn eq(&self, other: &Self) -> bool {
        self.index() == other.index()
    }
}

impl Eq for TokenKind {}

impl Hash for TokenKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index().hash(state);
    }
}

impl PartialOrd for TokenKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TokenKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixed_indices_are_unique_and_invertible() {
        let mut seen = HashSet::new();
        for kind in TokenKind::FIXED {
            assert!(kind.index() < FIXED_KIND_COUNT);
            assert!(seen.insert(kind.index()));
            assert_eq!(TokenKind::from_index(kind.index()), Some(kind));
        }
    }

    #[test]
    fn keyword_index_is_offset_by_fixed_kinds() {
        let kind = TokenKind::keyword(3).unwrap();
        assert_eq!(kind.index(), 15);
        assert_eq!(kind.keyword_index(), Some(3));
        assert!(kind.is_keyword());
        assert_eq!(TokenKind::from_index(15), Some(kind));
        assert_eq!(TokenKind::Number.keyword_index(), None);
    }

    #[test]
    fn keyword_class_letters_cover_the_alphabet() {
        let first = TokenKind::keyword(0).unwrap();
        assert_eq!(first.css_classes(), vec!["hl", "kw", "kwa"]);
        let last = TokenKind::keyword(25).unwrap();
        assert_eq!(last.css_classes().last().map(String::as_str), Some("kwz"));
        assert!(TokenKind::keyword(MAX_KEYWORDS).is_none());
        assert!(TokenKind::from_index(FIXED_KIND_COUNT + MAX_KEYWORDS).is_none());
    }

    #[test]
    fn keywords_with_the_same_index_are_equal() {
        let lhs = TokenKind::keyword(4).unwrap();
        let rhs = TokenKind::from_index(16).unwrap();
        assert_eq!(lhs, rhs);
        let set: HashSet<_> = [lhs, rhs].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_names_and_selectors() {
        assert_eq!(TokenKind::Plain.display_name(), "Default");
        assert_eq!(TokenKind::StringPreProc.to_string(), "String preprocessor");
        assert_eq!(TokenKind::keyword(1).unwrap().display_name(), "Keyword 2");
        assert_eq!(TokenKind::Canvas.css_selector(), ".hl");
        assert_eq!(TokenKind::LineComment.css_selector(), ".hl.slc");
        assert_eq!(TokenKind::keyword(2).unwrap().css_selector(), ".hl.kw.kwc");
    }

    #[test]
    fn orders_cover_every_fixed_kind() {
        for order in [
            TokenKind::CSS_ORDER,
            TokenKind::PREVIEW_ORDER,
            TokenKind::THEME_FILE_ORDER,
        ] {
            let set: HashSet<_> = order.iter().copied().collect();
            assert_eq!(set.len(), FIXED_KIND_COUNT);
        }
        assert!(!TokenKind::THUMBNAIL_ORDER.contains(&TokenKind::Canvas));
        assert_eq!(TokenKind::THEME_FILE_ORDER[3], TokenKind::Escape);
        assert_eq!(TokenKind::CSS_ORDER[3], TokenKind::String);
    }
}
