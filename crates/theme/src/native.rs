//! Import from the C structures produced by the native theme parser.

use std::ffi::{c_char, c_int, CStr, CString};
use std::marker::PhantomData;
use std::ops::Deref;
use std::path::PathBuf;
use std::ptr;

use crate::style::{non_empty_color, StyleAttributes};
use crate::theme::{Appearance, Theme};
use crate::token::{TokenKind, FIXED_KIND_COUNT, MAX_KEYWORDS};

/// Style of one token kind as laid out by the native parser.
///
/// Flags are tri-state: negative is unset, zero is false, positive is true.
#[repr(C)]
#[derive(Debug)]
pub struct HThemeProperty {
    pub color: *const c_char,
    pub bold: c_int,
    pub italic: c_int,
    pub underline: c_int,
}

/// Theme record as laid out by the native parser.
#[repr(C)]
#[derive(Debug)]
pub struct HTheme {
    pub name: *const c_char,
    pub desc: *const c_char,
    pub path: *const c_char,
    pub appearance: c_int,
    pub standalone: c_int,
    pub base16: c_int,
    pub plain: *const HThemeProperty,
    pub canvas: *const HThemeProperty,
    pub number: *const HThemeProperty,
    pub string: *const HThemeProperty,
    pub escape: *const HThemeProperty,
    pub pre_processor: *const HThemeProperty,
    pub string_pre_proc: *const HThemeProperty,
    pub block_comment: *const HThemeProperty,
    pub line_comment: *const HThemeProperty,
    pub line_num: *const HThemeProperty,
    pub operator_prop: *const HThemeProperty,
    pub interpolation: *const HThemeProperty,
    pub keyword_count: c_int,
    pub keywords: *const *const HThemeProperty,
}

impl HTheme {
    fn property(&self, kind: TokenKind) -> *const HThemeProperty {
        match kind {
            TokenKind::Plain => self.plain,
            TokenKind::Canvas => self.canvas,
            TokenKind::Number => self.number,
            TokenKind::String => self.string,
            TokenKind::Escape => self.escape,
            TokenKind::PreProcessor => self.pre_processor,
            TokenKind::StringPreProc => self.string_pre_proc,
            TokenKind::BlockComment => self.block_comment,
            TokenKind::LineComment => self.line_comment,
            TokenKind::LineNum => self.line_num,
            TokenKind::Operator => self.operator_prop,
            TokenKind::Interpolation => self.interpolation,
            TokenKind::Keyword(_) => ptr::null(),
        }
    }
}

fn tri_state(value: c_int) -> Option<bool> {
    if value < 0 {
        None
    } else {
        Some(value > 0)
    }
}

impl Theme {
    /// Builds a theme from the native parser's record. The result is clean.
    ///
    /// Null strings import as empty, a null property imports as fully unset and
    /// null keyword entries are skipped.
    ///
    /// # Safety
    ///
    /// Every non-null pointer reachable from `native` must point to valid,
    /// NUL-terminated strings or properly aligned structures, and `keywords`
    /// must hold at least `keyword_count` entries when it is not null.
    pub unsafe fn from_native(native: &HTheme) -> Theme {
        let mut theme = Theme::new(read_string(native.name).unwrap_or_default());
        theme.set_description(read_string(native.desc).unwrap_or_default());
        theme.set_path(read_string(native.path).filter(|path| !path.is_empty()).map(PathBuf::from));
        theme.set_flags(
            Appearance::from_code(native.appearance as i64),
            native.standalone > 0,
            native.base16 > 0,
        );

        for kind in TokenKind::FIXED {
            *theme.fixed_mut(kind) = import_property(native.property(kind));
        }

        let mut keywords = Vec::new();
        let count = usize::try_from(native.keyword_count).unwrap_or(0);
        if !native.keywords.is_null() {
            for index in 0..count {
                let entry = *native.keywords.add(index);
                if entry.is_null() {
                    continue;
                }
                if keywords.len() == MAX_KEYWORDS {
                    tracing::warn!(
                        theme = theme.name(),
                        count,
                        "dropping keyword classes beyond the supported limit"
                    );
                    break;
                }
                keywords.push(import_property(entry));
            }
        }
        theme.replace_keywords(keywords);
        theme.mark_clean();

        tracing::debug!(
            theme = theme.name(),
            keywords = theme.keywords().len(),
            "imported native theme"
        );
        theme
    }
}

unsafe fn read_string(value: *const c_char) -> Option<String> {
    if value.is_null() {
        None
    } else {
        Some(CStr::from_ptr(value).to_string_lossy().into_owned())
    }
}

unsafe fn import_property(property: *const HThemeProperty) -> StyleAttributes {
    match property.as_ref() {
        Some(property) => StyleAttributes {
            color: non_empty_color(read_string(property.color)),
            bold: tri_state(property.bold),
            italic: tri_state(property.italic),
            underline: tri_state(property.underline),
        },
        None => StyleAttributes::default(),
    }
}

/// Property values used to assemble an [`OwnedNativeTheme`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeProperty {
    pub color: Option<String>,
    pub bold: c_int,
    pub italic: c_int,
    pub underline: c_int,
}

impl NativeProperty {
    pub fn unset() -> Self {
        Self {
            color: None,
            bold: -1,
            italic: -1,
            underline: -1,
        }
    }

    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::unset()
        }
    }

    /// Decodes a native tri-state flag.
    pub fn tri_state(value: c_int) -> Option<bool> {
        tri_state(value)
    }

    fn encode(flag: Option<bool>) -> c_int {
        match flag {
            None => -1,
            Some(false) => 0,
            Some(true) => 1,
        }
    }
}

impl From<&StyleAttributes> for NativeProperty {
    fn from(style: &StyleAttributes) -> Self {
        Self {
            color: style.color().map(str::to_string),
            bold: Self::encode(style.bold),
            italic: Self::encode(style.italic),
            underline: Self::encode(style.underline),
        }
    }
}

/// Owns the strings and property blocks behind an [`HTheme`], for hosts that
/// assemble the native record in Rust.
#[derive(Debug)]
pub struct OwnedNativeTheme {
    strings: Vec<CString>,
    name: *const c_char,
    desc: *const c_char,
    path: *const c_char,
    appearance: c_int,
    standalone: c_int,
    base16: c_int,
    fixed: [Option<Box<HThemeProperty>>; FIXED_KIND_COUNT],
    keywords: Vec<Option<Box<HThemeProperty>>>,
    keyword_ptrs: Vec<*const HThemeProperty>,
}

impl OwnedNativeTheme {
    pub fn new(name: &str) -> Self {
        let mut owned = Self {
            strings: Vec::new(),
            name: ptr::null(),
            desc: ptr::null(),
            path: ptr::null(),
            appearance: 0,
            standalone: 0,
            base16: 0,
            fixed: Default::default(),
            keywords: Vec::new(),
            keyword_ptrs: Vec::new(),
        };
        owned.name = owned.intern(name);
        owned
    }

    /// Record with every pointer null, as a parser failure would leave it.
    pub fn empty() -> Self {
        let mut owned = Self::new("");
        owned.name = ptr::null();
        owned
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.desc = self.intern(desc);
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = self.intern(path);
        self
    }

    pub fn appearance(mut self, code: c_int) -> Self {
        self.appearance = code;
        self
    }

    pub fn standalone(mut self, flag: c_int) -> Self {
        self.standalone = flag;
        self
    }

    pub fn base16(mut self, flag: c_int) -> Self {
        self.base16 = flag;
        self
    }

    /// Sets the property of a fixed kind; keyword kinds are ignored.
    pub fn property(mut self, kind: TokenKind, property: NativeProperty) -> Self {
        if !kind.is_keyword() {
            let block = self.block(property);
            self.fixed[kind.index()] = Some(block);
        }
        self
    }

    pub fn keyword(mut self, property: NativeProperty) -> Self {
        let block = self.block(property);
        self.keywords.push(Some(block));
        self.refresh_keyword_ptrs();
        self
    }

    /// Appends a null keyword entry.
    pub fn null_keyword(mut self) -> Self {
        self.keywords.push(None);
        self.refresh_keyword_ptrs();
        self
    }

    /// Borrows the assembled native record.
    pub fn as_native(&self) -> NativeThemeRef<'_> {
        let fixed = |kind: TokenKind| -> *const HThemeProperty {
            self.fixed[kind.index()]
                .as_deref()
                .map_or(ptr::null(), |block| block as *const HThemeProperty)
        };
        NativeThemeRef {
            raw: HTheme {
                name: self.name,
                desc: self.desc,
                path: self.path,
                appearance: self.appearance,
                standalone: self.standalone,
                base16: self.base16,
                plain: fixed(TokenKind::Plain),
                canvas: fixed(TokenKind::Canvas),
                number: fixed(TokenKind::Number),
                string: fixed(TokenKind::String),
                escape: fixed(TokenKind::Escape),
                pre_processor: fixed(TokenKind::PreProcessor),
                string_pre_proc: fixed(TokenKind::StringPreProc),
                block_comment: fixed(TokenKind::BlockComment),
                line_comment: fixed(TokenKind::LineComment),
                line_num: fixed(TokenKind::LineNum),
                operator_prop: fixed(TokenKind::Operator),
                interpolation: fixed(TokenKind::Interpolation),
                keyword_count: self.keyword_ptrs.len() as c_int,
                keywords: if self.keyword_ptrs.is_empty() {
                    ptr::null()
                } else {
                    self.keyword_ptrs.as_ptr()
                },
            },
            _owner: PhantomData,
        }
    }

    /// Imports the assembled record.
    pub fn to_theme(&self) -> Theme {
        let native = self.as_native();
        // SAFETY: every pointer in the record refers to storage owned by `self`.
        unsafe { Theme::from_native(&native) }
    }

    fn intern(&mut self, value: &str) -> *const c_char {
        let cstring = CString::new(value.replace('\0', "")).unwrap_or_default();
        let pointer = cstring.as_ptr();
        self.strings.push(cstring);
        pointer
    }

    fn block(&mut self, property: NativeProperty) -> Box<HThemeProperty> {
        let color = match property.color.as_deref() {
            Some(color) => self.intern(color),
            None => ptr::null(),
        };
        Box::new(HThemeProperty {
            color,
            bold: property.bold,
            italic: property.italic,
            underline: property.underline,
        })
    }

    fn refresh_keyword_ptrs(&mut self) {
        self.keyword_ptrs = self
            .keywords
            .iter()
            .map(|entry| {
                entry
                    .as_deref()
                    .map_or(ptr::null(), |block| block as *const HThemeProperty)
            })
            .collect();
    }
}

/// An [`HTheme`] whose pointers stay valid while the owning builder lives.
pub struct NativeThemeRef<'a> {
    raw: HTheme,
    _owner: PhantomData<&'a OwnedNativeTheme>,
}

impl Deref for NativeThemeRef<'_> {
    type Target = HTheme;

    fn deref(&self) -> &HTheme {
        &self.raw
    }
}
