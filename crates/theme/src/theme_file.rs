use std::fmt::Write as _;

use crate::style::StyleAttributes;
use crate::theme::Theme;
use crate::token::TokenKind;

impl Theme {
    /// Serializes the theme in the Lua-like format read by the highlighter.
    pub fn to_theme_file_text(&self) -> String {
        let mut text = String::new();
        let _ = write!(text, "Name = \"{}\"\n\n", escape_lua(self.name()));
        let _ = write!(text, "Description = \"{}\"\n\n", escape_lua(self.description()));
        if let Some(category) = self.appearance().category() {
            let _ = write!(text, "Categories = {{ \"{category}\" }}\n\n");
        }

        for kind in TokenKind::THEME_FILE_ORDER {
            if let (Some(key), Some(style)) = (kind.theme_file_key(), self.style(kind)) {
                let _ = writeln!(text, "{key}\t= {}", property_group(style));
            }
        }

        text.push_str("\nKeywords = {\n");
        for keyword in self.keywords() {
            let _ = writeln!(text, "\t{}, ", property_group(keyword));
        }
        text.push_str("}\n\n");
        text
    }
}

fn property_group(style: &StyleAttributes) -> String {
    let mut fields = Vec::with_capacity(4);
    if let Some(color) = style.color() {
        fields.push(format!("Colour=\"{}\"", escape_lua(color)));
    }
    if let Some(bold) = style.bold {
        fields.push(format!("Bold={}", lua_bool(bold)));
    }
    if let Some(italic) = style.italic {
        fields.push(format!("Italic={}", lua_bool(italic)));
    }
    if let Some(underline) = style.underline {
        fields.push(format!("Underline={}", lua_bool(underline)));
    }
    format!("{{ {} }}", fields.join(", "))
}

fn lua_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Escapes text for a double-quoted Lua string literal.
pub fn escape_lua(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\0' => output.push_str("\\0"),
            _ => output.push(ch),
        }
    }
    output
}
