use std::fmt::Write as _;

use crate::style::StyleAttributes;
use crate::theme::Theme;
use crate::token::TokenKind;

const CANVAS_FALLBACK: &str = "#ffffff";

impl Theme {
    /// Stylesheet with one rule per token kind, keywords last.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(background) = self.canvas().color() {
            let _ = writeln!(css, "body {{ background-color: {background}; }}");
        }
        if let Some(color) = self.plain().color() {
            let _ = writeln!(css, "body {{ color: {color}; }}");
        }
        for (kind, style) in self.styles_in(&TokenKind::CSS_ORDER) {
            push_rule(&mut css, kind, style);
        }
        css
    }

    /// Standalone HTML page listing every token kind in its own style.
    pub fn to_html_preview(&self) -> String {
        let mut html = String::new();
        html.push_str("<html>\n<head>\n");
        let _ = writeln!(html, "        <title>{}</title>", escape_html(self.name()));
        html.push_str("<style type=\"text/css\">\n");
        html.push_str("body {\n");
        html.push_str("    font-family: ui-monospace, -apple-system, BlinkMacSystemFont, sans-serif;\n");
        html.push_str("    user-select: none;\n");
        html.push_str("}\n");
        html.push_str(&self.to_css());
        html.push_str("\n</style>\n</head>\n\n<body>\n    <pre>\n");
        for (kind, _) in self.styles_in(&TokenKind::PREVIEW_ORDER) {
            let _ = writeln!(
                html,
                "<div class='{}'>{}</div>",
                kind.css_classes().join(" "),
                escape_html(&kind.display_name())
            );
        }
        html.push_str("    </pre>\n</body>\n</html>\n");
        html
    }
}

fn push_rule(css: &mut String, kind: TokenKind, style: &StyleAttributes) {
    css.push_str(&kind.css_selector());
    css.push_str(" {\n");
    if kind == TokenKind::Canvas {
        let background = style.color().unwrap_or(CANVAS_FALLBACK);
        let _ = writeln!(css, "    background-color: {background};");
    } else {
        css.push_str(&style.to_css_declarations());
    }
    css.push_str("}\n");
}

fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_selectors(css: &str) -> Vec<&str> {
        css.lines()
            .filter(|line| line.starts_with('.') && line.ends_with(" {"))
            .map(|line| line.trim_end_matches(" {"))
            .collect()
    }

    #[test]
    fn default_theme_css_matches_reference() {
        let theme = Theme::new("Test");
        let css = theme.to_css();
        assert!(css.starts_with(
            "body { background-color: #ffffff; }\nbody { color: #000000; }\n.hl {\n    background-color: #ffffff;\n}\n.hl {\ncolor: #000000; }\n"
        ));
        assert!(!css.contains(".kw"));
    }

    #[test]
    fn one_rule_per_kind_in_fixed_order() {
        let mut theme = Theme::new("Ordered");
        theme.push_keyword(StyleAttributes::with_color("#aa0000")).unwrap();
        theme.push_keyword(StyleAttributes::default()).unwrap();
        let css = theme.to_css();
        assert_eq!(
            rule_selectors(&css),
            vec![
                ".hl", ".hl", ".hl.num", ".hl.str", ".hl.esc", ".hl.ppc", ".hl.pps", ".hl.com",
                ".hl.slc", ".hl.lin", ".hl.opt", ".hl.ipl", ".hl.kw.kwa", ".hl.kw.kwb",
            ]
        );
        assert!(css.contains(".hl.kw.kwa {\ncolor: #aa0000; }\n"));
        assert!(css.contains(".hl.kw.kwb {\n}\n"));
    }

    #[test]
    fn canvas_rule_falls_back_to_white_and_body_rules_are_optional() {
        let mut theme = Theme::new("Bare");
        theme.update_style(TokenKind::Canvas, |style| style.clear()).unwrap();
        theme.update_style(TokenKind::Plain, |style| style.clear()).unwrap();
        let css = theme.to_css();
        assert!(!css.contains("body"));
        assert!(css.starts_with(".hl {\n    background-color: #ffffff;\n}\n"));
    }

    #[test]
    fn html_preview_lists_every_kind() {
        let mut theme = Theme::new("<Preview>");
        theme.push_keyword(StyleAttributes::default()).unwrap();
        let html = theme.to_html_preview();
        assert!(html.contains("<title>&lt;Preview&gt;</title>"));
        assert!(html.contains(&theme.to_css()));
        let first = html.find("<div class='hl'>Default</div>").unwrap();
        let second = html.find("<div class='hl'>Background</div>").unwrap();
        let last = html.find("<div class='hl kw kwa'>Keyword 1</div>").unwrap();
        assert!(first < second && second < last);
        assert_eq!(html.matches("<div ").count(), 13);
        assert!(html.trim_end().ends_with("</html>"));
    }
}
