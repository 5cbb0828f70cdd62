//! HTML formatting of summaries for display.

/// Line-break markup emitted for each newline.
pub const LINE_BREAK: &str = "<br>";

/// Replace every `\n` with `<br>`.
///
/// Nothing is escaped: summaries carry the template's own `<strong>` labels,
/// which must reach the page as markup.
pub fn newlines_to_br(s: &str) -> String {
    s.replace('\n', LINE_BREAK)
}
