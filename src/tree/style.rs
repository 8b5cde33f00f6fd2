/// Glyphs used to draw the tree.
///
/// `mid` and `end` are the edge markers in front of non-last and last
/// siblings. `link` and `blank` are the full-width segments drawn for every
/// ancestor column, depending on whether that ancestor still has siblings
/// below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStyle {
    pub mid: String,
    pub end: String,
    pub link: String,
    pub blank: String,
}

/// Spaces after the link glyph, so every ancestor column lines up with the
/// three-character edge markers plus the separating space.
const INDENT_SIZE: usize = 3;

impl TreeStyle {
    pub fn new(
        mid: impl Into<String>,
        end: impl Into<String>,
        link: impl Into<String>,
        blank: impl Into<String>,
    ) -> Self {
        Self {
            mid: mid.into(),
            end: end.into(),
            link: link.into(),
            blank: blank.into(),
        }
    }

    pub fn unicode() -> Self {
        Self::from_link("├──", "└──", "│")
    }

    pub fn rounded() -> Self {
        Self::from_link("├──", "╰──", "│")
    }

    pub fn ascii() -> Self {
        Self::from_link("|--", "`--", "|")
    }

    fn from_link(mid: &str, end: &str, link: &str) -> Self {
        Self::new(
            mid,
            end,
            format!("{link}{}", " ".repeat(INDENT_SIZE)),
            " ".repeat(INDENT_SIZE + 1),
        )
    }
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self::unicode()
    }
}
