use clap::ValueEnum;

use crate::tree::TreeStyle;

/// Built-in tree glyph sets.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StyleName {
    #[default]
    Unicode,
    Ascii,
    Rounded,
}

impl StyleName {
    pub fn to_style(self) -> TreeStyle {
        match self {
            StyleName::Unicode => TreeStyle::unicode(),
            StyleName::Ascii => TreeStyle::ascii(),
            StyleName::Rounded => TreeStyle::rounded(),
        }
    }
}
