use crate::CapabilityProfile;

/// Characters used for bars, markers and the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    pub wick: char,
    pub body: char,
    pub high: char,
    pub low: char,
    pub close: char,
    pub vertical: char,
    pub horizontal: char,
    pub corner: char,
}

pub const UNICODE: GlyphSet = GlyphSet {
    wick: '│',
    body: '█',
    high: '▲',
    low: '▼',
    close: '●',
    vertical: '│',
    horizontal: '─',
    corner: '+',
};

pub const ASCII: GlyphSet = GlyphSet {
    wick: '|',
    body: '#',
    high: '^',
    low: 'v',
    close: 'o',
    vertical: '|',
    horizontal: '-',
    corner: '+',
};

impl GlyphSet {
    pub fn for_profile(profile: CapabilityProfile) -> &'static Self {
        if profile.use_unicode {
            &UNICODE
        } else {
            &ASCII
        }
    }
}
