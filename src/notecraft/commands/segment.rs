use crate::commands::CmdResult;
use crate::segment::{
    bullet_lines, line_preserving_blocks, paragraph_blocks, to_bullet_markup, BlankLinePolicy,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    /// Blank-line separated paragraphs, single breaks joined
    Paragraphs,
    /// Every physical line, blanks included
    Lines,
    /// Bullet entries with markers stripped
    Bullets,
    /// Text rewritten as `- item` lines
    BulletMarkup,
}

pub fn run(text: &str, mode: SegmentMode, policy: BlankLinePolicy) -> CmdResult {
    let lines = match mode {
        SegmentMode::Paragraphs => paragraph_blocks(text),
        SegmentMode::Lines => line_preserving_blocks(text),
        SegmentMode::Bullets => bullet_lines(text, policy),
        SegmentMode::BulletMarkup => {
            let markup = to_bullet_markup(text);
            if markup.is_empty() {
                Vec::new()
            } else {
                markup.split('\n').map(str::to_string).collect()
            }
        }
    };
    CmdResult::default().with_lines(lines)
}
