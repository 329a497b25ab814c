//! Plain-text rendering
//!
//! One line per paragraph, verse numbers inline, poetry paragraphs indented by their
//! `indent_level` times [`INDENT`].

use super::model::{Chapter, Paragraph, Scripture};

pub const INDENT: &str = "    ";

pub fn to_plain_text(scripture: &Scripture) -> String {
    let mut blocks = Vec::with_capacity(scripture.chapters().len() + 1);
    if !scripture.book().is_empty() {
        blocks.push(scripture.book().to_string());
    }
    blocks.extend(scripture.chapters().iter().map(render_chapter));
    blocks.join("\n\n")
}

pub fn render_chapter(chapter: &Chapter) -> String {
    let mut lines = vec![format!("Chapter {}", chapter.number)];
    lines.extend(chapter.paragraphs.iter().map(render_paragraph));
    lines.join("\n")
}

pub fn render_paragraph(paragraph: &Paragraph) -> String {
    let body = paragraph
        .verses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}{}", INDENT.repeat(paragraph.indent_level as usize), body)
}
