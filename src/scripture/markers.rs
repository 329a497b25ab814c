//! Marker tree nodes
//!
//!     The external tokenizer turns each verse of a USFM book into a list of "verse objects":
//!     plain text runs, words, alignment milestones (which wrap words and may nest arbitrarily),
//!     paragraph/poetry markers and translation-section breaks. This module holds the typed
//!     form of those objects and the lenient decoder that builds it from the tokenizer's JSON.
//!
//! Decoding Rules
//!
//!     | JSON object                                   | Node                        |
//!     |-----------------------------------------------|-----------------------------|
//!     | `{type:"text", text}`                         | Text                        |
//!     | `{tag:"w", type:"word", text}`                | Word                        |
//!     | `{tag:"zaln", type:"milestone", children}`    | Milestone                   |
//!     | `{tag, type:"character", children?, text?}`   | Milestone (text kept)       |
//!     | `{tag:"p"/"q1"/..., type:"paragraph"/"quote"}`| ParagraphMarker (+ Text)    |
//!     | `{tag:"ts\*"}` or `{tag:"ts", content:"\*"}`  | SectionBreakMarker          |
//!
//!     Anything else (footnotes, cross references, end markers, objects missing their text)
//!     contributes nothing and is skipped. A bad node never aborts the verse.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One node of a verse's marker tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerNode {
    /// A run of plain text
    Text { value: String },
    /// A single word (`\w`)
    Word { value: String },
    /// A wrapper span (alignment or character style); only its children produce text
    Milestone {
        tag: String,
        children: Vec<MarkerNode>,
    },
    /// Opens a new paragraph with the given style
    ParagraphMarker { style: ParagraphStyle },
    /// Translation section break (`\ts\*`)
    SectionBreakMarker,
}

impl MarkerNode {
    pub fn text(value: impl Into<String>) -> Self {
        MarkerNode::Text {
            value: value.into(),
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        MarkerNode::Word {
            value: value.into(),
        }
    }

    pub fn milestone(tag: impl Into<String>, children: Vec<MarkerNode>) -> Self {
        MarkerNode::Milestone {
            tag: tag.into(),
            children,
        }
    }

    pub fn paragraph(style: ParagraphStyle) -> Self {
        MarkerNode::ParagraphMarker { style }
    }
}

// Alignment chains can nest thousands deep; unwind them without recursing.
impl Drop for MarkerNode {
    fn drop(&mut self) {
        let MarkerNode::Milestone { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let MarkerNode::Milestone { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// Paragraph styles recognised by the segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParagraphStyle {
    #[default]
    P,
    Q,
    Q1,
    Q2,
    Q3,
    Q4,
    M,
    Mi,
    Pc,
    Pr,
    Cls,
}

impl ParagraphStyle {
    pub const ALL: [ParagraphStyle; 11] = [
        ParagraphStyle::P,
        ParagraphStyle::Q,
        ParagraphStyle::Q1,
        ParagraphStyle::Q2,
        ParagraphStyle::Q3,
        ParagraphStyle::Q4,
        ParagraphStyle::M,
        ParagraphStyle::Mi,
        ParagraphStyle::Pc,
        ParagraphStyle::Pr,
        ParagraphStyle::Cls,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParagraphStyle::P => "p",
            ParagraphStyle::Q => "q",
            ParagraphStyle::Q1 => "q1",
            ParagraphStyle::Q2 => "q2",
            ParagraphStyle::Q3 => "q3",
            ParagraphStyle::Q4 => "q4",
            ParagraphStyle::M => "m",
            ParagraphStyle::Mi => "mi",
            ParagraphStyle::Pc => "pc",
            ParagraphStyle::Pr => "pr",
            ParagraphStyle::Cls => "cls",
        }
    }

    /// Indentation multiplier used by renderers. `q` is the base poetry level.
    pub fn indent_level(&self) -> u32 {
        match self {
            ParagraphStyle::Q | ParagraphStyle::Q1 => 1,
            ParagraphStyle::Q2 => 2,
            ParagraphStyle::Q3 => 3,
            ParagraphStyle::Q4 => 4,
            ParagraphStyle::P
            | ParagraphStyle::M
            | ParagraphStyle::Mi
            | ParagraphStyle::Pc
            | ParagraphStyle::Pr
            | ParagraphStyle::Cls => 0,
        }
    }
}

impl fmt::Display for ParagraphStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a list of verse objects, skipping anything that cannot be interpreted.
///
/// Nested children are walked with an explicit stack, so depth costs heap rather than call frames.
pub fn decode_verse_objects(values: &[Value]) -> Vec<MarkerNode> {
    let mut stack = vec![Frame::new(String::new(), values, Vec::with_capacity(values.len()))];
    while let Some(frame) = stack.last_mut() {
        if let Some(value) = frame.values.next() {
            if let Some(nested) = decode_into(value, &mut frame.nodes) {
                stack.push(nested);
            }
            continue;
        }
        let Some(done) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => parent.nodes.push(MarkerNode::milestone(done.tag, done.nodes)),
            None => return done.nodes,
        }
    }
    Vec::new()
}

/// A wrapper whose children are still being decoded
struct Frame<'v> {
    tag: String,
    values: std::slice::Iter<'v, Value>,
    nodes: Vec<MarkerNode>,
}

impl<'v> Frame<'v> {
    fn new(tag: String, values: &'v [Value], nodes: Vec<MarkerNode>) -> Self {
        Self {
            tag,
            values: values.iter(),
            nodes,
        }
    }
}

/// Decode one object into `out`, or hand back a frame when it wraps children
fn decode_into<'v>(value: &'v Value, out: &mut Vec<MarkerNode>) -> Option<Frame<'v>> {
    let Some(object) = value.as_object() else {
        log::debug!("skipping non-object verse entry");
        return None;
    };
    let tag = object.get("tag").and_then(Value::as_str);
    let kind = object.get("type").and_then(Value::as_str);
    let text = object.get("text").and_then(Value::as_str);
    let content = object.get("content").and_then(Value::as_str);

    if is_section_break(tag, content) {
        out.push(MarkerNode::SectionBreakMarker);
        return None;
    }

    let children: &'v [Value] = object
        .get("children")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let wrapper = |inner: Vec<MarkerNode>| {
        Some(Frame::new(tag.unwrap_or_default().to_string(), children, inner))
    };

    match (kind, text) {
        (Some("text"), Some(text)) => out.push(MarkerNode::text(text)),
        (Some("word"), Some(text)) => out.push(MarkerNode::word(text)),
        (Some("milestone"), _) => return wrapper(Vec::new()),
        (Some("character"), text) => {
            return wrapper(text.map(MarkerNode::text).into_iter().collect());
        }
        (Some(kind @ ("paragraph" | "quote")), text) => {
            let style = tag.and_then(ParagraphStyle::from_tag).unwrap_or_else(|| {
                log::debug!("unknown {kind} style {tag:?}, using fallback");
                if kind == "quote" {
                    ParagraphStyle::Q
                } else {
                    ParagraphStyle::P
                }
            });
            out.push(MarkerNode::paragraph(style));
            if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                out.push(MarkerNode::text(text));
            }
        }
        _ => match tag.and_then(ParagraphStyle::from_tag) {
            Some(style) if kind.is_none() => out.push(MarkerNode::paragraph(style)),
            _ => log::debug!("skipping verse object tag={tag:?} type={kind:?}"),
        },
    }
    None
}

fn is_section_break(tag: Option<&str>, content: Option<&str>) -> bool {
    match tag {
        Some("ts\\*") | Some("ts*") => true,
        Some("ts") => matches!(content.map(str::trim), Some("\\*") | Some("*")),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_indent_levels() {
        assert_eq!(ParagraphStyle::P.indent_level(), 0);
        assert_eq!(ParagraphStyle::Q.indent_level(), 1);
        assert_eq!(ParagraphStyle::Q1.indent_level(), 1);
        assert_eq!(ParagraphStyle::Q2.indent_level(), 2);
        assert_eq!(ParagraphStyle::Q3.indent_level(), 3);
        assert_eq!(ParagraphStyle::Q4.indent_level(), 4);
        assert_eq!(ParagraphStyle::Mi.indent_level(), 0);
    }

    #[test]
    fn test_style_tags_round_trip() {
        for style in ParagraphStyle::ALL {
            assert_eq!(ParagraphStyle::from_tag(style.as_str()), Some(style));
        }
        assert_eq!(ParagraphStyle::from_tag("nb"), None);
    }

    #[test]
    fn test_decode_alignment_tree() {
        let objects = vec![json!({
            "tag": "zaln",
            "type": "milestone",
            "strong": "H3068",
            "lemma": "יְהֹוָה",
            "children": [{ "tag": "w", "type": "word", "text": "Yahweh", "occurrence": "1" }]
        })];
        let nodes = decode_verse_objects(&objects);
        assert_eq!(
            nodes,
            vec![MarkerNode::milestone("zaln", vec![MarkerNode::word("Yahweh")])]
        );
    }

    #[test]
    fn test_decode_nested_milestones_keep_order() {
        let inner = json!({
            "tag": "zaln",
            "type": "milestone",
            "children": [{ "tag": "w", "type": "word", "text": "b" }]
        });
        let objects = vec![
            json!({
                "tag": "zaln",
                "type": "milestone",
                "children": [{ "type": "text", "text": "a" }, inner, { "type": "text", "text": "c" }]
            }),
            json!({ "tag": "zaln", "type": "milestone" }),
            json!({ "type": "text", "text": "d" }),
        ];
        assert_eq!(
            decode_verse_objects(&objects),
            vec![
                MarkerNode::milestone(
                    "zaln",
                    vec![
                        MarkerNode::text("a"),
                        MarkerNode::milestone("zaln", vec![MarkerNode::word("b")]),
                        MarkerNode::text("c"),
                    ]
                ),
                MarkerNode::milestone("zaln", vec![]),
                MarkerNode::text("d"),
            ]
        );
    }

    #[test]
    fn test_dropping_a_deep_tree_is_iterative() {
        let mut node = MarkerNode::word("deep");
        for _ in 0..200_000 {
            node = MarkerNode::milestone("zaln", vec![node, MarkerNode::text(" ")]);
        }
        drop(node);
    }

    #[test]
    fn test_decode_section_breaks() {
        let objects = vec![
            json!({ "tag": "ts\\*" }),
            json!({ "tag": "ts*", "type": "milestone" }),
            json!({ "tag": "ts", "content": "\\*" }),
            json!({ "tag": "ts", "content": "other" }),
        ];
        let nodes = decode_verse_objects(&objects);
        assert_eq!(nodes.len(), 3);
        assert!(nodes.iter().all(|n| *n == MarkerNode::SectionBreakMarker));
    }

    #[test]
    fn test_decode_paragraph_markers() {
        let objects = vec![
            json!({ "tag": "q2", "type": "quote" }),
            json!({ "tag": "q1", "type": "quote", "text": "Then Jonah prayed" }),
            json!({ "tag": "nb", "type": "paragraph" }),
            json!({ "tag": "qm", "type": "quote" }),
        ];
        let nodes = decode_verse_objects(&objects);
        assert_eq!(
            nodes,
            vec![
                MarkerNode::paragraph(ParagraphStyle::Q2),
                MarkerNode::paragraph(ParagraphStyle::Q1),
                MarkerNode::text("Then Jonah prayed"),
                MarkerNode::paragraph(ParagraphStyle::P),
                MarkerNode::paragraph(ParagraphStyle::Q),
            ]
        );
    }

    #[test]
    fn test_decode_skips_malformed_nodes() {
        let objects = vec![
            json!("stray string"),
            json!({ "type": "text" }),
            json!({ "tag": "f", "type": "footnote", "content": "+ note" }),
            json!({ "type": "text", "text": "kept" }),
        ];
        assert_eq!(decode_verse_objects(&objects), vec![MarkerNode::text("kept")]);
    }

    #[test]
    fn test_decode_character_span_keeps_text() {
        let objects = vec![json!({
            "tag": "add",
            "type": "character",
            "text": "the ",
            "children": [{ "type": "text", "text": "sea" }]
        })];
        assert_eq!(
            decode_verse_objects(&objects),
            vec![MarkerNode::milestone(
                "add",
                vec![MarkerNode::text("the "), MarkerNode::text("sea")]
            )]
        );
    }
}
