//! End-to-end tests over a tokenized excerpt of Jonah
//!
//! The fixture mirrors real tokenizer output: `zaln` alignment milestones around words,
//! `\ts\*` section markers, paragraph and quote markers filed under the preceding verse,
//! a footnote, an empty verse, a verse without objects and a chapter with no text.

use usfm_scripture::scripture::config::ConfigLoader;
use usfm_scripture::scripture::loader::ScriptureLoader;
use usfm_scripture::scripture::markers::ParagraphStyle;
use usfm_scripture::scripture::model::Scripture;
use usfm_scripture::scripture::navigation::SectionNavigator;
use usfm_scripture::scripture::reference::{parse, ReferenceResolver};
use usfm_scripture::scripture::render::to_plain_text;

const FIXTURE: &str = "tests/fixtures/jonah_excerpt.json";

fn jonah() -> Scripture {
    ScriptureLoader::from_path(FIXTURE)
        .expect("fixture is readable")
        .build()
        .expect("fixture builds")
}

#[test]
fn test_book_identity_from_headers() {
    let scripture = jonah();
    assert_eq!(scripture.book(), "Jonah");
    assert_eq!(scripture.book_code(), "JON");
}

#[test]
fn test_metadata_counts_what_survived() {
    let scripture = jonah();
    let metadata = scripture.metadata();
    // Chapter 3 has no text; 2:5 is blank and 2:6 has no verse objects.
    assert_eq!(metadata.total_chapters, 2);
    assert_eq!(metadata.total_verses, 11);
    assert_eq!(metadata.total_paragraphs, 5);
    assert!(scripture.chapter(3).is_none());
    assert!(scripture.verse(2, 5).is_none());
    assert!(scripture.verse(2, 6).is_none());
}

#[test]
fn test_alignment_and_footnotes_leave_clean_text() {
    let scripture = jonah();
    assert_eq!(
        scripture.verse(1, 1).unwrap().text,
        "Now the word of Yahweh came to Jonah son of Amittai, saying,"
    );
    assert_eq!(
        scripture.verse(1, 3).unwrap().text,
        "But Jonah rose up to flee to Tarshish from the presence of Yahweh."
    );
    assert_eq!(
        scripture.verse(2, 4).unwrap().text,
        "from the belly of Sheol I cried out for help!"
    );
    assert!(scripture.verse(1, 2).unwrap().text.contains("against it; for"));
}

#[test]
fn test_paragraphs_follow_trailing_markers() {
    let scripture = jonah();

    let one = scripture.chapter(1).unwrap();
    let ranges: Vec<_> = one
        .paragraphs
        .iter()
        .map(|p| (p.id.as_str(), p.style, p.start_verse, p.end_verse))
        .collect();
    assert_eq!(
        ranges,
        vec![
            ("1-p1", ParagraphStyle::P, 1, 3),
            ("1-p2", ParagraphStyle::P, 4, 7),
        ]
    );

    let two = scripture.chapter(2).unwrap();
    let styles: Vec<_> = two
        .paragraphs
        .iter()
        .map(|p| (p.style, p.indent_level, p.verse_count))
        .collect();
    assert_eq!(
        styles,
        vec![
            (ParagraphStyle::P, 0, 1),
            (ParagraphStyle::Q1, 1, 1),
            (ParagraphStyle::Q2, 2, 2),
        ]
    );
    assert_eq!(
        two.paragraphs[2].combined_text,
        "and he answered me; from the belly of Sheol I cried out for help!"
    );
}

#[test]
fn test_sections_cross_chapter_markers() {
    let scripture = jonah();
    let spans: Vec<_> = scripture
        .sections()
        .iter()
        .map(|s| (s.id.as_str(), s.start_reference.as_str(), s.end_reference.as_deref()))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("1", "JON 1:1", Some("JON 1:3")),
            ("2", "JON 1:4", Some("JON 1:7")),
            ("3", "JON 2:1", None),
        ]
    );

    let verse = scripture.verse(1, 5).unwrap();
    assert_eq!(verse.section_id.as_deref(), Some("2"));
    assert_eq!(verse.paragraph_id.as_deref(), Some("1-p2"));
    assert_eq!(
        scripture.verse(2, 4).unwrap().section_id.as_deref(),
        Some("3")
    );
}

#[test]
fn test_navigation_over_fixture() {
    let scripture = jonah();
    let navigator = SectionNavigator::new(&scripture);

    let second = navigator.by_reference(1, 6).unwrap();
    assert_eq!(second.title, "Section 2");
    assert_eq!(navigator.next(&second.id).unwrap().id, "3");
    assert_eq!(navigator.previous(&second.id).unwrap().id, "1");

    let last = navigator.last().unwrap();
    let numbers: Vec<_> = navigator.verses(last).iter().map(|v| v.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
}

#[test]
fn test_paragraph_resolution_is_partial_at_the_edges() {
    let scripture = jonah();
    let reference = parse("JON 1:3-5").unwrap();
    let slices = ReferenceResolver::new().resolve_paragraphs(&scripture, &reference);

    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].paragraph.id, "1-p1");
    assert!(slices[0].is_partial());
    assert_eq!(slices[0].verses.len(), 1);
    assert_eq!(slices[1].paragraph.id, "1-p2");
    assert_eq!(
        slices[1].text(),
        "But Yahweh sent out a great wind on the sea, Then the sailors were afraid,"
    );
}

#[test]
fn test_custom_title_template_from_config() {
    let config = ConfigLoader::new()
        .set_override("sections.title_template", "Passage {n}")
        .unwrap()
        .build()
        .unwrap();
    let scripture = ScriptureLoader::from_path(FIXTURE)
        .unwrap()
        .build_with(&config)
        .unwrap();
    let titles: Vec<_> = scripture.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Passage 1", "Passage 2", "Passage 3"]);
}

#[test]
fn test_json_output_shape() {
    let scripture = jonah();
    let value = serde_json::to_value(&scripture).unwrap();

    assert_eq!(value["bookCode"], "JON");
    assert_eq!(value["metadata"]["totalVerses"], 11);
    assert_eq!(value["chapters"][1]["paragraphs"][2]["style"], "q2");
    assert_eq!(value["chapters"][1]["paragraphs"][2]["indentLevel"], 2);
    assert_eq!(value["sections"][2]["endReference"], serde_json::Value::Null);
    assert_eq!(value["chapters"][0]["verses"][0]["reference"], "JON 1:1");

    let back: Scripture = serde_json::from_value(value).unwrap();
    assert_eq!(back, scripture);
}

#[test]
fn test_plain_text_rendering() {
    let scripture = jonah();
    insta::assert_snapshot!(to_plain_text(&scripture), @r#"
Jonah

Chapter 1
1 Now the word of Yahweh came to Jonah son of Amittai, saying, 2 Arise, go to Nineveh, that great city, and cry out against it; for their wickedness has come up before me. 3 But Jonah rose up to flee to Tarshish from the presence of Yahweh.
4 But Yahweh sent out a great wind on the sea, 5 Then the sailors were afraid, 6 So the captain came to him and said, 7 They all said to each other,

Chapter 2
1 Then Jonah prayed to Yahweh his God from the fish's belly.
    2 He said, I called to Yahweh out of my distress,
        3 and he answered me; 4 from the belly of Sheol I cried out for help!
"#);
}
