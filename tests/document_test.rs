//! Loading, flattening and interactively walking whole documents

use std::fs;
use std::io::Cursor;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

use self_help::flatten::to_markdown_document;
use self_help::interactive::{self, InteractiveOptions, LinePrompt, Outcome};
use self_help::{Node, SourceError, load_document};

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).expect("write fixture");
}

fn markdown_docs() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(&temp, "README.md", "# Help\n\n- [Install](install.md)\n- [Usage](usage/)\n");
    write(&temp, "install.md", "Run the **installer**.\n");
    write(&temp, "usage/README.md", "# Usage\n\n- [Basics](basics.md)\n");
    write(&temp, "usage/basics.md", "Start here.\n");
    temp
}

#[test]
fn given_markdown_directory_when_flattening_then_nested_details_are_produced() {
    let temp = markdown_docs();
    let root = load_document(temp.path()).unwrap();

    let markdown = to_markdown_document(&root).unwrap();

    assert_eq!(
        markdown,
        "<ul><li><details><summary>Help</summary><ul>\
         <li><details><summary>Install</summary><ul>\n\nRun the **installer**.\n\n</ul></details></li>\
         <li><details><summary>Usage</summary><ul>\
         <li><details><summary>Basics</summary><ul>\n\nStart here.\n\n</ul></details></li>\
         </ul></details></li>\
         </ul></details></li></ul>\n"
    );
}

#[test]
fn given_json_with_include_when_navigating_then_included_children_appear() {
    let temp = markdown_docs();
    write(
        &temp,
        "doc.json",
        r#"{
            "label": "Start",
            "children": [
                { "label": "Quick answer", "value": "42" },
                { "label": "Full docs", "include": "./README.md" }
            ]
        }"#,
    );

    let root = load_document(&temp.path().join("doc.json")).unwrap();
    let mut prompt = LinePrompt::new(Cursor::new("2\n2\n1\n"), Vec::new());
    let mut out = Vec::new();
    let outcome = interactive::run(root, &mut prompt, &mut out, &InteractiveOptions::default())
        .unwrap();

    assert_eq!(outcome, Outcome::Answered("Start here.".to_string()));
    assert_eq!(String::from_utf8(out).unwrap(), "? Basics\n\nStart here.\n");
}

#[test]
fn given_scripted_answers_when_prompt_lists_choices_then_transcript_matches() {
    let temp = markdown_docs();
    let root = load_document(temp.path()).unwrap();

    let mut transcript = Vec::new();
    let mut out = Vec::new();
    {
        let mut prompt = LinePrompt::new(Cursor::new("3\n1\n"), &mut transcript);
        let outcome =
            interactive::run(root, &mut prompt, &mut out, &InteractiveOptions::default()).unwrap();
        assert_eq!(outcome, Outcome::Answered("Run the **installer**.".to_string()));
    }

    assert_eq!(
        String::from_utf8(transcript).unwrap(),
        "? Help\n  1) Install\n  2) Usage\nAnswer [1-2]: \
         Please enter a number between 1 and 2\nAnswer [1-2]: "
    );
    assert_eq!(String::from_utf8(out).unwrap(), "? Install\n\nRun the **installer**.\n");
}

#[rstest]
#[case::empty_label(r#"{"label": " ", "value": "x"}"#, "Node label cannot be empty")]
#[case::no_children(r#"{"label": "Root", "children": []}"#, "must have at least one child")]
#[case::bad_json(r#"{"label": "Root""#, "Invalid JSON document")]
fn given_invalid_json_when_loading_then_error_is_reported(
    #[case] json: &str,
    #[case] expected: &str,
) {
    let temp = TempDir::new().unwrap();
    write(&temp, "doc.json", json);

    let err = load_document(&temp.path().join("doc.json")).unwrap_err();

    assert!(err.to_string().contains(expected), "{err}");
    assert!(err.path().ends_with("doc.json"));
}

#[test]
fn given_missing_root_when_loading_then_root_not_found() {
    let temp = TempDir::new().unwrap();
    let err = load_document(temp.path()).unwrap_err();
    assert!(matches!(err, SourceError::RootNotFound { .. }));
}

#[test]
fn given_json_leaf_document_when_loading_then_root_is_a_leaf() {
    let temp = TempDir::new().unwrap();
    write(&temp, "leaf.json", r#"{"label": "Only", "value": "answer"}"#);

    let root = load_document(&temp.path().join("leaf.json")).unwrap();

    assert!(matches!(root, Node::Leaf(ref leaf) if leaf.value == "answer"));
}
