//! Related-article gathering across linked leaf files

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use self_help::gather::{
    format_articles_for_cli, format_articles_for_markdown, gather_related_articles,
};
use self_help::source::load_leaf_value;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).expect("write fixture");
    path
}

fn titles(dir: &TempDir, entry: &str) -> Vec<String> {
    gather_related_articles(&dir.path().join(entry), "Entry")
        .into_iter()
        .map(|a| a.title)
        .collect()
}

#[test]
fn given_cyclic_links_when_gathering_then_order_is_d_b_a_c() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write(
        &temp,
        "a.md",
        "# A\n\nA body\n\n## Read First\n\n- [B](b.md)\n\n## Read Next\n\n- [C](c.md)\n",
    );
    write(&temp, "b.md", "# B\n\nB body\n\n## Read First\n\n- [D](./d.md)\n");
    write(&temp, "c.md", "# C\n\nC body\n\n## Read Next\n\n- [Back to A](a.md)\n");
    write(&temp, "d.md", "# D\n\nD body\n");

    // Act
    let articles = gather_related_articles(&temp.path().join("a.md"), "A");

    // Assert
    let order: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(order, vec!["D", "B", "A", "C"]);
    let mains: Vec<_> = articles.iter().filter(|a| a.is_main).map(|a| a.title.as_str()).collect();
    assert_eq!(mains, vec!["A"]);
    assert_eq!(articles[2].content, "# A\n\nA body");
}

#[test]
fn given_shared_prerequisite_when_gathering_then_it_appears_once() {
    let temp = TempDir::new().unwrap();
    write(
        &temp,
        "main.md",
        "# Main\n\n## Read First\n\n- [One](one.md)\n- [Two](two.md)\n",
    );
    write(&temp, "one.md", "# One\n\n## Read First\n\n- [Basics](basics.md)\n");
    write(&temp, "two.md", "# Two\n\n## Read First\n\n- [Basics](basics.md)\n");
    write(&temp, "basics.md", "# Basics\n");

    assert_eq!(titles(&temp, "main.md"), vec!["Basics", "One", "Two", "Main"]);
}

#[test]
fn given_missing_related_file_when_gathering_then_it_is_skipped() {
    let temp = TempDir::new().unwrap();
    write(
        &temp,
        "main.md",
        "Untitled body\n\n## Read Next\n\n- [Nowhere](nowhere.md)\n- [Later](later.md)\n",
    );
    write(&temp, "later.md", "Later body\n");

    let articles = gather_related_articles(&temp.path().join("main.md"), "Fallback");

    let order: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(order, vec!["Fallback", "Later"]);
    assert_eq!(format_articles_for_markdown(&articles), "Untitled body\n\n---\n\nLater body");
}

#[test]
fn given_missing_entry_when_gathering_then_nothing_is_returned() {
    let temp = TempDir::new().unwrap();
    assert!(titles(&temp, "absent.md").is_empty());
}

#[test]
fn given_read_first_and_read_next_when_resolving_leaf_then_value_is_formatted() {
    let temp = TempDir::new().unwrap();
    let main = write(
        &temp,
        "main.md",
        "# Main\n\nMain body.\n\n## Read First\n\n- [Prereq](prereq.md)\n\n## Read Next\n\n- [After](after.md)\n",
    );
    write(&temp, "prereq.md", "# Prereq\n\nPrereq body.\n");
    write(&temp, "after.md", "After body.\n");

    let value = load_leaf_value(&main, "Main link").unwrap();

    let sep = "━".repeat(40);
    let expected = format!(
        "{sep}\n📖 Prereq\n{sep}\n\n# Prereq\n\nPrereq body.\n\n\
         {sep}\n📖 Main (main)\n{sep}\n\n# Main\n\nMain body.\n\n\
         {sep}\n📖 After\n{sep}\n\nAfter body."
    );
    assert_eq!(value, expected);
    assert_eq!(value.matches("(main)").count(), 1);
}

#[test]
fn given_single_article_when_formatting_then_content_is_unchanged() {
    let temp = TempDir::new().unwrap();
    write(&temp, "solo.md", "# Solo\n\nJust me.\n");

    let articles = gather_related_articles(&temp.path().join("solo.md"), "Solo");

    assert_eq!(format_articles_for_cli(&articles), "# Solo\n\nJust me.");
    assert_eq!(format_articles_for_markdown(&articles), "# Solo\n\nJust me.");
}
