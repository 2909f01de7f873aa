use ratatui::style::Modifier;
use ratatui::text::Line;
use test_utils::answer_fixture;

use super::Markdown;
use crate::domain::models::Palette;
use crate::domain::models::ThemeName;

fn to_strings(lines: &[Line]) -> Vec<String> {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect();
}

#[test]
fn it_normalizes_numbered_markers() {
    let text = "1.   Acme Corp\n\n2)  Globex\n3.Initech";
    assert_eq!(
        Markdown::normalize(text),
        "1. Acme Corp\n2. Globex\n3. Initech"
    );
}

#[test]
fn it_leaves_decimals_alone() {
    let text = "3.5 million in pipeline";
    assert_eq!(Markdown::normalize(text), text);

    let text = "2024.Q1 revenue\n12.50 per seat";
    assert_eq!(Markdown::normalize(text), text);
}

#[test]
fn it_keeps_blank_lines_around_lists() {
    let text = "Intro\n\n1. Acme\n\nOutro";
    assert_eq!(Markdown::normalize(text), text);
}

#[test]
fn it_skips_fenced_code() {
    let text = "```\n1)x\n\n2)y\n```";
    assert_eq!(Markdown::normalize(text), text);
}

#[test]
fn it_trims_trailing_whitespace() {
    assert_eq!(Markdown::normalize("Three deals.  \n\n"), "Three deals.");
}

#[test]
fn it_renders_answers() {
    let palette = Palette::get(ThemeName::Gaia);
    let lines = Markdown::render(answer_fixture(), &palette);

    assert_eq!(
        to_strings(&lines),
        vec![
            "Quarter summary",
            "",
            "Three deals closed this quarter:",
            "",
            "1. Acme Corp",
            "2. Globex",
            "3. Initech",
            "",
            "• Top rep: Alice",
            "• Pipeline is healthy",
            "",
            "fn total() -> u32 {",
            "    3",
            "}",
        ]
    );
    assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(lines[0].spans[0].style.fg, Some(palette.primary_accent));
}

#[test]
fn it_renders_nested_lists_and_quotes() {
    let palette = Palette::get(ThemeName::Shinra);

    let lines = Markdown::render("- a\n  - b", &palette);
    assert_eq!(to_strings(&lines), vec!["• a", "  • b"]);

    let lines = Markdown::render("> quoted", &palette);
    assert_eq!(to_strings(&lines), vec!["│ quoted"]);
}

#[test]
fn it_expands_tabs_when_rendering() {
    let palette = Palette::get(ThemeName::Gaia);

    let lines = Markdown::render("col1\tcol2", &palette);
    assert_eq!(to_strings(&lines), vec!["col1  col2"]);
}
