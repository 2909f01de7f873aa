use ratatui::text::Line;
use ratatui::text::Span;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Palette;
use crate::domain::models::ThemeName;

fn create_lines(
    author: Author,
    alignment: BubbleAlignment,
    lines: Vec<Line<'static>>,
    width: usize,
) -> String {
    let palette = Palette::get(ThemeName::Gaia);
    let lines = Bubble::new(author, lines, alignment, palette.primary_accent, width).as_lines();

    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("")
                .trim_end()
                .to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");
}

fn plain(text: &str) -> Vec<Line<'static>> {
    return Bubble::plain_lines(text, &Palette::get(ThemeName::Gaia));
}

#[test]
fn it_creates_assistant_text() {
    let lines_str = create_lines(
        Author::Assistant,
        BubbleAlignment::Left,
        plain("Hi there!"),
        50,
    );
    insta::assert_snapshot!(lines_str, @r###"
    ╭AI Response──╮
    │ Hi there!   │
    ╰─────────────╯
    "###);
}

#[test]
fn it_creates_assistant_text_long() {
    let lines_str = create_lines(Author::Assistant, BubbleAlignment::Left, plain("Hi there! This is a really long line that pushes the boundaries of 50 characters across the screen, resulting in a bubble where the line is wrapped to the next line. Cool right?"), 50);
    insta::assert_snapshot!(lines_str, @r###"
    ╭AI Response──────────────────────────────────╮
    │ Hi there! This is a really long line that   │
    │ pushes the boundaries of 50 characters      │
    │ across the screen, resulting in a bubble    │
    │ where the line is wrapped to the next line. │
    │ Cool right?                                 │
    ╰─────────────────────────────────────────────╯
    "###);
}

#[test]
fn it_wraps_across_styled_spans() {
    let line = Line::from(vec![
        Span::from("Three deals "),
        Span::from("closed"),
        Span::from(" this quarter and the pipeline keeps growing nicely"),
    ]);
    let lines_str = create_lines(Author::Assistant, BubbleAlignment::Left, vec![line], 40);
    insta::assert_snapshot!(lines_str, @r###"
    ╭AI Response────────────────────────╮
    │ Three deals closed this quarter   │
    │ and the pipeline keeps growing    │
    │ nicely                            │
    ╰───────────────────────────────────╯
    "###);
}

#[test]
fn it_splits_words_longer_than_the_bubble() {
    let lines_str = create_lines(
        Author::Assistant,
        BubbleAlignment::Left,
        plain(&"x".repeat(50)),
        30,
    );
    insta::assert_snapshot!(lines_str, @r###"
    ╭AI Response──────────────╮
    │ xxxxxxxxxxxxxxxxxxxxxxx │
    │ xxxxxxxxxxxxxxxxxxxxxxx │
    │ xxxx                    │
    ╰─────────────────────────╯
    "###);
}

#[test]
fn it_aligns_user_text_right() {
    let lines_str = create_lines(
        Author::User("alex".to_string()),
        BubbleAlignment::Right,
        plain("What deals closed?"),
        50,
    );
    let padding = " ".repeat(27);

    assert_eq!(
        lines_str,
        [
            format!("{padding}╭alex────────────────╮"),
            format!("{padding}│ What deals closed? │"),
            format!("{padding}╰────────────────────╯"),
        ]
        .join("\n")
    );
}

#[test]
fn it_colours_the_border() {
    let palette = Palette::get(ThemeName::Gaia);
    let lines = Bubble::new(
        Author::Assistant,
        plain("Hi"),
        BubbleAlignment::Left,
        palette.error,
        50,
    )
    .as_lines();

    assert_eq!(lines[1].spans[0].content, "│ ");
    assert_eq!(lines[1].spans[0].style.fg, Some(palette.error));
    assert_eq!(lines[1].spans[1].content, "Hi");
}

#[test]
fn it_expands_tabs_in_plain_lines() {
    let palette = Palette::get(ThemeName::Gaia);
    let lines = Bubble::plain_lines("col1\tcol2", &palette);

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].spans[0].content, "col1  col2");
}
