use anyhow::Result;
use ratatui::text::Line;
use test_utils::sales_reps_fixture;

use super::SalesRepsState;
use super::SalesRepsView;
use crate::domain::models::Palette;
use crate::domain::models::SalesRepsResponse;
use crate::domain::models::ThemeName;

fn to_text(lines: &[Line]) -> String {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<String>();
        })
        .collect::<Vec<String>>()
        .join("\n");
}

#[test]
fn it_starts_loading() {
    let view = SalesRepsView::default();
    assert_eq!(view.state, SalesRepsState::Loading);
    assert!(view.lines(&Palette::get(ThemeName::Gaia)).is_empty());
}

#[test]
fn it_renders_rep_cards() -> Result<()> {
    let res: SalesRepsResponse = serde_json::from_str(sales_reps_fixture())?;
    let mut view = SalesRepsView::default();
    view.set_result(Ok(res.sales_reps));

    let lines = view.lines(&Palette::get(ThemeName::Gaia));
    insta::assert_snapshot!(to_text(&lines), @r###"
    Alice - Senior Sales Executive (North America)
    ────────────────────────
    Skills: Negotiation, CRM
    Deals:
      • Acme Corp - $120000 (Closed Won)
      • Globex - $50000 (In Progress)
      • Initech - $15000.5 (Closed Lost)
    Clients:
      • Acme Corp (Manufacturing)
        Email: buyer@acme.test, Phone: 555-0100

    Bob - Account Manager
    ────────────────────────
    Skills: None listed
    Deals:
      No deals yet
    Clients:
      No clients yet
    "###);

    return Ok(());
}

#[test]
fn it_colours_deals_by_outcome() -> Result<()> {
    let palette = Palette::get(ThemeName::Shinra);
    let res: SalesRepsResponse = serde_json::from_str(sales_reps_fixture())?;
    let mut view = SalesRepsView::default();
    view.set_result(Ok(res.sales_reps));

    let lines = view.lines(&palette);
    assert_eq!(lines[4].spans[0].style.fg, Some(palette.success));
    assert_eq!(lines[5].spans[0].style.fg, Some(palette.warning));
    assert_eq!(lines[6].spans[0].style.fg, Some(palette.error));
    return Ok(());
}

#[test]
fn it_keeps_failures() {
    let mut view = SalesRepsView::default();
    view.set_result(Err("connection refused".to_string()));

    assert_eq!(
        view.state,
        SalesRepsState::Failed("connection refused".to_string())
    );
}
