//! Nested selection demo.
//!
//! Builds a radio group holding three wrapper cards, each wrapping a
//! decoration panel and a radio button, then drives the selection by
//! simulated taps and programmatic calls.
//!
//! Run with: cargo run -p trellis --example nested_selection

use trellis::{Orientation, Panel, RadioButton, RadioGroup, View};
use trellis_core::ViewTreeDebug;

fn make_card(label: &str) -> (Panel, Panel, RadioButton) {
    // A horizontal card: a named panel standing in for decoration
    // (icon/labels), plus the actual control.
    let card = Panel::new()
        .with_orientation(Orientation::Horizontal)
        .with_name(format!("card_{label}"));
    let decoration = Panel::new().with_name(format!("label_{label}"));
    let button = RadioButton::new(label);

    card.add_child(decoration.node_id()).expect("attach decoration");
    card.add_child(button.node_id()).expect("attach button");

    (card, decoration, button)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    trellis_core::init_global_registry();

    let group = RadioGroup::new().with_name("plan_picker");
    group.set_on_checked_change(|_, checked_id| {
        println!("  -> selection changed: checked_id = {checked_id}");
    });

    let (card_basic, _deco_basic, basic) = make_card("basic");
    let (card_pro, _deco_pro, pro) = make_card("pro");
    let (card_team, _deco_team, team) = make_card("team");

    group.add_child(card_basic.node_id()).expect("attach card");
    group.add_child(card_pro.node_id()).expect("attach card");
    group.add_child(card_team.node_id()).expect("attach card");
    group.finish_build();

    println!("tree after build:");
    print!("{}", ViewTreeDebug::new().format_subtree(group.node_id()).expect("dump tree"));

    println!("tap '{}':", basic.text());
    basic.click();

    println!("tap '{}':", pro.text());
    pro.click();

    println!("tap '{}' again (no-op):", pro.text());
    pro.click();

    println!("select '{}' by id {}:", team.text(), team.view_id());
    group.check_id(team.view_id());

    println!("clear selection:");
    group.clear_check();

    println!("tree after interaction:");
    print!("{}", ViewTreeDebug::new().format_subtree(group.node_id()).expect("dump tree"));
}
