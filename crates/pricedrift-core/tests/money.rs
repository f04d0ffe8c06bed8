use pricedrift_core::links::admin_link;
use pricedrift_core::money::{format_amount, round_amount};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn whole_amounts_get_two_decimals() {
    assert_eq!(format_amount(dec!(5)), "5.00");
    assert_eq!(format_amount(Decimal::ZERO), "0.00");
}

#[test]
fn negative_amounts_are_kept() {
    assert_eq!(format_amount(dec!(-3.5)), "-3.50");
}

#[test]
fn halves_round_away_from_zero() {
    assert_eq!(round_amount(dec!(2.345)), dec!(2.35));
    assert_eq!(round_amount(dec!(-2.345)), dec!(-2.35));
    assert_eq!(format_amount(dec!(0.125)), "0.13");
}

#[test]
fn tiny_negative_amounts_do_not_render_as_negative_zero() {
    assert_eq!(format_amount(dec!(-0.001)), "0.00");
}

#[test]
fn admin_link_embeds_the_reference() {
    assert_eq!(
        admin_link("ABC123"),
        "https://app.fastspring.com/subscription/home.xml?mRef=Subscription%3AABC123"
    );
}
