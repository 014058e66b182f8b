//! CSS color strings → `Color`.
//!
//! Accepts what the page's color inputs and palette buttons hand us:
//! `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b)`,
//! `rgba(r, g, b, a)`, and a small set of named colors.

use crate::model::Color;
use winnow::ascii::{float, multispace0};
use winnow::combinator::{alt, delimited, preceded, separated};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a color string. Case-insensitive, surrounding whitespace ignored.
/// Returns `None` if the whole string is not a recognized color.
pub fn parse_color(input: &str) -> Option<Color> {
    let lowered = input.trim().to_ascii_lowercase();
    let mut rest = lowered.as_str();
    let color = alt((hex_color, rgb_function, named_color))
        .parse_next(&mut rest)
        .ok()?;
    if rest.is_empty() {
        Some(color)
    } else {
        log::debug!("trailing input after color {input:?}: {rest:?}");
        None
    }
}

fn hex_color(input: &mut &str) -> ModalResult<Color> {
    preceded('#', take_while(3..=8, |c: char| c.is_ascii_hexdigit()))
        .verify_map(Color::from_hex)
        .parse_next(input)
}

fn rgb_function(input: &mut &str) -> ModalResult<Color> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let args: Vec<f64> = delimited(
        ('(', multispace0),
        separated(3..=4, float::<_, f64, _>, (multispace0, ',', multispace0)),
        (multispace0, ')'),
    )
    .parse_next(input)?;

    let channel = |v: f64| (v.clamp(0.0, 255.0) / 255.0) as f32;
    let alpha = args.get(3).map_or(1.0, |a| a.clamp(0.0, 1.0) as f32);
    Ok(Color::rgba(
        channel(args[0]),
        channel(args[1]),
        channel(args[2]),
        alpha,
    ))
}

fn named_color(input: &mut &str) -> ModalResult<Color> {
    take_while(1.., |c: char| c.is_ascii_alphabetic())
        .verify_map(named)
        .parse_next(input)
}

fn named(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "purple" => Color::from_rgb8(128, 0, 128),
        "pink" => Color::from_rgb8(255, 192, 203),
        "red" => Color::from_rgb8(255, 0, 0),
        "green" => Color::from_rgb8(0, 128, 0),
        "blue" => Color::from_rgb8(0, 0, 255),
        "yellow" => Color::from_rgb8(255, 255, 0),
        "orange" => Color::from_rgb8(255, 165, 0),
        "gray" | "grey" => Color::from_rgb8(128, 128, 128),
        "transparent" => Color::rgba(0.0, 0.0, 0.0, 0.0),
        _ => return None,
    };
    Some(color)
}
