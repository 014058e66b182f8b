//! Integration tests: stored element lists (lc-core).
//!
//! The page keeps its elements as a JSON array in `localStorage`; these
//! tests load a realistic saved drawing and check every kind survives.

use lc_core::geometry::adjust_element_coordinates;
use lc_core::model::{Color, Coords, Element, ElementKind, Shape};
use lc_core::Point;
use pretty_assertions::assert_eq;

const SAVED: &str = r##"[
    {"id":0,"type":"line","x1":10,"y1":10,"x2":90,"y2":10,"stroke":{"color":"#000000","width":5}},
    {"id":1,"type":"rectangle","x1":20,"y1":30,"x2":120,"y2":80,"stroke":{"color":"#FF0000","width":3}},
    {"id":2,"type":"circle","x1":200,"y1":200,"x2":230,"y2":200,"stroke":{"color":"#800080","width":8}},
    {"id":3,"type":"pencil","points":[{"x":1,"y":1},{"x":4,"y":6},{"x":9,"y":9}],"stroke":{"color":"#FFFFFF","width":20,"erase":true}},
    {"id":4,"type":"text","x1":40,"y1":300,"x2":100,"y2":324,"text":"2 + 2 = 4","stroke":{"color":"#000000","width":5}}
]"##;

fn load() -> Vec<Element> {
    serde_json::from_str(SAVED).unwrap()
}

#[test]
fn saved_drawing_loads_every_kind() {
    let kinds: Vec<ElementKind> = load().iter().map(Element::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Line,
            ElementKind::Rectangle,
            ElementKind::Circle,
            ElementKind::Pencil,
            ElementKind::Text,
        ]
    );
}

#[test]
fn saved_strokes_keep_paint_state() {
    let elements = load();
    assert_eq!(elements[1].stroke.color, Color::from_rgb8(255, 0, 0));
    assert_eq!(elements[2].stroke.width, 8.0);
    assert!(elements[3].stroke.erase);
    assert!(!elements[0].stroke.erase);
}

#[test]
fn saved_geometry_is_intact() {
    let elements = load();
    assert_eq!(
        elements[1].coords(),
        Some(Coords::new(20.0, 30.0, 120.0, 80.0))
    );
    assert_eq!(elements[3].points()[1], Point::new(4.0, 6.0));
    assert_eq!(elements[4].text(), Some("2 + 2 = 4"));
    assert!(matches!(elements[2].shape, Shape::Circle(_)));
}

#[test]
fn reserialized_drawing_reloads_identically() {
    let elements = load();
    let json = serde_json::to_string(&elements).unwrap();
    let reloaded: Vec<Element> = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, elements);
    assert!(
        !json.contains("\"erase\":false"),
        "non-eraser strokes omit the flag"
    );
}

#[test]
fn saved_shapes_are_already_normalized() {
    for element in load() {
        if let Some(coords) = adjust_element_coordinates(&element)
            && element.kind() != ElementKind::Circle
        {
            assert_eq!(Some(coords), element.coords(), "{}", element.id);
        }
    }
}
