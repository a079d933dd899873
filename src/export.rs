//! HTML image map generation.

use std::fmt::Write;

use crate::geometry::serialize_coords;
use crate::region::Region;

pub const MAP_NAME: &str = "imagemap";
pub const FALLBACK_IMAGE_NAME: &str = "image.jpg";

/// Build the `<img>` + `<map>` fragment for the given regions, in order.
///
/// Returns an empty string when there are no regions.
pub fn generate_fragment(image_name: Option<&str>, regions: &[Region]) -> String {
    if regions.is_empty() {
        return String::new();
    }

    let file = image_name
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_IMAGE_NAME);

    let mut html = String::new();
    // writing to a String cannot fail
    let _ = writeln!(
        html,
        r##"<img src="{}" alt="Image Map" usemap="#{MAP_NAME}" />"##,
        escape_attr(file)
    );
    let _ = writeln!(html, r#"<map name="{MAP_NAME}">"#);
    for region in regions {
        let _ = writeln!(
            html,
            r#"  <area shape="{}" coords="{}" href="{}" alt="{}" title="{}" />"#,
            region.shape().html_name(),
            format_coords(&serialize_coords(region.geometry())),
            escape_attr(region.link.as_deref().filter(|l| !l.is_empty()).unwrap_or("#")),
            escape_attr(region.alt_text.as_deref().unwrap_or("")),
            escape_attr(region.tooltip_text.as_deref().unwrap_or("")),
        );
    }
    html.push_str("</map>");
    html
}

/// Comma-joined coordinates, rounded to whole pixels.
pub fn format_coords(coords: &[f32]) -> String {
    coords
        .iter()
        .map(|c| (c.round() + 0.0).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Point};
    use crate::region::{IdAllocator, RegionUpdate};

    #[test]
    fn empty_regions_give_empty_output() {
        assert_eq!(generate_fragment(Some("a.png"), &[]), "");
    }

    #[test]
    fn circle_coords_in_fragment() {
        let mut ids = IdAllocator::default();
        let region = Region::new(ids.allocate(), Geometry::Circle { cx: 30.0, cy: 40.0, r: 15.0 });
        let html = generate_fragment(Some("map.png"), &[region]);
        assert!(html.contains(r#"coords="30,40,15""#));
    }

    #[test]
    fn circle_radius_is_rounded() {
        let mut ids = IdAllocator::default();
        let circle = Geometry::circle_through(Point::new(10.0, 10.0), Point::new(20.0, 20.0));
        let html = generate_fragment(Some("map.png"), &[Region::new(ids.allocate(), circle)]);
        assert!(html.contains(r#"coords="10,10,14""#));
        assert_eq!(format_coords(&[-0.2, 3.5]), "0,4");
    }

    #[test]
    fn full_fragment_layout() {
        let mut ids = IdAllocator::default();
        let mut rect = Region::new(
            ids.allocate(),
            Geometry::Rectangle { x1: 50.0, y1: 60.0, x2: 10.0, y2: 20.0 },
        );
        rect.apply(RegionUpdate {
            link: Some("https://example.com/a".into()),
            alt_text: Some("Door".into()),
            tooltip_text: Some("Open the door".into()),
        });
        let poly = Region::new(
            ids.allocate(),
            Geometry::Polygon {
                vertices: vec![
                    Point::new(1.0, 2.0),
                    Point::new(30.0, 2.0),
                    Point::new(15.5, 40.0),
                ],
            },
        );

        let html = generate_fragment(Some("house.png"), &[rect, poly]);
        let expected = "\
<img src=\"house.png\" alt=\"Image Map\" usemap=\"#imagemap\" />
<map name=\"imagemap\">
  <area shape=\"rect\" coords=\"50,60,10,20\" href=\"https://example.com/a\" alt=\"Door\" title=\"Open the door\" />
  <area shape=\"poly\" coords=\"1,2,30,2,16,40\" href=\"#\" alt=\"\" title=\"\" />
</map>";
        assert_eq!(html, expected);
    }

    #[test]
    fn missing_image_name_uses_fallback() {
        let mut ids = IdAllocator::default();
        let region = Region::new(ids.allocate(), Geometry::rect_at(Point::new(0.0, 0.0)));
        let html = generate_fragment(None, std::slice::from_ref(&region));
        assert!(html.starts_with(r#"<img src="image.jpg""#));
        let html = generate_fragment(Some(""), &[region]);
        assert!(html.starts_with(r#"<img src="image.jpg""#));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut ids = IdAllocator::default();
        let mut region = Region::new(ids.allocate(), Geometry::rect_at(Point::new(0.0, 0.0)));
        region.tooltip_text = Some(r#"Say "hi" & <wave>"#.into());
        let html = generate_fragment(Some("x.png"), &[region]);
        assert!(html.contains(r#"title="Say &quot;hi&quot; &amp; &lt;wave&gt;""#));
    }
}
