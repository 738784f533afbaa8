//! SVG snapshot of a scene.
//!
//! The snapshot is a static picture of what the canvas shows: hidden Points
//! and their connections are left out, drafts are not drawn.

use log::debug;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use brickdraw_core::{apply_stroke, draw::StrokeDefinition, geometry::Point};

use crate::scene::{ConnectionInstance, EntityInstance, SceneGraph, SceneItem};

const FRAME_COLOR: &str = "#c8c8c8";
const POINT_LINE_COLOR: &str = "#808080";
const LABEL_FONT_SIZE: f32 = 12.0;
const LABEL_GAP: f32 = 14.0;

/// Renders the visible content of `scene` as an SVG document.
///
/// The document covers the configured canvas. It contains the optional
/// background, the canvas frame, the Point line when Points are shown,
/// then connections below entities.
pub fn render_svg(scene: &SceneGraph) -> String {
    let settings = scene.settings();
    let width = settings.canvas_width();
    let height = settings.canvas_height();

    let mut doc = svg::Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height);

    if let Some(color) = settings.background_color() {
        doc = doc.add(
            svg_element::Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha()),
        );
    }
    doc = doc.add(
        svg_element::Rectangle::new()
            .set("width", width)
            .set("height", height)
            .set("fill", "none")
            .set("stroke", FRAME_COLOR),
    );

    if scene.points_visible() {
        let y = settings.point_line_height();
        doc = doc.add(
            svg_element::Line::new()
                .set("x1", 0)
                .set("y1", y)
                .set("x2", width)
                .set("y2", y)
                .set("stroke", POINT_LINE_COLOR)
                .set("stroke-dasharray", "8,4"),
        );
    }

    let mut connections = svg_element::Group::new().set("class", "connections");
    for (id, connection) in scene.connections() {
        if scene.is_visible(SceneItem::Connection(id)) {
            connections = connections.add(render_connection(connection));
        }
    }

    let mut entities = svg_element::Group::new().set("class", "entities");
    for (id, entity) in scene.entities() {
        if scene.is_visible(SceneItem::Entity(id)) {
            entities = entities.add(render_entity(entity));
        }
    }

    let doc = doc.add(connections).add(entities);
    debug!(entities = scene.entity_count(); "SVG snapshot rendered");
    doc.to_string()
}

fn render_entity(entity: &EntityInstance) -> svg_element::Group {
    let position = entity.position();
    let size = entity.entity_type().size();
    let center = size.center();

    let outline = svg_element::Path::new()
        .set("d", entity.entity_type().outline())
        .set("fill", "white")
        .set("stroke", "black")
        .set("stroke-width", 1);
    let shape = svg_element::Group::new()
        .set(
            "transform",
            format!("rotate({} {} {})", entity.rotation(), center.x(), center.y()),
        )
        .add(outline);

    let mut group = svg_element::Group::new()
        .set("transform", format!("translate({} {})", position.x(), position.y()))
        .set("data-iri", entity.iri().to_string())
        .add(shape);

    if !entity.label().is_empty() {
        let label = svg_element::Text::new("")
            .set("x", center.x())
            .set("y", size.height() + LABEL_GAP)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", LABEL_FONT_SIZE)
            .add(SvgText::new(entity.label()));
        group = group.add(label);
    }
    group
}

fn render_connection(connection: &ConnectionInstance) -> svg_element::Group {
    let stroke = connection.stroke();
    let line = apply_stroke!(
        svg_element::Polyline::new()
            .set("points", points_attribute(connection.path()))
            .set("fill", "none"),
        stroke
    );

    let mut group = svg_element::Group::new()
        .set("data-iri", connection.iri().to_string())
        .set("data-relationship", connection.relationship().name())
        .add(line);
    for arrow in connection.arrows() {
        group = group.add(arrow_polygon(&arrow.points(), stroke));
    }
    group
}

fn arrow_polygon(points: &[Point], stroke: &StrokeDefinition) -> svg_element::Polygon {
    svg_element::Polygon::new()
        .set("points", points_attribute(points))
        .set("fill", stroke.color().to_string())
        .set("fill-opacity", stroke.color().alpha())
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}
