use std::str::FromStr;

use log::warn;
use svg::Document;
use svg::node::element::{Group, Text, Title};

use crate::entities::{PlanSolution, SiteLayout};
use crate::geometry::primitives::Point;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::{Color, SvgDrawOptions};

pub fn plan_to_svg(
    layout: &SiteLayout,
    solution: &PlanSolution,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let land = &layout.land;
    let bbox = land.shape.bbox;
    let vbox = bbox.scale(1.10);
    let theme = &options.theme;

    let min_dim = f64::min(vbox.width(), vbox.height());
    let stroke_width = min_dim * 0.001 * theme.stroke_width_multiplier;
    let font_size = min_dim * 0.025;

    let label = {
        //print some information above the top left corner of the land
        let label_content = format!(
            "area: {:.1} m² | structures: {} | coverage: {:.2}% | {}",
            solution.land_area,
            solution.structures.len(),
            solution.coverage * 100.0,
            title,
        );
        let (x, y) = svg_util::svg_coords(Point(bbox.x_min, bbox.y_max));
        Text::new(label_content)
            .set("x", x)
            .set("y", y - 0.5 * font_size as f32)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    //draw land
    let land_group = {
        let mut land_group = Group::new()
            .set("id", "land")
            .add(svg_util::data_to_path(
                svg_util::simple_polygon_data(&land.shape),
                &[
                    ("fill", &*format!("{}", theme.land_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "land, area: {:.1} m², centroid: ({:.6}, {:.6})",
                land.area, land.centroid.lat, land.centroid.lng
            )));
        if options.buildable_outline && land.shape.vertices != layout.buildable.vertices {
            land_group = land_group.add(svg_util::data_to_path(
                svg_util::simple_polygon_data(&layout.buildable),
                &[
                    ("fill", "none"),
                    ("stroke", "black"),
                    ("stroke-opacity", "0.5"),
                    ("stroke-width", &*format!("{}", stroke_width)),
                    ("stroke-dasharray", &*format!("{}", 5.0 * stroke_width)),
                ],
            ));
        }
        land_group
    };

    //draw exclusion zones
    let exclusion_group = {
        let mut exclusion_group = Group::new().set("id", "exclusion_zones");
        let stroke_color = svg_util::change_brightness(theme.exclusion_fill, 0.5);
        for ez in layout.exclusions.iter() {
            exclusion_group = exclusion_group.add(
                svg_util::data_to_path(
                    svg_util::simple_polygon_data(&ez.shape),
                    &[
                        ("fill", &*format!("{}", theme.exclusion_fill)),
                        ("fill-opacity", "0.5"),
                        ("stroke", &*format!("{}", stroke_color)),
                        ("stroke-width", &*format!("{}", stroke_width)),
                    ],
                )
                .add(Title::new(format!("exclusion zone: {}", ez.reason))),
            );
        }
        exclusion_group
    };

    //draw structures
    let structure_group = {
        let mut structure_group = Group::new().set("id", "structures");
        for s in solution.structures.iter() {
            let color = Color::from_str(&s.color).unwrap_or_else(|e| {
                warn!("{e}, drawing structure {} in black", s.label);
                Color(0, 0, 0)
            });
            let mut group = Group::new()
                .set("id", format!("structure_{}", s.id))
                .add(Title::new(format!(
                    "{}, {:.0} x {:.0} m, r: {:.1}°, inner: {:.1} m², footprint: {:.1} m²",
                    s.label, s.size.gable, s.size.gutter, s.rotation, s.inner_area, s.footprint_area
                )))
                .add(svg_util::data_to_path(
                    svg_util::simple_polygon_data(&s.footprint),
                    &[
                        ("fill", &*format!("{color}")),
                        ("fill-opacity", &*format!("{}", theme.footprint_opacity)),
                        ("stroke", "black"),
                        ("stroke-width", &*format!("{}", stroke_width)),
                    ],
                ));
            if options.blocks {
                for block in s.blocks.iter() {
                    group = group.add(svg_util::data_to_path(
                        svg_util::points_data(&block.corners),
                        &[
                            ("fill", &*format!("{color}")),
                            ("stroke", &*format!("{}", theme.block_stroke)),
                            ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                        ],
                    ));
                }
            }
            if options.labels {
                let (x, y) = svg_util::svg_coords(s.center);
                group = group.add(
                    Text::new(s.label.clone())
                        .set("x", x)
                        .set("y", y)
                        .set("font-size", 0.6 * font_size)
                        .set("font-family", "monospace")
                        .set("text-anchor", "middle")
                        .set("dominant-baseline", "middle"),
                );
            }
            structure_group = structure_group.add(group);
        }
        structure_group
    };

    let vbox_svg = {
        //leave room for the label above the land
        let (x, y) = svg_util::svg_coords(Point(vbox.x_min, vbox.y_max));
        let margin = font_size as f32;
        (
            x,
            y - margin,
            vbox.width() as f32,
            vbox.height() as f32 + margin,
        )
    };

    Document::new()
        .set("viewBox", vbox_svg)
        .add(land_group)
        .add(exclusion_group)
        .add(structure_group)
        .add(label)
}
