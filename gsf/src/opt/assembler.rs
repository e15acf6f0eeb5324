use anyhow::{Context, Result};
use polyplan::entities::{PlanConfig, SiteLayout, Structure};

/// Colors assigned to structures in placement order, cycling
pub const PALETTE: [&str; 10] = [
    "#4CAF50", "#2196F3", "#FF9800", "#9C27B0", "#F44336", "#00BCD4", "#8BC34A", "#FFC107",
    "#3F51B5", "#795548",
];

/// User-facing label of the `i`-th structure (zero based)
pub fn label(i: usize) -> String {
    format!("P{}", i + 1)
}

pub fn color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

/// Converts the placements of a layout into labeled and colored [`Structure`]s with their block grids
pub fn assemble(layout: &SiteLayout, config: &PlanConfig) -> Result<Vec<Structure>> {
    layout
        .placements()
        .enumerate()
        .map(|(i, (_, candidate))| {
            Structure::new(
                i,
                label(i),
                color(i).to_string(),
                candidate,
                (config.block_width, config.block_height),
                config.gutter_width,
            )
            .with_context(|| format!("could not assemble structure {}", label(i)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_colors_cycle() {
        assert_eq!(label(0), "P1");
        assert_eq!(label(11), "P12");
        assert_eq!(color(0), color(10));
        assert_ne!(color(0), color(1));
    }
}
