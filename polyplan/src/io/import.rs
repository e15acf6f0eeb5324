use anyhow::{Context, Result, bail, ensure};
use itertools::Itertools;
use log::{debug, info};

use crate::entities::{ExclusionZone, LandArea, PlanConfig, SiteLayout};
use crate::geometry::primitives::SPolygon;
use crate::geometry::{GeometryAdapter, LatLng, LocalProjection, PlanarGeometry};
use crate::io::ext_repr::{ExtExclusionZone, ExtPlanRequest};

/// Converts external representations of land and exclusion zones into internal ones.
/// All invalid input is rejected here, before any search starts.
#[derive(Clone, Debug, Copy, Default)]
pub struct Importer<G: GeometryAdapter = PlanarGeometry> {
    pub geometry: G,
}

impl<G: GeometryAdapter> Importer<G> {
    pub fn new(geometry: G) -> Self {
        Importer { geometry }
    }

    pub fn import_land(&self, boundary: &[LatLng]) -> Result<LandArea> {
        LandArea::new(boundary)
    }

    /// Projects an exclusion zone onto the planar frame of the land and grows it by `clearance` meters
    pub fn import_exclusion_zone(
        &self,
        ext_zone: &ExtExclusionZone,
        projection: &LocalProjection,
        clearance: f64,
    ) -> Result<ExclusionZone> {
        let mut points = ext_zone
            .boundary
            .iter()
            .map(|ll| projection.to_local(*ll))
            .collect_vec();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if SPolygon::is_self_intersecting(&points) {
            bail!("exclusion zone '{}' is self-intersecting", ext_zone.reason);
        }
        let shape = self.geometry.polygon(points)?;
        let shape = match clearance > 0.0 {
            true => self.geometry.buffer(&shape, clearance)?,
            false => shape,
        };
        Ok(ExclusionZone {
            shape,
            reason: ext_zone.reason.clone(),
        })
    }

    /// Builds an empty [`SiteLayout`] from a request: the land, the buildable part of it and
    /// all exclusion zones (the ones in the request and the ones in the configuration).
    pub fn import_site(&self, request: &ExtPlanRequest, config: &PlanConfig) -> Result<SiteLayout> {
        config.validate().context("invalid configuration")?;
        let land = self
            .import_land(&request.boundary)
            .with_context(|| format!("invalid land boundary for request '{}'", request.name))?;

        let buildable = match config.boundary_setback > 0.0 {
            true => self
                .geometry
                .buffer(&land.shape, -config.boundary_setback)
                .with_context(|| {
                    format!(
                        "boundary setback of {} m leaves no buildable land",
                        config.boundary_setback
                    )
                })?,
            false => land.shape.clone(),
        };
        ensure!(
            self.geometry.within(&buildable, &land.shape),
            "buildable area is not contained in the land boundary"
        );

        let exclusions = request
            .exclusion_zones
            .iter()
            .chain(config.exclusion_zones.iter())
            .enumerate()
            .map(|(i, ez)| {
                self.import_exclusion_zone(ez, &land.projection, config.exclusion_clearance)
                    .with_context(|| format!("invalid exclusion zone #{i} ('{}')", ez.reason))
            })
            .collect::<Result<Vec<_>>>()?;

        for ez in &exclusions {
            debug!(
                "[IMPORT] exclusion zone '{}': {:.1} m²",
                ez.reason,
                self.geometry.area(&ez.shape)
            );
        }
        info!(
            "[IMPORT] land of {:.1} m² ({:.1} m² buildable) with {} exclusion zone(s)",
            land.area,
            self.geometry.area(&buildable),
            exclusions.len()
        );

        Ok(SiteLayout::new(land, buildable, exclusions))
    }
}
