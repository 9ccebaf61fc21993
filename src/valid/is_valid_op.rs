//! Validation entry point.

use super::connected_interior::ConnectedInteriorTester;
use super::consistent_area::ConsistentAreaTester;
use super::error::{TopologyErrorKind, TopologyValidationError};
use super::nested_ring::{find_point_not_node, NestedRingTester, NestingStrategy};
use super::repeated_point::RepeatedPointTester;
use crate::error::ValidityError;
use crate::geometry::{remove_repeated_points, Geometry, LineString, LinearRing, Polygon};
use crate::graph::GeometryGraph;
use crate::predicates::is_point_in_ring;
use num_traits::Float;
use std::cell::OnceCell;

/// Outcome of one check: `Ok(None)` when it passes.
type CheckResult<F> = Result<Option<TopologyValidationError<F>>, ValidityError>;

/// Options controlling how validation is carried out.
///
/// The verdict never depends on these; only the work done to reach it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidOptions {
    /// Strategy for nesting checks, or `None` to pick one from the ring count.
    pub nesting_strategy: Option<NestingStrategy>,
    /// Largest ring count checked with the naive strategy when picking
    /// automatically.
    pub naive_ring_limit: usize,
}

impl Default for ValidOptions {
    fn default() -> Self {
        Self {
            nesting_strategy: None,
            naive_ring_limit: NestingStrategy::DEFAULT_NAIVE_RING_LIMIT,
        }
    }
}

impl ValidOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a nesting strategy.
    pub fn nesting_strategy(mut self, strategy: NestingStrategy) -> Self {
        self.nesting_strategy = Some(strategy);
        self
    }

    /// Sets the ring count up to which the naive strategy is picked.
    pub fn naive_ring_limit(mut self, limit: usize) -> Self {
        self.naive_ring_limit = limit;
        self
    }

    /// The strategy used for a nesting check over `ring_count` rings.
    pub fn strategy_for(&self, ring_count: usize) -> NestingStrategy {
        self.nesting_strategy.unwrap_or_else(|| {
            NestingStrategy::for_ring_count_with_limit(ring_count, self.naive_ring_limit)
        })
    }
}

/// Checks a geometry against the Simple Features validity rules.
///
/// Checks run in a fixed order and stop at the first violation. The result
/// is computed on first request and cached.
///
/// # Example
///
/// ```
/// use topovalid::geometry::{Geometry, LinearRing, Polygon};
/// use topovalid::valid::{IsValidOp, TopologyErrorKind};
/// use topovalid::Coordinate;
///
/// let shell = LinearRing::from_xy(&[
///     (0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0),
/// ]).unwrap();
/// let outer = LinearRing::from_xy(&[
///     (11.0, 1.0), (12.0, 1.0), (12.0, 2.0), (11.0, 2.0), (11.0, 1.0),
/// ]).unwrap();
/// let geom = Geometry::Polygon(Polygon::new(shell, vec![outer]));
///
/// let op = IsValidOp::new(&geom);
/// assert_eq!(op.is_valid(), Ok(false));
///
/// let err = op.validation_error().unwrap().unwrap();
/// assert_eq!(err.kind, TopologyErrorKind::HoleOutsideShell);
/// assert_eq!(err.location, Some(Coordinate::new(11.0, 1.0)));
/// ```
#[derive(Debug)]
pub struct IsValidOp<'a, F> {
    geometry: &'a Geometry<F>,
    options: ValidOptions,
    result: OnceCell<CheckResult<F>>,
}

impl<'a, F: Float> IsValidOp<'a, F> {
    /// Creates a validator with default options.
    pub fn new(geometry: &'a Geometry<F>) -> Self {
        Self::with_options(geometry, ValidOptions::default())
    }

    /// Creates a validator with the given options.
    pub fn with_options(geometry: &'a Geometry<F>, options: ValidOptions) -> Self {
        Self {
            geometry,
            options,
            result: OnceCell::new(),
        }
    }

    /// The options in effect.
    pub fn options(&self) -> ValidOptions {
        self.options
    }

    /// Returns true if no rule is violated.
    pub fn is_valid(&self) -> Result<bool, ValidityError> {
        self.validation_error().map(|err| err.is_none())
    }

    /// The first violation, or `None` for a valid geometry.
    ///
    /// Fails only on internal graph inconsistencies, never because of a
    /// geometry defect.
    pub fn validation_error(&self) -> CheckResult<F> {
        self.result
            .get_or_init(|| {
                let result = self.check_geometry(self.geometry);
                match &result {
                    Ok(Some(err)) => log::debug!(
                        "{} is invalid: {}",
                        self.geometry.kind_name(),
                        err.kind
                    ),
                    Ok(None) => log::debug!("{} is valid", self.geometry.kind_name()),
                    Err(err) => log::debug!("validation aborted: {}", err),
                }
                result
            })
            .clone()
    }

    fn check_geometry(&self, geom: &Geometry<F>) -> CheckResult<F> {
        match geom {
            Geometry::Point(_) => Ok(None),
            Geometry::LineString(line) => Ok(check_line_string(line)),
            Geometry::LinearRing(ring) => Ok(check_linear_ring(ring)),
            Geometry::Polygon(polygon) => {
                self.check_polygons(std::slice::from_ref(polygon), false)
            }
            Geometry::MultiPolygon(multi) => self.check_polygons(multi.polygons(), true),
            Geometry::MultiLineString(lines) => Ok(lines.iter().find_map(check_line_string)),
            Geometry::GeometryCollection(members) => {
                for member in members {
                    if let Some(err) = self.check_geometry(member)? {
                        return Ok(Some(err));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Runs the area checks over one polygon or the members of a
    /// multipolygon.
    fn check_polygons(&self, polygons: &[Polygon<F>], check_shells: bool) -> CheckResult<F> {
        let mut repeated = RepeatedPointTester::new();
        if polygons
            .iter()
            .any(|polygon| repeated.has_repeated_point_in_polygon(polygon))
        {
            return Ok(Some(TopologyValidationError::new(
                TopologyErrorKind::RepeatedPoint,
                repeated.coordinate(),
            )));
        }

        if let Some(err) = polygons
            .iter()
            .flat_map(|polygon| polygon.rings())
            .find_map(check_too_few_ring_points)
        {
            return Ok(Some(err));
        }

        let graph = GeometryGraph::from_polygons(polygons);
        log::trace!("built graph with {} ring edges", graph.edges().len());

        if let Some(err) = check_no_self_intersecting_rings(&graph) {
            return Ok(Some(err));
        }
        if let Some(err) = check_consistent_area(&graph) {
            return Ok(Some(err));
        }
        for polygon in polygons {
            if let Some(err) = check_holes_in_shell(polygon, &graph)? {
                return Ok(Some(err));
            }
        }
        for polygon in polygons {
            if let Some(err) = self.check_holes_not_nested(polygon, &graph)? {
                return Ok(Some(err));
            }
        }
        if let Some(err) = check_connected_interiors(&graph)? {
            return Ok(Some(err));
        }
        if check_shells {
            return self.check_shells_not_nested(polygons, &graph);
        }
        Ok(None)
    }

    fn check_holes_not_nested(
        &self,
        polygon: &Polygon<F>,
        graph: &GeometryGraph<'_, F>,
    ) -> CheckResult<F> {
        let strategy = self.options.strategy_for(polygon.holes().len());
        let mut tester = NestedRingTester::new(graph, strategy);
        for hole in polygon.holes() {
            tester.add(hole);
        }
        if tester.is_non_nested()? {
            Ok(None)
        } else {
            Ok(Some(TopologyValidationError::new(
                TopologyErrorKind::NestedHoles,
                tester.nested_point(),
            )))
        }
    }

    fn check_shells_not_nested(
        &self,
        polygons: &[Polygon<F>],
        graph: &GeometryGraph<'_, F>,
    ) -> CheckResult<F> {
        let strategy = self.options.strategy_for(polygons.len());
        let mut tester = NestedRingTester::new(graph, strategy);
        for polygon in polygons {
            tester.add_shell(polygon);
        }
        if tester.is_non_nested()? {
            Ok(None)
        } else {
            Ok(Some(TopologyValidationError::new(
                TopologyErrorKind::NestedShells,
                tester.nested_point(),
            )))
        }
    }
}

/// Tests `geometry` with default options.
pub fn is_valid<F: Float>(geometry: &Geometry<F>) -> Result<bool, ValidityError> {
    IsValidOp::new(geometry).is_valid()
}

/// Returns the first violation in `geometry`, using default options.
pub fn validate<F: Float>(geometry: &Geometry<F>) -> CheckResult<F> {
    IsValidOp::new(geometry).validation_error()
}

fn check_line_string<F: Float>(line: &LineString<F>) -> Option<TopologyValidationError<F>> {
    if line.is_empty() || remove_repeated_points(line.coords()).len() >= 2 {
        return None;
    }
    Some(TopologyValidationError::new(
        TopologyErrorKind::TooFewPoints,
        line.coords().first().copied(),
    ))
}

fn check_linear_ring<F: Float>(ring: &LinearRing<F>) -> Option<TopologyValidationError<F>> {
    if ring.is_empty() {
        return None;
    }

    let mut repeated = RepeatedPointTester::new();
    if repeated.has_repeated_point_in(ring.coords()) {
        return Some(TopologyValidationError::new(
            TopologyErrorKind::RepeatedPoint,
            repeated.coordinate(),
        ));
    }
    if let Some(err) = check_too_few_ring_points(ring) {
        return Some(err);
    }

    let graph = GeometryGraph::from_ring(ring);
    check_no_self_intersecting_rings(&graph)
}

/// A non-empty ring needs 4 points once repeats are collapsed.
fn check_too_few_ring_points<F: Float>(
    ring: &LinearRing<F>,
) -> Option<TopologyValidationError<F>> {
    if ring.is_empty() || remove_repeated_points(ring.coords()).len() >= 4 {
        return None;
    }
    Some(TopologyValidationError::new(
        TopologyErrorKind::TooFewPoints,
        ring.coords().first().copied(),
    ))
}

/// A ring passing through the same point twice touches or crosses itself.
fn check_no_self_intersecting_rings<F: Float>(
    graph: &GeometryGraph<'_, F>,
) -> Option<TopologyValidationError<F>> {
    graph.edges().iter().find_map(|edge| {
        edge.intersections().first_repeated_coordinate().map(|p| {
            TopologyValidationError::new(TopologyErrorKind::RingSelfIntersection, p)
        })
    })
}

fn check_consistent_area<F: Float>(
    graph: &GeometryGraph<'_, F>,
) -> Option<TopologyValidationError<F>> {
    let mut tester = ConsistentAreaTester::new(graph);
    if !tester.is_node_consistent_area() {
        return Some(TopologyValidationError::new(
            TopologyErrorKind::SelfIntersection,
            tester.invalid_point(),
        ));
    }
    if tester.has_duplicate_rings() {
        return Some(TopologyValidationError::new(
            TopologyErrorKind::DuplicateRings,
            tester.invalid_point(),
        ));
    }
    None
}

/// Every hole must lie inside its shell.
///
/// Holes are known not to cross the shell, so one vertex of the hole off the
/// shell's nodes decides.
fn check_holes_in_shell<F: Float>(
    polygon: &Polygon<F>,
    graph: &GeometryGraph<'_, F>,
) -> CheckResult<F> {
    let shell = polygon.shell();
    for hole in polygon.holes().iter().filter(|h| !h.is_empty()) {
        let outside = if shell.is_empty() {
            hole.coords().first().copied()
        } else {
            let p = find_point_not_node(graph, hole, shell)?;
            (!is_point_in_ring(p, shell.coords())).then_some(p)
        };
        if outside.is_some() {
            return Ok(Some(TopologyValidationError::new(
                TopologyErrorKind::HoleOutsideShell,
                outside,
            )));
        }
    }
    Ok(None)
}

fn check_connected_interiors<F: Float>(graph: &GeometryGraph<'_, F>) -> CheckResult<F> {
    let mut tester = ConnectedInteriorTester::new(graph);
    if tester.is_interiors_connected()? {
        Ok(None)
    } else {
        Ok(Some(TopologyValidationError::new(
            TopologyErrorKind::DisconnectedInterior,
            tester.coordinate(),
        )))
    }
}
