//! Control points and branches.
//!
//! A branch is the ordered list of control points one pipe is drawn through.
//! Point ids come from an explicit [`IdAllocator`] owned by whoever manages
//! the branches, so ids stay unique and stable while points are dragged,
//! inserted and removed.
//!
//! # Example
//!
//! ```
//! use pipeshape::branch::{Branch, IdAllocator};
//! use pipeshape::Point2;
//!
//! let mut ids = IdAllocator::new();
//! let mut branch = Branch::new(ids.next_branch_id());
//!
//! let first = branch.push_point(&mut ids, Point2::new(0.0, 0.0));
//! branch.push_point(&mut ids, Point2::new(100.0, 0.0));
//! branch.move_point(first, Point2::new(0.0, 10.0)).unwrap();
//!
//! assert_eq!(branch.positions()[0], Point2::new(0.0, 10.0));
//! ```

use crate::error::GeomError;
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt;

/// Identifier of a control point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BranchId(pub u64);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch {}", self.0)
    }
}

/// Hands out increasing ids, starting at 1.
///
/// Point and branch ids share one counter.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    /// Creates an allocator whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that continues after `last`, e.g. after loading
    /// existing branches.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Returns a fresh point id.
    pub fn next_point_id(&mut self) -> PointId {
        PointId(self.bump())
    }

    /// Returns a fresh branch id.
    pub fn next_branch_id(&mut self) -> BranchId {
        BranchId(self.bump())
    }

    fn bump(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// A user-placed point of a branch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint<F> {
    /// Stable identity, unique within its branch.
    pub id: PointId,
    /// X coordinate.
    pub x: F,
    /// Y coordinate.
    pub y: F,
}

impl<F: Float> ControlPoint<F> {
    /// Creates a control point.
    pub fn new(id: PointId, position: Point2<F>) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
        }
    }

    /// The point's position.
    #[inline]
    pub fn position(&self) -> Point2<F> {
        Point2::new(self.x, self.y)
    }
}

/// Kind tag of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BranchKind {
    /// A plain pipe section.
    #[default]
    Normal,
}

/// An ordered sequence of control points.
///
/// The order defines the spline parametrization: control point `i` sits at
/// parameter `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch<F> {
    id: BranchId,
    kind: BranchKind,
    points: Vec<ControlPoint<F>>,
}

impl<F: Float> Branch<F> {
    /// Creates an empty branch of kind [`BranchKind::Normal`].
    pub fn new(id: BranchId) -> Self {
        Self {
            id,
            kind: BranchKind::Normal,
            points: Vec::new(),
        }
    }

    /// Sets the branch kind.
    pub fn with_kind(mut self, kind: BranchKind) -> Self {
        self.kind = kind;
        self
    }

    /// Builds a branch from existing points.
    ///
    /// # Errors
    ///
    /// [`GeomError::DuplicatePointId`] if two points share an id.
    pub fn from_points(id: BranchId, points: Vec<ControlPoint<F>>) -> Result<Self, GeomError> {
        let mut branch = Self::new(id);
        for point in points {
            branch.add_point(point)?;
        }
        Ok(branch)
    }

    /// The branch id.
    pub fn id(&self) -> BranchId {
        self.id
    }

    /// The branch kind.
    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    /// The control points in order.
    pub fn points(&self) -> &[ControlPoint<F>] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the branch has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if a point with `id` is in the branch.
    pub fn contains(&self, id: PointId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of the point with `id` in the branch order.
    pub fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Snapshot of the control point positions, in order.
    pub fn positions(&self) -> Vec<Point2<F>> {
        self.points.iter().map(ControlPoint::position).collect()
    }

    /// Places a new point at the end of the branch.
    pub fn push_point(&mut self, ids: &mut IdAllocator, position: Point2<F>) -> PointId {
        let id = ids.next_point_id();
        self.points.push(ControlPoint::new(id, position));
        id
    }

    /// Appends an already identified point.
    ///
    /// # Errors
    ///
    /// [`GeomError::DuplicatePointId`] if the id is already in the branch.
    pub fn add_point(&mut self, point: ControlPoint<F>) -> Result<(), GeomError> {
        self.insert_point(self.points.len(), point)
    }

    /// Inserts an already identified point before position `index`
    /// (clamped to the end of the branch).
    ///
    /// # Errors
    ///
    /// [`GeomError::DuplicatePointId`] if the id is already in the branch.
    pub fn insert_point(&mut self, index: usize, point: ControlPoint<F>) -> Result<(), GeomError> {
        if self.contains(point.id) {
            return Err(GeomError::DuplicatePointId(point.id));
        }
        let index = index.min(self.points.len());
        self.points.insert(index, point);
        Ok(())
    }

    /// Moves the point with `id`, keeping its identity and order.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnknownPointId`] if no such point exists.
    pub fn move_point(&mut self, id: PointId, position: Point2<F>) -> Result<(), GeomError> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GeomError::UnknownPointId(id))?;
        point.x = position.x;
        point.y = position.y;
        Ok(())
    }

    /// Removes the point with `id` and returns it.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnknownPointId`] if no such point exists.
    pub fn remove_point(&mut self, id: PointId) -> Result<ControlPoint<F>, GeomError> {
        let index = self.index_of(id).ok_or(GeomError::UnknownPointId(id))?;
        Ok(self.points.remove(index))
    }

    /// Pairs of points of this branch and `other` closer than `threshold`.
    pub fn proximity_to(&self, other: &Branch<F>, threshold: F) -> Vec<ProximityHit<F>> {
        find_proximity(self, other, threshold)
    }
}

/// A point of one branch lying near a point of another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHit<F> {
    /// The point in the branch being checked.
    pub point: PointId,
    /// The nearby point in the other branch.
    pub other: PointId,
    /// Distance between the two.
    pub distance: F,
}

/// Finds every pair of points from `branch` and `other` strictly closer than
/// `threshold`, in `branch` order then `other` order.
///
/// Each hit is reported at info level.
pub fn find_proximity<F: Float>(
    branch: &Branch<F>,
    other: &Branch<F>,
    threshold: F,
) -> Vec<ProximityHit<F>> {
    let mut hits = Vec::new();
    for p in branch.points() {
        for q in other.points() {
            let distance = p.position().distance(q.position());
            if distance < threshold {
                tracing::info!(
                    point = %p.id,
                    other = %q.id,
                    x = p.x.to_f64(),
                    y = p.y.to_f64(),
                    other_x = q.x.to_f64(),
                    other_y = q.y.to_f64(),
                    "proximity detected between branches"
                );
                hits.push(ProximityHit {
                    point: p.id,
                    other: q.id,
                    distance,
                });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn branch_with(ids: &mut IdAllocator, points: &[(f64, f64)]) -> Branch<f64> {
        let mut branch = Branch::new(ids.next_branch_id());
        for &(x, y) in points {
            branch.push_point(ids, Point2::new(x, y));
        }
        branch
    }

    #[test]
    fn test_ids_are_increasing_and_unique() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_point_id(), PointId(1));
        assert_eq!(ids.next_branch_id(), BranchId(2));
        assert_eq!(ids.next_point_id(), PointId(3));

        let mut resumed = IdAllocator::starting_after(41);
        assert_eq!(resumed.next_point_id(), PointId(42));
    }

    #[test]
    fn test_push_and_positions() {
        let mut ids = IdAllocator::new();
        let branch = branch_with(&mut ids, &[(0.0, 0.0), (10.0, 5.0)]);
        assert_eq!(branch.len(), 2);
        assert_eq!(branch.kind(), BranchKind::Normal);
        assert_eq!(
            branch.positions(),
            vec![Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)]
        );
    }

    #[test]
    fn test_move_keeps_identity_and_order() {
        let mut ids = IdAllocator::new();
        let mut branch = branch_with(&mut ids, &[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let middle = branch.points()[1].id;

        branch.move_point(middle, Point2::new(10.0, 30.0)).unwrap();
        assert_eq!(branch.points()[1].id, middle);
        assert_eq!(branch.points()[1].position(), Point2::new(10.0, 30.0));
        assert_eq!(
            branch.move_point(PointId(999), Point2::new(0.0, 0.0)),
            Err(GeomError::UnknownPointId(PointId(999)))
        );
    }

    #[test]
    fn test_remove_point() {
        let mut ids = IdAllocator::new();
        let mut branch = branch_with(&mut ids, &[(0.0, 0.0), (10.0, 0.0)]);
        let first = branch.points()[0].id;

        let removed = branch.remove_point(first).unwrap();
        assert_eq!(removed.id, first);
        assert_eq!(branch.len(), 1);
        assert!(!branch.contains(first));
        assert_eq!(
            branch.remove_point(first),
            Err(GeomError::UnknownPointId(first))
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut ids = IdAllocator::new();
        let mut branch = branch_with(&mut ids, &[(0.0, 0.0)]);
        let existing = branch.points()[0];

        assert_eq!(
            branch.add_point(existing),
            Err(GeomError::DuplicatePointId(existing.id))
        );

        let dup = vec![existing, existing];
        assert!(Branch::from_points(BranchId(7), dup).is_err());
    }

    #[test]
    fn test_insert_point() {
        let mut ids = IdAllocator::new();
        let mut branch = branch_with(&mut ids, &[(0.0, 0.0), (20.0, 0.0)]);
        let id = ids.next_point_id();
        branch
            .insert_point(1, ControlPoint::new(id, Point2::new(10.0, 0.0)))
            .unwrap();
        assert_eq!(branch.index_of(id), Some(1));

        let tail = ids.next_point_id();
        branch
            .insert_point(100, ControlPoint::new(tail, Point2::new(30.0, 0.0)))
            .unwrap();
        assert_eq!(branch.index_of(tail), Some(3));
    }

    #[test]
    fn test_proximity() {
        let mut ids = IdAllocator::new();
        let a = branch_with(&mut ids, &[(0.0, 0.0), (100.0, 0.0)]);
        let b = branch_with(&mut ids, &[(30.0, 40.0), (100.0, 49.0), (300.0, 0.0)]);

        let hits = a.proximity_to(&b, 50.0);
        // (0,0)-(30,40) is exactly 50 apart and does not count.
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point, a.points()[1].id);
        assert_eq!(hits[0].other, b.points()[1].id);
        assert_relative_eq!(hits[0].distance, 49.0);

        assert!(find_proximity(&a, &Branch::new(BranchId(99)), 50.0).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(PointId(5).to_string(), "#5");
        assert_eq!(
            GeomError::DuplicatePointId(PointId(5)).to_string(),
            "control point #5 already exists in this branch"
        );
    }
}
