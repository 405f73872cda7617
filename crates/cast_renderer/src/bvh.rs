//! Bounding Volume Hierarchy (BVH) over a primitive list.
//!
//! Nodes own their children; leaves hold indices into the scene's primitive
//! list rather than the primitives themselves, so one list can back several
//! hierarchies and the hit record can report which primitive was hit.
//! The tree is immutable once built and is shared by reference between
//! render workers.

use crate::{HitRecord, Hittable, RenderError};
use cast_math::{Aabb, Interval, Ray, EPSILON};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitive indices.
#[derive(Debug, Clone)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
    /// Leaf node referencing a small number of primitives.
    Leaf { bbox: Aabb, primitives: Vec<usize> },
}

impl BvhNode {
    /// Create a leaf over the given primitive indices.
    pub fn leaf(bbox: Aabb, primitives: Vec<usize>) -> Self {
        BvhNode::Leaf { bbox, primitives }
    }

    /// Create a branch whose box surrounds both children.
    pub fn branch(left: BvhNode, right: BvhNode) -> Self {
        BvhNode::Branch {
            bbox: Aabb::surrounding(&left.bounding_box(), &right.bounding_box()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => *bbox,
        }
    }

    /// Children of a branch, `None` for leaves.
    pub fn children(&self) -> Option<(&BvhNode, &BvhNode)> {
        match self {
            BvhNode::Branch { left, right, .. } => Some((left, right)),
            BvhNode::Leaf { .. } => None,
        }
    }

    /// Primitive indices of a leaf, `None` for branches.
    pub fn primitives(&self) -> Option<&[usize]> {
        match self {
            BvhNode::Leaf { primitives, .. } => Some(primitives),
            BvhNode::Branch { .. } => None,
        }
    }

    /// Median-split construction over `indices`.
    fn build(primitives: &[Box<dyn Hittable>], mut indices: Vec<usize>) -> Self {
        let bounds = indices
            .iter()
            .fold(Aabb::EMPTY, |acc, &i| {
                Aabb::surrounding(&acc, &primitives[i].bounding_box())
            });

        if indices.len() <= LEAF_MAX_SIZE {
            return BvhNode::Leaf {
                bbox: bounds,
                primitives: indices,
            };
        }

        // Choose split axis based on centroid spread
        let centroid_bounds = indices.iter().fold(Aabb::EMPTY, |acc, &i| {
            let c = primitives[i].bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        indices.sort_by(|&a, &b| {
            let a_val = primitives[a].bounding_box().centroid()[axis];
            let b_val = primitives[b].bounding_box().centroid()[axis];
            a_val
                .partial_cmp(&b_val)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let right_indices = indices.split_off(mid);

        BvhNode::Branch {
            bbox: bounds,
            left: Box::new(Self::build(primitives, indices)),
            right: Box::new(Self::build(primitives, right_indices)),
        }
    }

    /// Visit this subtree, narrowing `closest` whenever a strictly nearer hit is found.
    fn hit(&self, primitives: &[Box<dyn Hittable>], ray: &Ray, closest: &mut Option<HitRecord>) {
        let max = closest.map_or(f64::INFINITY, |hit| hit.t);
        if !self.bounding_box().hit(ray, Interval::new(EPSILON, max)) {
            return;
        }

        match self {
            BvhNode::Leaf {
                primitives: indices,
                ..
            } => {
                for &index in indices {
                    debug_assert!(
                        index < primitives.len(),
                        "leaf references primitive {index}, but only {} exist",
                        primitives.len()
                    );
                    let Some(primitive) = primitives.get(index) else {
                        continue;
                    };
                    let ray_t = Interval::new(EPSILON, closest.map_or(f64::INFINITY, |hit| hit.t));
                    if let Some(intersection) = primitive.hit(ray, ray_t) {
                        *closest = Some(HitRecord::new(index, intersection));
                    }
                }
            }
            BvhNode::Branch { left, right, .. } => {
                left.hit(primitives, ray, closest);
                right.hit(primitives, ray, closest);
            }
        }
    }

    fn validate(&self, primitive_count: usize) -> Result<(), RenderError> {
        match self {
            BvhNode::Leaf { primitives, .. } => {
                if primitives.is_empty() {
                    return Err(RenderError::MalformedBvh(
                        "leaf node has no primitives".to_string(),
                    ));
                }
                if let Some(&index) = primitives.iter().find(|&&i| i >= primitive_count) {
                    return Err(RenderError::MalformedBvh(format!(
                        "leaf references primitive {index}, but only {primitive_count} exist"
                    )));
                }
                Ok(())
            }
            BvhNode::Branch { left, right, .. } => {
                left.validate(primitive_count)?;
                right.validate(primitive_count)
            }
        }
    }

    fn count(&self) -> (usize, usize) {
        match self {
            BvhNode::Leaf { .. } => (1, 1),
            BvhNode::Branch { left, right, .. } => {
                let (left_nodes, left_depth) = left.count();
                let (right_nodes, right_depth) = right.count();
                (1 + left_nodes + right_nodes, 1 + left_depth.max(right_depth))
            }
        }
    }
}

/// A read-only hierarchy over a primitive list. An empty hierarchy has no root.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    root: Option<BvhNode>,
}

impl Bvh {
    /// A hierarchy with no primitives; every ray misses.
    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Wrap an already constructed node tree.
    pub fn from_root(root: BvhNode) -> Self {
        Self { root: Some(root) }
    }

    /// Build a hierarchy over every primitive in the list.
    ///
    /// Simple median-split approach: sort by centroid on the longest
    /// centroid axis, split in half, recurse.
    pub fn build(primitives: &[Box<dyn Hittable>]) -> Self {
        if primitives.is_empty() {
            return Self::empty();
        }

        let bvh = Self::from_root(BvhNode::build(primitives, (0..primitives.len()).collect()));
        log::debug!(
            "Built BVH over {} primitives: {} nodes, depth {}",
            primitives.len(),
            bvh.node_count(),
            bvh.depth()
        );
        bvh
    }

    pub fn root(&self) -> Option<&BvhNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count().0)
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.count().1)
    }

    /// Check that every leaf lists at least one primitive and that every
    /// index falls inside a list of `primitive_count` primitives.
    pub fn validate(&self, primitive_count: usize) -> Result<(), RenderError> {
        match &self.root {
            Some(root) => root.validate(primitive_count),
            None => Ok(()),
        }
    }

    /// Find the nearest primitive hit by `ray`.
    ///
    /// Subtrees whose boxes the ray misses (or only reaches beyond the
    /// current nearest hit) are skipped. Children are visited left to
    /// right, and a hit replaces the current one only when strictly nearer,
    /// so ties resolve to the first primitive visited.
    ///
    /// `primitives` must be the list the hierarchy was built over; call
    /// [`Bvh::validate`] first for hand-assembled trees. Out-of-range
    /// indices are skipped in release builds and assert in debug builds.
    pub fn hit(&self, primitives: &[Box<dyn Hittable>], ray: &Ray) -> Option<HitRecord> {
        let root = self.root.as_ref()?;
        let mut closest = None;
        root.hit(primitives, ray, &mut closest);
        closest
    }
}

/// Test every primitive in order and return the nearest hit.
///
/// Same acceptance rules as [`Bvh::hit`] without any pruning.
pub fn nearest_hit_linear(primitives: &[Box<dyn Hittable>], ray: &Ray) -> Option<HitRecord> {
    let mut closest: Option<HitRecord> = None;

    for (index, primitive) in primitives.iter().enumerate() {
        let ray_t = Interval::new(EPSILON, closest.map_or(f64::INFINITY, |hit| hit.t));
        if let Some(intersection) = primitive.hit(ray, ray_t) {
            closest = Some(HitRecord::new(index, intersection));
        }
    }

    closest
}
