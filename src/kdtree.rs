use crate::bounded::BoundedPriorityQueue;
use crate::error::{KdTreeError, Result};
use crate::point::{DIMENSIONS, Point, axis_distance_sq, distance_sq};

const NIL: u32 = u32::MAX;

#[derive(Clone, Copy, Debug)]
struct KdNode {
    // Index into the retained point set
    point: u32,
    left: u32, // NIL if absent
    right: u32,
    axis: u8,
}

/// Result of a nearest-neighbour lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbor {
    /// Position of the point in the sequence the tree was built from.
    pub index: usize,
    /// Squared Euclidean distance from the query to that point.
    pub dist_sq: i128,
}

/// A static 3D k-d tree answering exact nearest-neighbour queries.
///
/// The tree is built once from a fixed point set and queried many times. Each level splits
/// at the median on the axis `depth % 3`, so the node count equals the point count and the
/// tree height stays logarithmic in the number of points.
///
/// Nodes live in a flat arena and refer to their children by arena index; rebuilding or
/// clearing simply drops the arena.
///
/// When several points are equally close to a query, the one reached first by the
/// depth-first walk is returned. Which one that is depends on the input order and on how
/// the median selection arranged ties, so callers should not rely on a particular choice.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<Point>,
}

impl KdTree {
    pub fn new() -> Self {
        KdTree {
            nodes: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Creates a tree and builds it over `points` in one step.
    ///
    /// # Panics
    ///
    /// Panics if `points` holds `u32::MAX` or more points, see [`KdTree::build`].
    pub fn from_points(points: &[Point]) -> Self {
        let mut tree = Self::new();
        tree.build(points);
        tree
    }

    /// (Re)builds the tree over a private copy of `points`.
    ///
    /// Any previously built node graph is released first. An empty slice is accepted and
    /// leaves an index that rejects every query.
    ///
    /// # Panics
    ///
    /// Panics if `points` holds `u32::MAX` or more points, since nodes address points with
    /// `u32` indices.
    pub fn build(&mut self, points: &[Point]) {
        self.clear();

        let count = points.len();
        if count == 0 {
            log::debug!("Built empty k-d tree");
            return;
        }
        assert!(count < NIL as usize, "too many points for a k-d tree: {count}");

        self.points = points.to_vec();
        self.nodes.reserve(count);

        let mut indices: Vec<u32> = (0..count as u32).collect();
        Self::build_recursive(&self.points, &mut indices, 0, &mut self.nodes);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Built k-d tree over {} points, depth {}", count, self.depth());
        }
    }

    fn build_recursive(points: &[Point], indices: &mut [u32], depth: usize, nodes: &mut Vec<KdNode>) -> u32 {
        if indices.is_empty() {
            return NIL;
        }

        let axis = depth % DIMENSIONS;

        // Lower median, partially ordered around it on the split axis
        let mid = (indices.len() - 1) / 2;
        indices.select_nth_unstable_by(mid, |&a, &b| points[a as usize][axis].cmp(&points[b as usize][axis]));
        let point = indices[mid];

        let (lower, upper) = indices.split_at_mut(mid);
        let left = Self::build_recursive(points, lower, depth + 1, nodes);
        let right = Self::build_recursive(points, &mut upper[1..], depth + 1, nodes);

        let node_idx = nodes.len() as u32;
        nodes.push(KdNode {
            point,
            left,
            right,
            axis: axis as u8,
        });
        node_idx
    }

    /// Releases the node graph and the retained points.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.points.clear();
    }

    /// Finds the stored point closest to `query`.
    ///
    /// Returns [`KdTreeError::EmptyIndexQuery`] if the tree holds no points.
    pub fn nearest(&self, query: &Point) -> Result<Neighbor> {
        let root = self.root().ok_or(KdTreeError::EmptyIndexQuery)?;

        let mut best = Neighbor {
            index: usize::MAX,
            dist_sq: i128::MAX,
        };
        self.nearest_recursive(root, query, &mut best);
        Ok(best)
    }

    /// Like [`KdTree::nearest`] but only returns the index.
    pub fn nearest_index(&self, query: &Point) -> Result<usize> {
        self.nearest(query).map(|n| n.index)
    }

    fn nearest_recursive(&self, node_idx: u32, query: &Point, best: &mut Neighbor) {
        if node_idx == NIL {
            return;
        }
        let node = &self.nodes[node_idx as usize];
        let point = &self.points[node.point as usize];

        let d2 = distance_sq(query, point);
        if d2 < best.dist_sq {
            best.dist_sq = d2;
            best.index = node.point as usize;
        }

        let axis = node.axis as usize;
        let (near, far) = if query[axis] < point[axis] {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.nearest_recursive(near, query, best);

        // The far side can only hold a closer point if the splitting plane is closer than the best so far
        if axis_distance_sq(query, point, axis) < best.dist_sq {
            self.nearest_recursive(far, query, best);
        }
    }

    /// Finds up to `k` stored points closest to `query`, sorted by ascending distance.
    ///
    /// Returns [`KdTreeError::EmptyIndexQuery`] if the tree holds no points.
    pub fn k_nearest(&self, query: &Point, k: usize) -> Result<Vec<Neighbor>> {
        let root = self.root().ok_or(KdTreeError::EmptyIndexQuery)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut queue = BoundedPriorityQueue::new(k, |a: &Neighbor, b: &Neighbor| a.dist_sq < b.dist_sq);
        self.k_nearest_recursive(root, query, &mut queue);
        Ok(queue.into_vec())
    }

    fn k_nearest_recursive<F>(&self, node_idx: u32, query: &Point, queue: &mut BoundedPriorityQueue<Neighbor, F>)
    where
        F: Fn(&Neighbor, &Neighbor) -> bool,
    {
        if node_idx == NIL {
            return;
        }
        let node = &self.nodes[node_idx as usize];
        let point = &self.points[node.point as usize];

        queue.push(Neighbor {
            index: node.point as usize,
            dist_sq: distance_sq(query, point),
        });

        let axis = node.axis as usize;
        let (near, far) = if query[axis] < point[axis] {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        self.k_nearest_recursive(near, query, queue);

        let plane_d2 = axis_distance_sq(query, point, axis);
        let worst = queue.back().map_or(i128::MAX, |n| n.dist_sq);
        if !queue.is_full() || plane_d2 < worst {
            self.k_nearest_recursive(far, query, queue);
        }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points the tree was built from, in their original order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Height of the tree, 0 when empty.
    pub fn depth(&self) -> usize {
        match self.root() {
            Some(root) => self.depth_recursive(root),
            None => 0,
        }
    }

    fn depth_recursive(&self, node_idx: u32) -> usize {
        if node_idx == NIL {
            return 0;
        }
        let node = &self.nodes[node_idx as usize];
        1 + self.depth_recursive(node.left).max(self.depth_recursive(node.right))
    }

    // Children are pushed before their parent, so the root is the last node.
    fn root(&self) -> Option<u32> {
        self.nodes.len().checked_sub(1).map(|i| i as u32)
    }
}
