//! # Biome Classification Tree
//!
//! Nearest-neighbour search over the overworld parameter table.
//!
//! ## Construction
//!
//! The table is split recursively into at most six buckets per level. At each
//! level every axis is tried as the primary sort key (cycling through the
//! remaining axes for ties); the split with the smallest summed bounding
//! widths wins, and its buckets are ordered by absolute midpoint. This is the
//! game's own construction, so the resulting tree, and therefore every tie
//! break during search, matches it exactly.
//!
//! ## Layout
//!
//! The finished tree is flattened breadth-first into [`TreeNode`] records.
//! Each record packs six one-byte indices into a shared table of distinct
//! parameter ranges, plus either the first child index or the leaf biome id.
//! Siblings are contiguous.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::biome::Biome;
use crate::biome_params::{OverworldBiomeBuilder, Parameter, ParameterPoint, PARAMETER_AXES};
use crate::climate::ClimatePoint;

/// Deepest level the search descends to.
pub const MAX_TREE_DEPTH: usize = 5;

/// Axes stored per record; the offset axis is always zero.
const CLIMATE_AXES: usize = 6;

/// Widest fan-out of one tree level.
const MAX_CHILDREN: usize = 6;

/// Shift of the child index / biome id in a packed record.
const LINK_SHIFT: u32 = 48;

/// One flattened tree record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// Six parameter indices (bytes 0..6) and the link (bits 48..64)
    pub packed: u64,
    /// Number of children; zero for leaves
    pub children: u8,
}

impl TreeNode {
    /// Index into the parameter table for one axis.
    #[inline]
    #[must_use]
    pub const fn parameter_index(self, axis: usize) -> usize {
        ((self.packed >> (8 * axis)) & 0xFF) as usize
    }

    /// First child index for inner nodes, biome id for leaves.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn link(self) -> u16 {
        (self.packed >> LINK_SHIFT) as u16
    }

    /// Whether this record is a leaf.
    #[inline]
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        self.children == 0
    }
}

/// Flattened classification tree.
#[derive(Clone, Debug)]
pub struct BiomeTree {
    params: Vec<Parameter>,
    nodes: Vec<TreeNode>,
    depth: usize,
}

/// The overworld tree, built on first use and shared by every world.
#[must_use]
pub fn overworld_tree() -> &'static BiomeTree {
    static TREE: OnceLock<BiomeTree> = OnceLock::new();
    TREE.get_or_init(|| {
        let tree = BiomeTree::build(OverworldBiomeBuilder::new().build());
        tracing::debug!(
            nodes = tree.len(),
            params = tree.params().len(),
            depth = tree.depth(),
            "Built overworld biome tree"
        );
        tree
    })
}

impl BiomeTree {
    /// Builds and flattens a tree from a parameter table.
    ///
    /// # Panics
    ///
    /// Panics on an empty table, a tree deeper than [`MAX_TREE_DEPTH`], more
    /// than 256 distinct parameter ranges, or more records than a link can
    /// address.
    #[must_use]
    pub fn build(points: Vec<(ParameterPoint, Biome)>) -> Self {
        assert!(!points.is_empty(), "biome parameter table is empty");
        let leaves = points
            .into_iter()
            .map(|(space, biome)| BuildNode::leaf(space, biome))
            .collect();
        let root = build_node(leaves);
        let depth = root.depth();
        assert!(
            depth <= MAX_TREE_DEPTH,
            "biome tree depth {depth} exceeds {MAX_TREE_DEPTH}"
        );
        let (params, nodes) = flatten(&root);
        Self {
            params,
            nodes,
            depth,
        }
    }

    /// Number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no records (never true for a built tree).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Longest root-to-leaf path.
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The distinct parameter ranges records index into.
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// The flattened records, root first.
    #[inline]
    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Classifies one quantized climate point.
    ///
    /// # Panics
    ///
    /// Panics if the tree is malformed (a leaf with an unknown biome id, or a
    /// search deeper than [`MAX_TREE_DEPTH`]).
    #[must_use]
    pub fn classify(&self, point: &ClimatePoint) -> Biome {
        let leaf = self
            .search(0, &point.0, None, 0)
            .unwrap_or_else(|| panic!("biome tree search found no leaf"));
        let id = self.nodes[leaf].link();
        u8::try_from(id)
            .ok()
            .and_then(Biome::from_id)
            .unwrap_or_else(|| panic!("biome tree leaf holds unknown biome id {id}"))
    }

    /// Squared distance from a record's box to the target.
    #[inline]
    fn distance(&self, node: usize, target: &[i64; CLIMATE_AXES]) -> i64 {
        let record = self.nodes[node];
        let mut sum = 0;
        for (axis, &value) in target.iter().enumerate() {
            let d = self.params[record.parameter_index(axis)].distance(value);
            sum += d * d;
        }
        sum
    }

    fn search(
        &self,
        node: usize,
        target: &[i64; CLIMATE_AXES],
        candidate: Option<usize>,
        depth: usize,
    ) -> Option<usize> {
        assert!(
            depth < MAX_TREE_DEPTH,
            "biome tree search exceeded depth {MAX_TREE_DEPTH}"
        );
        let mut best = candidate.map_or(i64::MAX, |c| self.distance(c, target));
        let mut result = candidate;

        let record = self.nodes[node];
        let first = usize::from(record.link());
        for child in first..first + usize::from(record.children) {
            let child_distance = self.distance(child, target);
            if best <= child_distance {
                continue;
            }
            let (leaf, leaf_distance) = if self.nodes[child].is_leaf() {
                (child, child_distance)
            } else {
                match self.search(child, target, result, depth + 1) {
                    Some(leaf) => (leaf, self.distance(leaf, target)),
                    None => continue,
                }
            };
            if best <= leaf_distance {
                continue;
            }
            best = leaf_distance;
            result = Some(leaf);
        }
        result
    }
}

/// Owned tree used only while building.
struct BuildNode {
    space: ParameterPoint,
    biome: Option<Biome>,
    children: Vec<BuildNode>,
}

impl BuildNode {
    fn leaf(space: ParameterPoint, biome: Biome) -> Self {
        Self {
            space,
            biome: Some(biome),
            children: Vec::new(),
        }
    }

    fn subtree(children: Vec<Self>) -> Self {
        Self {
            space: bounding_space(children.iter().map(|c| &c.space)),
            biome: None,
            children,
        }
    }

    fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// Midpoints starting at `axis` and cycling through the rest.
    fn sort_key(&self, axis: usize, absolute: bool) -> [i64; PARAMETER_AXES] {
        let mut key = [0; PARAMETER_AXES];
        for (m, slot) in key.iter_mut().enumerate() {
            let mid = self.space[(axis + m) % PARAMETER_AXES].mid();
            *slot = if absolute { mid.abs() } else { mid };
        }
        key
    }
}

fn bounding_space<'a>(mut spaces: impl Iterator<Item = &'a ParameterPoint>) -> ParameterPoint {
    let Some(first) = spaces.next() else {
        return ParameterPoint::default();
    };
    let mut space = *first;
    for other in spaces {
        for (p, o) in space.iter_mut().zip(other) {
            p.min = p.min.min(o.min);
            p.max = p.max.max(o.max);
        }
    }
    space
}

fn cost(space: &ParameterPoint) -> i64 {
    space.iter().map(|p| p.width()).sum()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn bucket_size(len: usize) -> usize {
    let exponent = ((len as f64 - 0.01).ln() / 6.0f64.ln()).floor();
    6.0f64.powi(exponent as i32) as usize
}

fn build_node(mut nodes: Vec<BuildNode>) -> BuildNode {
    if nodes.len() == 1 {
        if let Some(node) = nodes.pop() {
            return node;
        }
    }
    if nodes.len() <= MAX_CHILDREN {
        nodes.sort_by_key(|n| n.space.iter().map(|p| p.mid().abs()).sum::<i64>());
        return BuildNode::subtree(nodes);
    }

    let bucket = bucket_size(nodes.len());
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    let mut best: Option<(i64, usize, Vec<usize>)> = None;
    for axis in 0..PARAMETER_AXES {
        // Each axis sorts the previous axis' order; ties keep it.
        order.sort_by_key(|&i| nodes[i].sort_key(axis, false));
        let total: i64 = order
            .chunks(bucket)
            .map(|chunk| cost(&bounding_space(chunk.iter().map(|&i| &nodes[i].space))))
            .sum();
        if best.as_ref().map_or(true, |(c, _, _)| total < *c) {
            best = Some((total, axis, order.clone()));
        }
    }
    let Some((_, axis, order)) = best else {
        unreachable!("at least one axis is tried");
    };

    let mut slots: Vec<Option<BuildNode>> = nodes.into_iter().map(Some).collect();
    let mut buckets: Vec<BuildNode> = order
        .chunks(bucket)
        .map(|chunk| {
            let members = chunk.iter().filter_map(|&i| slots[i].take()).collect();
            BuildNode::subtree(members)
        })
        .collect();
    buckets.sort_by_key(|b| b.sort_key(axis, true));

    BuildNode::subtree(
        buckets
            .into_iter()
            .map(|b| build_node(b.children))
            .collect(),
    )
}

fn flatten(root: &BuildNode) -> (Vec<Parameter>, Vec<TreeNode>) {
    let mut order: Vec<&BuildNode> = vec![root];
    let mut first_child = Vec::new();
    let mut next = 0;
    while next < order.len() {
        let node = order[next];
        first_child.push(order.len());
        order.extend(node.children.iter());
        next += 1;
    }

    let mut params = Vec::new();
    let mut index_of: HashMap<Parameter, u64> = HashMap::new();
    let mut nodes = Vec::with_capacity(order.len());
    for (node, first) in order.iter().zip(first_child) {
        let mut packed = 0u64;
        for (axis, p) in node.space.iter().take(CLIMATE_AXES).enumerate() {
            let index = *index_of.entry(*p).or_insert_with(|| {
                params.push(*p);
                (params.len() - 1) as u64
            });
            assert!(index < 256, "biome tree holds more than 256 distinct ranges");
            packed |= index << (8 * axis);
        }
        let link = match node.biome {
            Some(biome) => u64::from(biome.id()),
            None => u64::try_from(first)
                .ok()
                .filter(|&f| f <= u64::from(u16::MAX))
                .unwrap_or_else(|| panic!("biome tree child index {first} overflows")),
        };
        let children = u8::try_from(node.children.len())
            .unwrap_or_else(|_| panic!("biome tree node has too many children"));
        nodes.push(TreeNode {
            packed: packed | (link << LINK_SHIFT),
            children,
        });
    }
    (params, nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overworld_tree_shape() {
        let tree = overworld_tree();
        assert_eq!(tree.len(), 9112);
        assert_eq!(tree.params().len(), 139);
        assert_eq!(tree.depth(), MAX_TREE_DEPTH);
        let widest = tree.nodes().iter().map(|n| n.children).max();
        assert_eq!(widest, Some(6), "at most six children per record");
    }

    #[test]
    fn test_children_are_contiguous() {
        let tree = overworld_tree();
        let mut expected_first = 1;
        for node in tree.nodes().iter().filter(|n| !n.is_leaf()) {
            assert_eq!(usize::from(node.link()), expected_first, "breadth-first layout");
            expected_first += usize::from(node.children);
        }
        assert_eq!(expected_first, tree.len());
    }

    #[test]
    fn test_classify_reference_points() {
        let tree = overworld_tree();
        let cases = [
            ([1182, -13, -81, -1039, -881, 111], Biome::River),
            ([2849, 1502, 708, 1527, 5641, -5477], Biome::Jungle),
            ([-3545, -4135, -3363, 3228, 6887, -4659], Biome::ColdOcean),
            ([-1130, 3124, -1775, 1338, -1211, -793], Biome::Beach),
            ([0, 0, -11_000, 0, 0, 0], Biome::MushroomFields),
            ([0, 0, 0, -9000, 11_000, 0], Biome::DeepDark),
            ([0, 0, 0, 0, 11_000, 0], Biome::River),
        ];
        for (point, biome) in cases {
            assert_eq!(tree.classify(&ClimatePoint(point)), biome, "point {point:?}");
        }
    }

    #[test]
    fn test_small_table_picks_nearest() {
        let box_at = |t: f32| {
            let mut space = [Parameter::default(); PARAMETER_AXES];
            space[0] = Parameter::span(t, t + 0.1);
            space
        };
        let tree = BiomeTree::build(vec![
            (box_at(-0.5), Biome::SnowyPlains),
            (box_at(0.0), Biome::Plains),
            (box_at(0.5), Biome::Desert),
        ]);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.classify(&ClimatePoint([-4000, 0, 0, 0, 0, 0])), Biome::SnowyPlains);
        assert_eq!(tree.classify(&ClimatePoint([300, 0, 0, 0, 0, 0])), Biome::Plains);
        assert_eq!(tree.classify(&ClimatePoint([9000, 0, 0, 0, 0, 0])), Biome::Desert);
    }

    #[test]
    fn test_bucket_size() {
        assert_eq!(bucket_size(7), 6);
        assert_eq!(bucket_size(36), 6);
        assert_eq!(bucket_size(37), 36);
        assert_eq!(bucket_size(7593), 1296);
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_empty_table_panics() {
        let _ = BiomeTree::build(Vec::new());
    }
}
