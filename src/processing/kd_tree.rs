use egui::Pos2;
use kiddo::KdTree;
use kiddo::SquaredEuclidean;

/// 2D KD-tree over on-screen mark centres for hover hit-testing.
pub struct HoverTree {
    tree: KdTree<f64, 2>,
}

impl HoverTree {
    /// Build from mark positions; the stored item is the mark index.
    /// Non-finite positions are skipped.
    pub fn build(positions: &[Pos2]) -> Self {
        let mut tree: KdTree<f64, 2> = KdTree::new();
        for (i, p) in positions.iter().enumerate() {
            if p.x.is_finite() && p.y.is_finite() {
                tree.add(&[p.x as f64, p.y as f64], i as u64);
            }
        }
        Self { tree }
    }

    /// Index of the mark whose centre is nearest to `pointer`, if it lies
    /// within `radius`.
    pub fn hit(&self, pointer: Pos2, radius: f32) -> Option<usize> {
        if self.tree.size() == 0 {
            return None;
        }
        let nearest = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[pointer.x as f64, pointer.y as f64]);
        let r = radius as f64;
        (nearest.distance <= r * r).then_some(nearest.item as usize)
    }
}
