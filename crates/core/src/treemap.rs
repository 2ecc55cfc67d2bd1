use serde::Serialize;

use crate::model::{Hierarchy, NodeId};

const PHI: f64 = 1.618_033_988_749_895;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open containment, so shared edges belong to one cell only.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Inset on every side; a side that would invert collapses to its midpoint.
    fn inset(self, p: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (self.x0 + p, self.y0 + p, self.x1 - p, self.y1 - p);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug)]
pub struct TreemapItem {
    pub id: NodeId,
    pub weight: f64,
    pub rect: Rect,
}

/// Assigns a rectangle to every leaf of a hierarchy.
pub trait TreemapLayout {
    fn layout(&self, tree: &Hierarchy, size: Size, padding_inner: f64) -> Vec<TreemapItem>;
}

/// Squarified treemap with golden-ratio rows and uniform inner padding.
#[derive(Clone, Copy, Debug)]
pub struct Squarified {
    pub ratio: f64,
}

impl Default for Squarified {
    fn default() -> Self {
        Self { ratio: PHI }
    }
}

impl TreemapLayout for Squarified {
    fn layout(&self, tree: &Hierarchy, size: Size, padding_inner: f64) -> Vec<TreemapItem> {
        if tree.nodes.is_empty() {
            return Vec::new();
        }
        let mut rects = vec![Rect::default(); tree.nodes.len()];
        rects[tree.root.0 as usize] = Rect::new(0.0, 0.0, size.width, size.height);

        let half = padding_inner.max(0.0) / 2.0;
        let mut stack = vec![tree.root];
        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            let p = if node.depth == 0 { 0.0 } else { half };
            let rect = rects[id.0 as usize].inset(p);
            rects[id.0 as usize] = rect;
            if node.children.is_empty() {
                continue;
            }
            let area = rect.inset(-half);
            self.squarify(tree, &mut rects, id, area);
            stack.extend(node.children.iter().rev().copied());
        }

        tree.leaves()
            .into_iter()
            .map(|id| TreemapItem {
                id,
                weight: tree.node(id).value,
                rect: rects[id.0 as usize],
            })
            .collect()
    }
}

impl Squarified {
    fn squarify(&self, tree: &Hierarchy, rects: &mut [Rect], parent: NodeId, area: Rect) {
        let children = &tree.node(parent).children;
        let value_of = |i: usize| tree.node(children[i]).value;
        let n = children.len();
        let Rect { mut x0, mut y0, x1, y1 } = area;
        let mut value = tree.node(parent).value;

        let mut i0 = 0;
        let mut i1 = 0;
        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;

            // Start the row at the next non-empty node
            let mut sum_value;
            loop {
                sum_value = value_of(i1);
                i1 += 1;
                if sum_value != 0.0 || i1 >= n {
                    break;
                }
            }
            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = (dy / dx).max(dx / dy) / (value * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            while i1 < n {
                let node_value = value_of(i1);
                sum_value += node_value;
                min_value = min_value.min(node_value);
                max_value = max_value.max(node_value);
                beta = sum_value * sum_value * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &children[i0..i1];
            let share = if value > 0.0 { sum_value / value } else { 0.0 };
            if dx < dy {
                let y = if dy != 0.0 { y0 + dy * share } else { y1 };
                dice(tree, rects, row, sum_value, Rect::new(x0, y0, x1, y));
                if dy != 0.0 {
                    y0 = y;
                }
            } else {
                let x = if dx != 0.0 { x0 + dx * share } else { x1 };
                slice(tree, rects, row, sum_value, Rect::new(x0, y0, x, y1));
                if dx != 0.0 {
                    x0 = x;
                }
            }
            value -= sum_value;
            i0 = i1;
        }
    }
}

/// Lays a row out left to right.
fn dice(tree: &Hierarchy, rects: &mut [Rect], row: &[NodeId], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 { area.width() / row_value } else { 0.0 };
    let mut x = area.x0;
    for id in row {
        let x0 = x;
        x += tree.node(*id).value * k;
        rects[id.0 as usize] = Rect::new(x0, area.y0, x, area.y1);
    }
}

/// Lays a row out top to bottom.
fn slice(tree: &Hierarchy, rects: &mut [Rect], row: &[NodeId], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 { area.height() / row_value } else { 0.0 };
    let mut y = area.y0;
    for id in row {
        let y0 = y;
        y += tree.node(*id).value * k;
        rects[id.0 as usize] = Rect::new(area.x0, y0, area.x1, y);
    }
}
