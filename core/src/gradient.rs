use palette::Srgba;

use crate::{GradientError, Grid2, Interval};

// A gradient node carries a distinct color on each side so a hard band
// edge (left != right) and a smooth blend (left == right) both fit the
// same structure
#[derive(Clone, Copy, Debug)]
pub struct GradientNode {
    pub position: f32,
    pub left: Srgba,
    pub right: Srgba,
}

impl GradientNode {
    pub fn solid(position: f32, color: Srgba) -> Self {
        Self {
            position,
            left: color,
            right: color,
        }
    }

    pub fn split(position: f32, left: Srgba, right: Srgba) -> Self {
        Self {
            position,
            left,
            right,
        }
    }
}

// Piecewise color ramp over [0,1]. Nodes are validated lazily at query
// time: the first node must sit at 0, the last at 1, positions strictly
// increasing in between.
pub struct ColorGradient {
    nodes: Vec<GradientNode>,
}

impl ColorGradient {
    pub fn new(nodes: Vec<GradientNode>) -> Self {
        Self { nodes }
    }

    pub fn validate(&self) -> Result<(), GradientError> {
        let first = self.nodes.first().ok_or(GradientError::Empty)?;
        if first.position != 0.0 {
            return Err(GradientError::FirstNodeNotZero);
        }
        // nodes is non-empty here
        if self.nodes[self.nodes.len() - 1].position != 1.0 {
            return Err(GradientError::LastNodeNotOne);
        }
        for i in 1..self.nodes.len() {
            if self.nodes[i].position <= self.nodes[i - 1].position {
                return Err(GradientError::UnorderedNodes(i));
            }
        }
        Ok(())
    }

    // Color for a grid value. Values outside [0,1] are clamped. An exact
    // node hit resolves to the node's right color, except the last node
    // which only has a left side.
    pub fn color_at(&self, value: f32) -> Result<Srgba, GradientError> {
        self.validate()?;
        let value = value.clamp(0.0, 1.0);

        let last = self.nodes.len() - 1;
        for (i, node) in self.nodes.iter().enumerate() {
            if value == node.position {
                return Ok(if i == last { node.left } else { node.right });
            }
        }

        // Strictly between two nodes now; find the bracketing pair
        let right_idx = self
            .nodes
            .iter()
            .position(|n| n.position > value)
            .unwrap_or(last);
        let left_node = &self.nodes[right_idx - 1];
        let right_node = &self.nodes[right_idx];
        let span = Interval::from_bounds(left_node.position, right_node.position);

        let blend = |c0: f32, c1: f32| blend_channel(span, value, c0, c1);
        let from = left_node.right;
        let to = right_node.left;
        Ok(Srgba::new(
            blend(from.red, to.red),
            blend(from.green, to.green),
            blend(from.blue, to.blue),
            blend(from.alpha, to.alpha),
        ))
    }
}

// Each channel is remapped independently; a descending channel runs
// through the interval's reflection rather than a negated lerp
fn blend_channel(span: Interval, value: f32, c0: f32, c1: f32) -> f32 {
    if c0 <= c1 {
        span.map_value(Interval::from_bounds(c0, c1), value)
    } else {
        let channel = Interval::from_bounds(c1, c0);
        channel.reflect(span.map_value(channel, value))
    }
}

// Maps every grid cell through the gradient into tightly packed RGBA8,
// row-major to match image buffer layout
pub fn to_rgba_bytes(grid: &Grid2<f32>, gradient: &ColorGradient) -> Result<Vec<u8>, GradientError> {
    gradient.validate()?;
    let mut bytes = Vec::with_capacity(grid.width() * grid.height() * 4);
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let color = gradient.color_at(grid.get(x, y))?;
            let raw: Srgba<u8> = color.into_format();
            bytes.extend_from_slice(&[raw.red, raw.green, raw.blue, raw.alpha]);
        }
    }
    Ok(bytes)
}
