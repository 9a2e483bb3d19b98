// Builds an island height-map (layered perlin, coast flattened by an
// inverted circular dropoff) and colors it through a gradient.

use image::RgbaImage;
use noisegen::{
    CircleRegion2, ColorGradient, FilterOp2, GradientNode, Grid2, LayeredOctave, MaxRegion2,
    NoiseFilterer2, NoiseGenerator, Perlin2D, Smoothness, to_rgba_bytes,
};
use palette::Srgba;
use std::path::Path;

fn main() {
    tracing_subscriber::fmt::init();

    let size = 513;
    let seed = 2025;

    // Layered perlin base
    let layered = LayeredOctave::new(vec![
        (
            Box::new(Perlin2D::new(seed, 128.0, Smoothness::Quintic, true))
                as Box<dyn NoiseGenerator>,
            0.55,
        ),
        (
            Box::new(Perlin2D::new(seed + 1, 32.0, Smoothness::Quintic, true)),
            0.3,
        ),
        (
            Box::new(Perlin2D::new(seed + 2, 8.0, Smoothness::Quintic, true)),
            0.15,
        ),
    ]);
    let mut grid = Grid2::new(size, size, 0.0);
    layered.generate2(&mut grid).unwrap();

    // Flatten the coastline: negative dropoff leaves the center alone and
    // pushes the rim toward sea level
    let half = size as f32 / 2.0;
    let mut coast = CircleRegion2::new((half, half), half * 1.5);
    coast.dropoff = -0.66;
    NoiseFilterer2::new(Box::new(coast), FilterOp2::Flatten { value: 0.0 }).apply(&mut grid);

    // A touch of contrast so the peaks read as peaks
    NoiseFilterer2::new(
        Box::new(MaxRegion2::default()),
        FilterOp2::UpContrast {
            smoothness: Smoothness::Cubic,
            passes: 1,
        },
    )
    .apply(&mut grid);

    // Deep water to beach to grass to rock to snow
    let gradient = ColorGradient::new(vec![
        GradientNode::solid(0.00, Srgba::new(0.0, 0.0, 0.5, 1.0)),
        GradientNode::solid(0.30, Srgba::new(0.8, 0.8, 0.5, 1.0)),
        GradientNode::solid(0.50, Srgba::new(0.1, 0.6, 0.2, 1.0)),
        GradientNode::solid(0.75, Srgba::new(0.5, 0.4, 0.3, 1.0)),
        GradientNode::solid(1.00, Srgba::new(1.0, 1.0, 1.0, 1.0)),
    ]);
    let bytes = to_rgba_bytes(&grid, &gradient).unwrap();
    let img = RgbaImage::from_raw(size as u32, size as u32, bytes).unwrap();

    let path = Path::new("island_gradient.png");
    img.save(path).unwrap();
    println!("Saved island image to {:?}", path);
}
