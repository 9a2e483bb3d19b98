// Generates and saves four 257×257 grayscale noise images:
// Perlin2D
// Worley2D (nearest-distance)
// Diamond–Square
// Layered octaves of perlin

use image::{GrayImage, Luma};
use noisegen::{
    DiamondSquare, Grid2, LayeredOctave, NoiseGenerator, Perlin2D, Smoothness, Worley2D,
};
use std::path::Path;

fn save_grayscale(grid: &Grid2<f32>, filename: &str) {
    let (min, max) = grid.min_max();
    let mut img = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let v = grid.get(x, y);
            let norm = if (max - min).abs() < f32::EPSILON {
                0.5
            } else {
                (v - min) / (max - min)
            };
            let gray = (norm * 255.0).round() as u8;
            img.put_pixel(x as u32, y as u32, Luma([gray]));
        }
    }
    img.save(Path::new(filename)).unwrap();
    println!("Saved {}", filename);
}

fn main() {
    tracing_subscriber::fmt::init();

    let size = 257;
    let seed = 2025;

    // 1) Perlin2D
    let mut perlin_grid = Grid2::new(size, size, 0.0);
    Perlin2D::new(seed, 32.0, Smoothness::Quintic, true)
        .generate2(&mut perlin_grid)
        .unwrap();
    save_grayscale(&perlin_grid, "noise_perlin2d.png");

    // 2) Worley2D
    let mut worley_grid = Grid2::new(size, size, 0.0);
    Worley2D::new(seed, 32.0, 1, 4)
        .generate2(&mut worley_grid)
        .unwrap();
    save_grayscale(&worley_grid, "noise_worley2d.png");

    // 3) Diamond–Square (size must be 2^n + 1, cells start unset)
    let mut ds_grid = Grid2::unset(size, size);
    DiamondSquare::halving(seed, 0.5, 8)
        .generate2(&mut ds_grid)
        .unwrap();
    save_grayscale(&ds_grid, "noise_diamond_square.png");

    // 4) Layered octaves
    let layered = LayeredOctave::new(vec![
        (
            Box::new(Perlin2D::new(seed, 64.0, Smoothness::Quintic, true))
                as Box<dyn NoiseGenerator>,
            0.5,
        ),
        (
            Box::new(Perlin2D::new(seed + 1, 16.0, Smoothness::Quintic, true)),
            0.3,
        ),
        (
            Box::new(Perlin2D::new(seed + 2, 4.0, Smoothness::Quintic, true)),
            0.2,
        ),
    ]);
    let mut layered_grid = Grid2::new(size, size, 0.0);
    layered.generate2(&mut layered_grid).unwrap();
    save_grayscale(&layered_grid, "noise_layered.png");
}
