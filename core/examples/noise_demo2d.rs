use noisegen::{Grid2, NoiseGenerator, Perlin2D, Smoothness};

fn main() {
    // Generate a 64×64 perlin grid with seed 2025, lattice cells 8 wide
    let perlin = Perlin2D::new(2025, 8.0, Smoothness::Quintic, true);
    let mut grid = Grid2::new(64, 64, 0.0);
    perlin.generate2(&mut grid).unwrap();

    // Print the top-left 16×16 corner of the grid
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>6.3} ", grid.get(x, y));
        }
        println!();
    }
}
