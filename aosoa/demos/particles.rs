//! Minimal demo: one simulation body, two storage layouts.
//!
//! Run with `cargo run --example particles`.

use aosoa::Record;

#[derive(Record, Clone, Copy, Debug, Default)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    ttl: u32,
}

impl Particle {
    fn step(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.ttl = self.ttl.saturating_sub(1);
    }
}

// The layout switch: change this alias to aosoa::AosVec<Particle> and the
// simulation below runs unmodified against packed records.
type Particles = aosoa::SoaVec<Particle>;

fn main() {
    let mut particles = Particles::filled(
        8,
        Particle {
            ttl: 3,
            ..Particle::default()
        },
    );

    // Seed velocities through exclusive facades.
    for (i, mut elem) in particles.iter_mut().enumerate() {
        elem.set(Particle::VX, i as f32);
        elem.set(Particle::VY, -(i as f32));
    }

    // Advance the simulation through a record method; for the SoA layout
    // each call gathers the particle, steps it, and scatters it back.
    for _ in 0..3 {
        for mut elem in particles.iter_mut() {
            elem.update(|p| p.step(0.5));
        }
    }

    for elem in particles.iter() {
        let p = elem.aggregate();
        println!(
            "particle {}: pos=({:.1}, {:.1}) ttl={}",
            elem.index(),
            p.x,
            p.y,
            p.ttl
        );
    }
}
