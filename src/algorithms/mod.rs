//! Slab-mechanics algorithms

pub mod anticrack;
pub mod fracture;
pub mod wave_speed;

pub use anticrack::{anticrack_propagation_speed, AnticrackSolver, DEFAULT_INITIAL_GUESS};
pub use fracture::{mcclung_fracture_speeds, solitary_wave_speed, solitary_wave_touchdown};
pub use wave_speed::{long_wave_speed, pwave_modulus, rayleigh_wave_speed, shear_wave_speed};
