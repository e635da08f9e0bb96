pub mod check;
pub mod outputs;
pub mod synth;
