mod gate;

pub use gate::SessionGate;
