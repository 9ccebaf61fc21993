//! Bounding volume computation.

mod envelope;

pub use envelope::Envelope;
