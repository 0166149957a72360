pub mod fasta;
pub mod sequence;
pub mod source;

pub use sequence::{SequenceRecord, UNKNOWN_IDENTIFIER};
pub use source::{load, InputFormat};
