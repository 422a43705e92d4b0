/// Bit-level reader and the field extraction primitive.
pub mod bits;
/// Field-type decoder dispatch.
pub mod engine;
