/// Bit-level codec primitives and the field decoding engine.
pub mod codec;
