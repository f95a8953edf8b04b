// Adapters layer: concrete implementations of the domain ports.

pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
