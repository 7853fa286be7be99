mod arena;
mod handle;
mod node;
mod raw_wavl_tree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_wavl_tree::RawWavlTree;
