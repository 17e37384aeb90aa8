mod arena;
mod level;
mod node;
mod raw_skip_list;

pub(crate) use arena::Handle;
pub(crate) use raw_skip_list::RawSkipList;
