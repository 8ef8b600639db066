//! Generic structures, independent of the details of any particular procedure.

pub mod index_heap;
pub mod luby;
pub mod minimal_pcg;
