//! Application services - use-case orchestration over the ports.

mod posts;

pub use posts::PostService;
