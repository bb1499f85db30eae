pub mod classifier;
pub mod genres;
pub mod prompts;
pub mod providers;
pub mod recommendations;
pub mod resolver;
pub mod title_search;

pub use classifier::classify;
pub use genres::resolve_names;
pub use resolver::resolve;
