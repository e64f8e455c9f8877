pub mod ancestry;

pub use ancestry::{common_ancestor, path_between};
