pub mod bipartite;
pub mod core;
pub mod error;
pub mod generators;
pub mod interner;
pub mod latex;
pub mod layers;
pub mod model;
pub mod storage;
pub mod traits;
pub mod visual;

pub use self::core::*;
pub use bipartite::*;
pub use error::GraphError;
pub use generators::*;
pub use interner::*;
pub use latex::*;
pub use model::*;
pub use storage::*;
pub use traits::*;
pub use visual::*;
