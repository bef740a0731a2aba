pub mod model;
pub mod routes;

pub use model::{Catalog, Difficulty, GameContent, Mode};
pub use routes::routes;
