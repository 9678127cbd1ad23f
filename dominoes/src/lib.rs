pub use board::*;
pub use errors::*;
pub use grid::*;
pub use layout::*;
pub use orientation::*;
pub use score::*;
pub use session::*;
pub use supply::*;
pub use sync::*;
pub use terrain::*;
pub use terrain_set::*;
pub use tile::*;
pub use validator::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod grid;
mod layout;
mod orientation;
mod score;
mod session;
mod supply;
mod sync;
mod terrain;
mod terrain_set;
mod tile;
mod validator;
mod visualization;
