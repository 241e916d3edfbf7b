pub mod board_io;
pub mod serialization;
pub mod store;
pub mod traits;

pub use board_io::{load_board, save_board};
pub use serialization::*;
pub use store::*;
pub use traits::*;
