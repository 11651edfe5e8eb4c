pub mod izi_pool;
pub mod orders;
pub mod state;
pub mod swap;

mod swap_x2y;
mod swap_y2x;
