pub mod amount_math;
pub mod bit_math;
pub mod log_pow_math;
pub mod math_helpers;

pub mod swap_math_x2y;
pub mod swap_math_x2y_desire;
pub mod swap_math_y2x;
pub mod swap_math_y2x_desire;
