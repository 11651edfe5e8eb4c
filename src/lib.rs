//! Offline swap simulation for iZiSwap‑style pools, where ranged liquidity
//! and resting limit orders share one discrete price grid.
//!
//! This crate exposes:
//! - Low‑level math primitives (`math::*`) for points, sqrt prices and the
//!   closed‑form amount sums over a range of points.
//! - An order book snapshot (`Orders`) and an immutable `IziSwapPool` that
//!   runs the four swap drivers against it.
//! - `simulate_swap`, a one‑call entry point taking the whole snapshot.
//!
//! Results are bit‑exact with the on‑chain quoter for the same snapshot.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use izi_swap_query::{math::log_pow_math, Q96, U256};
//!
//! let sqrt_price = log_pow_math::get_sqrt_price(0).unwrap();
//! assert_eq!(sqrt_price, Q96);
//! assert_eq!(log_pow_math::get_log_sqrt_price_floor(sqrt_price).unwrap(), 0);
//! ```
//!
//! ## Simulating a swap on a snapshot
//! ```no_run
//! use izi_swap_query::{
//!     math::log_pow_math::get_sqrt_price, simulate_swap, Orders, State, SwapDirection,
//!     SwapMode, SwapRequest,
//! };
//!
//! // one liquidity level plus a sentinel, and a single sell-Y order
//! let orders = Orders::new(
//!     vec![1_000_000_000, 0],
//!     vec![-800_000, 800_000],
//!     vec![],
//!     vec![],
//!     vec![50_000],
//!     vec![-40],
//! )
//! .unwrap();
//! let state = State::at_point(0, 1_000_000_000, 400_000_000).unwrap();
//!
//! let result = simulate_swap(SwapRequest {
//!     direction: SwapDirection::X2Y,
//!     mode: SwapMode::ExactInput,
//!     orders,
//!     state,
//!     sqrt_rate_96: get_sqrt_price(1).unwrap(),
//!     point_delta: 40,
//!     fee: 2000,
//!     amount: 10_000_000,
//!     bound_point: -4000,
//! })
//! .unwrap();
//! println!(
//!     "paid {} X for {} Y, now at point {}",
//!     result.amount_x, result.amount_y, result.state.current_point
//! );
//! ```

pub use alloy_primitives::U256;

pub mod error;
pub mod math;
pub mod pool;

pub use error::Error;
pub use pool::izi_pool::{DEFAULT_ITERATION_LIMIT, IziSwapPool};
pub use pool::orders::{Cursor, Orders};
pub use pool::state::State;
pub use pool::swap::{SwapDirection, SwapMode, SwapRequest, SwapResult, simulate_swap};

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);

/// Fees are expressed in parts per million.
pub const FEE_DENOMINATOR: u32 = 1_000_000;

pub const LEFT_MOST_PT: i32 = -800_000;
pub const RIGHT_MOST_PT: i32 = -LEFT_MOST_PT;

/// Points per storage block, in units of `point_delta`.
pub const BLOCK_SIZE: i32 = 256;
