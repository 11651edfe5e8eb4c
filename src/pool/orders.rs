use crate::BLOCK_SIZE;
use crate::error::OrdersError;
use crate::math::bit_math::floor_div;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of a pool's ranged liquidity and resting limit orders.
///
/// `liquidity[i]` is the total liquidity active from
/// `liquidity_delta_point[i]` up to the next entry's point. The last entry
/// is expected to be a sentinel at or beyond any point a swap may reach.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Orders {
    pub liquidity: Vec<u128>,
    pub liquidity_delta_point: Vec<i32>,
    pub selling_x: Vec<u128>,
    pub selling_x_point: Vec<i32>,
    pub selling_y: Vec<u128>,
    pub selling_y_point: Vec<i32>,
}

/// Traversal position inside an [`Orders`] snapshot.
///
/// `selling_idx` points into the sell‑Y side when walking left and into the
/// sell‑X side when walking right. `None` means no order remains in that
/// direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub liquidity_idx: usize,
    pub selling_idx: Option<usize>,
    pub current_point: i32,
    pub is_liquidity_point: bool,
    pub is_limit_order_point: bool,
}

fn check_ascending(points: &[i32]) -> Result<(), OrdersError> {
    if points.windows(2).all(|w| w[0] < w[1]) {
        Ok(())
    } else {
        Err(OrdersError::PointsNotAscending)
    }
}

impl Orders {
    /// Builds a validated snapshot: every value array matches its point
    /// array in length, points are strictly ascending and the liquidity
    /// side is non‑empty.
    pub fn new(
        liquidity: Vec<u128>,
        liquidity_delta_point: Vec<i32>,
        selling_x: Vec<u128>,
        selling_x_point: Vec<i32>,
        selling_y: Vec<u128>,
        selling_y_point: Vec<i32>,
    ) -> Result<Self, OrdersError> {
        let orders = Self {
            liquidity,
            liquidity_delta_point,
            selling_x,
            selling_x_point,
            selling_y,
            selling_y_point,
        };
        orders.validate()?;
        Ok(orders)
    }

    pub fn validate(&self) -> Result<(), OrdersError> {
        if self.liquidity.len() != self.liquidity_delta_point.len()
            || self.selling_x.len() != self.selling_x_point.len()
            || self.selling_y.len() != self.selling_y_point.len()
        {
            return Err(OrdersError::LengthMismatch);
        }
        if self.liquidity.is_empty() {
            return Err(OrdersError::EmptyLiquidity);
        }
        check_ascending(&self.liquidity_delta_point)?;
        check_ascending(&self.selling_x_point)?;
        check_ascending(&self.selling_y_point)
    }

    /// Index of the rightmost liquidity entry at or below `point`.
    fn liquidity_idx_at(&self, point: i32) -> Result<usize, OrdersError> {
        self.liquidity_delta_point
            .partition_point(|&p| p <= point)
            .checked_sub(1)
            .ok_or(OrdersError::CurrentPointNotCovered)
    }

    /// Positions a cursor at `point` for a leftward (X2Y) walk.
    pub fn find_left_cursor(&self, point: i32) -> Result<Cursor, OrdersError> {
        let liquidity_idx = self.liquidity_idx_at(point)?;
        let selling_idx = self
            .selling_y_point
            .partition_point(|&p| p <= point)
            .checked_sub(1);
        Ok(self.left_cursor(liquidity_idx, selling_idx, point))
    }

    /// Positions a cursor at `point` for a rightward (Y2X) walk.
    pub fn find_right_cursor(&self, point: i32) -> Result<Cursor, OrdersError> {
        let liquidity_idx = self.liquidity_idx_at(point)?;
        let idx = self.selling_x_point.partition_point(|&p| p < point);
        let selling_idx = (idx < self.selling_x_point.len()).then_some(idx);
        Ok(self.right_cursor(liquidity_idx, selling_idx, point))
    }

    /// Moves `cursor` down to `point` (`point <= cursor.current_point`)
    /// by stepping the indices, never re‑searching.
    pub fn find_left_from_cursor(&self, cursor: &Cursor, point: i32) -> Cursor {
        let mut liquidity_idx = cursor.liquidity_idx;
        while liquidity_idx > 0 && self.liquidity_delta_point[liquidity_idx] > point {
            liquidity_idx -= 1;
        }
        let mut selling_idx = cursor.selling_idx;
        while let Some(i) = selling_idx {
            if self.selling_y_point[i] <= point {
                break;
            }
            selling_idx = i.checked_sub(1);
        }
        self.left_cursor(liquidity_idx, selling_idx, point)
    }

    /// Moves `cursor` up to `point` (`point >= cursor.current_point`).
    pub fn find_right_from_cursor(&self, cursor: &Cursor, point: i32) -> Cursor {
        let mut liquidity_idx = cursor.liquidity_idx;
        while liquidity_idx + 1 < self.liquidity_delta_point.len()
            && self.liquidity_delta_point[liquidity_idx + 1] <= point
        {
            liquidity_idx += 1;
        }
        let mut selling_idx = cursor.selling_idx;
        while let Some(i) = selling_idx {
            if self.selling_x_point[i] >= point {
                break;
            }
            selling_idx = (i + 1 < self.selling_x_point.len()).then_some(i + 1);
        }
        self.right_cursor(liquidity_idx, selling_idx, point)
    }

    fn left_cursor(&self, liquidity_idx: usize, selling_idx: Option<usize>, point: i32) -> Cursor {
        Cursor {
            liquidity_idx,
            selling_idx,
            current_point: point,
            is_liquidity_point: self.liquidity_delta_point[liquidity_idx] == point,
            is_limit_order_point: selling_idx.is_some_and(|i| self.selling_y_point[i] == point),
        }
    }

    fn right_cursor(&self, liquidity_idx: usize, selling_idx: Option<usize>, point: i32) -> Cursor {
        Cursor {
            liquidity_idx,
            selling_idx,
            current_point: point,
            is_liquidity_point: self.liquidity_delta_point[liquidity_idx] == point,
            is_limit_order_point: selling_idx.is_some_and(|i| self.selling_x_point[i] == point),
        }
    }

    /// Greatest point strictly below the cursor where liquidity changes, a
    /// sell‑Y order rests, or a storage block of `point_delta * 256` points
    /// begins.
    pub fn nearest_left_one_or_boundary(&self, cursor: &Cursor, point_delta: i32) -> i32 {
        let current = cursor.current_point;
        let block = point_delta * BLOCK_SIZE;
        let mut nearest = floor_div(current - 1, block) * block;

        let liquidity_point = self.liquidity_delta_point[cursor.liquidity_idx];
        if liquidity_point < current {
            nearest = nearest.max(liquidity_point);
        } else if let Some(prev) = cursor.liquidity_idx.checked_sub(1) {
            nearest = nearest.max(self.liquidity_delta_point[prev]);
        }

        if let Some(i) = cursor.selling_idx {
            let order_point = self.selling_y_point[i];
            if order_point < current {
                nearest = nearest.max(order_point);
            } else if let Some(prev) = i.checked_sub(1) {
                nearest = nearest.max(self.selling_y_point[prev]);
            }
        }
        nearest
    }

    /// Smallest point strictly above the cursor where liquidity changes, a
    /// sell‑X order rests, or a storage block begins.
    pub fn nearest_right_one_or_boundary(&self, cursor: &Cursor, point_delta: i32) -> i32 {
        let current = cursor.current_point;
        let block = point_delta * BLOCK_SIZE;
        let mut nearest = (floor_div(current, block) + 1) * block;

        if let Some(&next) = self.liquidity_delta_point.get(cursor.liquidity_idx + 1) {
            nearest = nearest.min(next);
        }

        if let Some(i) = cursor.selling_idx {
            let order_point = self.selling_x_point[i];
            if order_point > current {
                nearest = nearest.min(order_point);
            } else if let Some(&next) = self.selling_x_point.get(i + 1) {
                nearest = nearest.min(next);
            }
        }
        nearest
    }

    /// The snapshot reaches down to `point`.
    pub fn cover_low_point(&self, point: i32) -> bool {
        self.liquidity_delta_point
            .first()
            .is_some_and(|&first| first <= point)
    }

    /// The sentinel entry reaches up to `point`.
    pub fn cover_high_point(&self, point: i32) -> bool {
        self.liquidity_delta_point
            .last()
            .is_some_and(|&last| last >= point)
    }

    /// Liquidity active at the point a cursor sits on.
    #[inline]
    pub fn liquidity_at(&self, cursor: &Cursor) -> u128 {
        self.liquidity[cursor.liquidity_idx]
    }

    /// Sell‑Y amount resting at the cursor, zero if none.
    pub fn selling_y_at(&self, cursor: &Cursor) -> u128 {
        match cursor.selling_idx {
            Some(i) if cursor.is_limit_order_point => self.selling_y[i],
            _ => 0,
        }
    }

    /// Sell‑X amount resting at the cursor, zero if none.
    pub fn selling_x_at(&self, cursor: &Cursor) -> u128 {
        match cursor.selling_idx {
            Some(i) if cursor.is_limit_order_point => self.selling_x[i],
            _ => 0,
        }
    }
}
