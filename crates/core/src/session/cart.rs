//! Selection cart operations over a session.
//!
//! The cart is a set of provider product ids. None of these operations can
//! fail; empty input is a no-op.

use super::SessionData;

/// Current cart contents (ascending).
pub fn get(session: &SessionData) -> Vec<i64> {
    session.cart.iter().copied().collect()
}

/// Add ids to the cart and return the resulting contents.
pub fn add(session: &mut SessionData, ids: &[i64]) -> Vec<i64> {
    session.cart.extend(ids.iter().copied());
    get(session)
}

/// Remove ids from the cart and return the resulting contents.
/// Ids not in the cart are ignored.
pub fn remove(session: &mut SessionData, ids: &[i64]) -> Vec<i64> {
    for id in ids {
        session.cart.remove(id);
    }
    get(session)
}

/// Empty the cart.
pub fn clear(session: &mut SessionData) {
    session.cart.clear();
}
