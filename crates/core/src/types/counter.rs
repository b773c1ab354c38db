//! Selection counters.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// How many units of a catalog product the user has selected.
///
/// The field names are part of the persisted format (`{"id":1,"cant":2}`)
/// and must not be renamed. `cant` is expected to be non-negative but is
/// not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductCounter {
    /// Catalog product this counter refers to.
    pub id: ProductId,
    /// Selected quantity.
    pub cant: i32,
}

impl ProductCounter {
    /// Create a new counter.
    #[must_use]
    pub const fn new(id: ProductId, cant: i32) -> Self {
        Self { id, cant }
    }
}

/// Sum of all quantities in a selection.
#[must_use]
pub fn total_quantity(counters: &[ProductCounter]) -> i64 {
    counters.iter().map(|c| i64::from(c.cant)).sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let counter = ProductCounter::new(ProductId::new(1), 2);
        let json = serde_json::to_string(&counter).unwrap();
        assert_eq!(json, r#"{"id":1,"cant":2}"#);
    }

    #[test]
    fn test_negative_cant_is_accepted() {
        let parsed: ProductCounter = serde_json::from_str(r#"{"id":5,"cant":-1}"#).unwrap();
        assert_eq!(parsed.cant, -1);
    }

    #[test]
    fn test_total_quantity() {
        let counters = [
            ProductCounter::new(ProductId::new(1), 2),
            ProductCounter::new(ProductId::new(2), 3),
        ];
        assert_eq!(total_quantity(&counters), 5);
        assert_eq!(total_quantity(&[]), 0);
    }
}
