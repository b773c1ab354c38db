//! Catalog query commands.
//!
//! # Usage
//!
//! ```bash
//! # All products of category type 1
//! pantry foods by-type 1
//!
//! # Specific products, in catalog order
//! pantry foods by-ids 3 1 7
//! ```

use std::io::Write;

use pantry_core::{Catalog, CatalogRecord, ProductId, ProductType};
use pantry_storefront::AppError;

/// Print every record of the given category type as JSON lines.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn by_type(
    catalog: &Catalog,
    product_type: ProductType,
    out: &mut impl Write,
) -> Result<usize, AppError> {
    let records = catalog.by_type(product_type);
    tracing::debug!(%product_type, matches = records.len(), "Filtered by type");
    write_records(&records, out)
}

/// Print every record whose id is listed, as JSON lines.
///
/// # Errors
///
/// Returns an error if output cannot be written.
pub fn by_ids(
    catalog: &Catalog,
    ids: &[ProductId],
    out: &mut impl Write,
) -> Result<usize, AppError> {
    let records = catalog.by_ids(ids);
    tracing::debug!(requested = ids.len(), matches = records.len(), "Filtered by ids");
    write_records(&records, out)
}

fn write_records(
    records: &[&CatalogRecord],
    out: &mut impl Write,
) -> Result<usize, AppError> {
    for record in records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(records.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json_str(
            r#"[{"id":1,"type":1,"name":"Arepa"},{"id":2,"type":2},{"id":3,"type":1}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_by_type_output() {
        let mut out = Vec::new();
        let count = by_type(&catalog(), ProductType::new(1), &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"id\":1,\"type\":1,\"name\":\"Arepa\"}\n{\"id\":3,\"type\":1}\n"
        );
    }

    #[test]
    fn test_by_ids_output() {
        let mut out = Vec::new();
        let ids = [ProductId::new(3), ProductId::new(2), ProductId::new(3)];
        let count = by_ids(&catalog(), &ids, &mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"id\":2,\"type\":2}\n{\"id\":3,\"type\":1}\n"
        );
    }

    #[test]
    fn test_no_match_prints_nothing() {
        let mut out = Vec::new();
        assert_eq!(by_type(&catalog(), ProductType::new(99), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }
}
