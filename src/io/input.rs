// src/io/input.rs

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{PipelineError, PipelineResult};
use crate::model::{Material, Order};

const ORDER_FIELDS: usize = 5;
const MATERIAL_FIELDS: usize = 3;

/// Reads an order file: `color,quantity,city,salesRep,YYYY-MM-DD` per line, no header.
pub fn read_orders(path: &Path) -> PipelineResult<Vec<Order>> {
    read_records(path, ORDER_FIELDS, |record| {
        let (color, quantity, city, sales_rep, order_date) = record
            .deserialize::<(String, f64, String, String, NaiveDate)>(None)
            .map_err(|err| err.to_string())?;

        require_text("color", &color)?;
        require_text("city", &city)?;
        require_text("sales rep", &sales_rep)?;
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(format!("order quantity must be positive, got {quantity}"));
        }

        let order = Order::new(color, quantity, city, sales_rep, order_date);
        tracing::info!(
            color = %order.color,
            quantity = order.quantity,
            city = %order.city,
            sales_rep = %order.sales_rep,
            order_date = %order.order_date,
            "order read"
        );
        Ok(order)
    })
}

/// Reads a material file: `color,quantity,YYYY-MM-DD` per line, no header.
pub fn read_materials(path: &Path) -> PipelineResult<Vec<Material>> {
    read_records(path, MATERIAL_FIELDS, |record| {
        let (color, quantity, order_date) = record
            .deserialize::<(String, f64, NaiveDate)>(None)
            .map_err(|err| err.to_string())?;

        require_text("color", &color)?;
        if !quantity.is_finite() || quantity < 0.0 {
            return Err(format!("material quantity must not be negative, got {quantity}"));
        }

        let material = Material::new(color, quantity, order_date);
        tracing::info!(
            color = %material.color,
            quantity = material.quantity,
            order_date = %material.order_date,
            "material read"
        );
        Ok(material)
    })
}

fn require_text(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        Err(format!("{field} is empty"))
    } else {
        Ok(())
    }
}

/// Parses every line of `path` before returning, so a bad line anywhere
/// yields an error and no records.
fn read_records<T, F>(path: &Path, fields: usize, parse: F) -> PipelineResult<Vec<T>>
where
    F: Fn(&csv::StringRecord) -> Result<T, String>,
{
    let file = File::open(path).map_err(|source| PipelineError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let format_error = |line: u64, reason: String| PipelineError::InputFormat {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|err| {
            let line = err.position().map(|pos| pos.line()).unwrap_or(0);
            format_error(line, err.to_string())
        })?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        if record.len() != fields {
            return Err(format_error(
                line,
                format!("expected {fields} fields, found {}", record.len()),
            ));
        }

        records.push(parse(&record).map_err(|reason| format_error(line, reason))?);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn format_error_line(err: PipelineError) -> u64 {
        match err {
            PipelineError::InputFormat { line, .. } => line,
            other => panic!("expected input format error, got {other:?}"),
        }
    }

    #[test]
    fn reads_orders_in_file_order() {
        let file = write_file("red,10.5,Paris,alice,2024-03-01\nblue, 3 ,Lyon,bob,2024-03-02\n");
        let orders = read_orders(file.path()).unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].color, "red");
        assert_eq!(orders[0].quantity, 10.5);
        assert_eq!(orders[0].sales_rep, "alice");
        assert_eq!(orders[1].quantity, 3.0);
        assert_eq!(
            orders[1].order_date,
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn skips_blank_lines() {
        let file = write_file("red,4,2024-03-01\n\nblue,0,2024-03-01\n");
        let materials = read_materials(file.path()).unwrap();
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[1].quantity, 0.0);
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let file = write_file("red,4,2024-03-01\nblue,4\n");
        let err = read_materials(file.path()).unwrap_err();
        assert_eq!(format_error_line(err), 2);
    }

    #[test]
    fn unparsable_number_is_rejected() {
        let file = write_file("red,lots,Paris,alice,2024-03-01\n");
        let err = read_orders(file.path()).unwrap_err();
        assert_eq!(format_error_line(err), 1);
    }

    #[test]
    fn unparsable_date_is_rejected() {
        let file = write_file("red,4,01/03/2024\n");
        assert!(matches!(
            read_materials(file.path()),
            Err(PipelineError::InputFormat { .. })
        ));
    }

    #[test]
    fn non_positive_order_quantity_is_rejected() {
        let file = write_file("red,0,Paris,alice,2024-03-01\n");
        assert!(matches!(
            read_orders(file.path()),
            Err(PipelineError::InputFormat { .. })
        ));
    }

    #[test]
    fn negative_material_quantity_is_rejected() {
        let file = write_file("red,-1,2024-03-01\n");
        assert!(matches!(
            read_materials(file.path()),
            Err(PipelineError::InputFormat { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_orders(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, PipelineError::Input { .. }));
    }
}
