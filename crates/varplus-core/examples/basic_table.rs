//! Basic table creation and manipulation examples.
//!
//! This example walks through the core functionality of varplus-core:
//! - Building tables from nested literals and fill values
//! - Reshaping, transposing and slicing
//! - Reductions over mixed integer and float leaves
//! - JSON and CSV interchange
//!
//! Run with:
//! ```bash
//! cargo run --example basic_table
//! ```

use varplus_core::tracing_support::{init_tracing, TracingConfig};
use varplus_core::{AxisSlice, NdArray, Value};

fn main() -> anyhow::Result<()> {
    init_tracing(TracingConfig::default())?;

    println!("=== VarPlus Core: Basic Table Examples ===\n");
    example_creation()?;
    example_transforms()?;
    example_reductions()?;
    example_interchange()?;
    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_creation() -> anyhow::Result<()> {
    println!("--- Example 1: Table Creation ---");

    let grid = NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])?;
    println!("Literal table, shape {:?}:\n{grid}", grid.shape());

    let blank = NdArray::create(&[2, 3], Value::Null)?;
    println!("Null-filled table: {blank}");

    let mut coords = NdArray::create_2d(2, 2, 0)?;
    coords.fill_with(|idx| Value::from(format!("({}, {})", idx[0], idx[1])));
    println!("Index labels: {coords}\n");
    Ok(())
}

fn example_transforms() -> anyhow::Result<()> {
    println!("--- Example 2: Structural Transforms ---");

    let grid = NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])?;
    let transposed = grid.reshape(&[4, 3])?.transpose()?;
    println!("reshape(4, 3).transpose() -> shape {:?}", transposed.shape());

    let corner = grid.slice(&[AxisSlice::range(0, 2), AxisSlice::range(2, 4)])?;
    println!("Top-right corner: {corner}");

    let rotated = grid.rotate_90()?;
    println!("Rotated clockwise: {rotated}");

    let bordered = grid.pad(1, "-")?;
    println!("Padded shape: {:?}\n", bordered.shape());
    Ok(())
}

fn example_reductions() -> anyhow::Result<()> {
    println!("--- Example 3: Reductions ---");

    let grid = NdArray::from_nested([[1, 2, 3, 4], [5, 6, 7, 8], [9, 10, 11, 12]])?;
    let doubled = grid.multiply_scalar(2)?.flatten();
    println!("sum = {}", doubled.sum()?);
    println!("mean = {}", doubled.mean()?);
    println!("min = {}, max = {}\n", doubled.min()?, doubled.max()?);
    Ok(())
}

fn example_interchange() -> anyhow::Result<()> {
    println!("--- Example 4: JSON and CSV ---");

    let table = NdArray::from_csv("1,2.5,label\n4,,6")?;
    println!("Parsed CSV: {table}");
    println!("As JSON: {}", table.to_json()?);

    let restored = NdArray::from_json(&table.to_json_pretty()?)?;
    assert_eq!(restored, table);
    println!("Back to CSV:\n{}", restored.to_csv()?);
    Ok(())
}
