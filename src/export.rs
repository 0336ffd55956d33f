use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Dataset;

/// 将数据集写为CSV：Step,Value,Unit,Condition1,Condition2,steps,<performance>
pub fn write_dataset_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create dataset file: {}", path.display()))?;
    write_dataset(dataset, file)
        .with_context(|| format!("Failed to write dataset file: {}", path.display()))
}

pub fn write_dataset<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "Step",
        "Value",
        "Unit",
        "Condition1",
        "Condition2",
        "steps",
        dataset.performance.as_str(),
    ])?;

    for row in &dataset.rows {
        wtr.write_record([
            row.step.to_string(),
            row.value.to_string(),
            row.unit.to_string(),
            row.condition1.clone(),
            row.condition2.clone(),
            row.steps().to_string(),
            row.metric.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
