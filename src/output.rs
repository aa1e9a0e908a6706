// src/output.rs
use crate::grid::{HeatmapGrid, SweepResult};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// One `value,price` row per sweep point, preceded by a header naming the variable.
pub fn write_sweep_csv<W: Write>(writer: W, result: &SweepResult) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let price_header = format!("{}_price", result.option_type);
    wtr.write_record([result.variable.name(), price_header.as_str()])?;
    for point in &result.points {
        wtr.write_record([point.value.to_string(), point.price.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Long format: one `volatility,spot,call_price,put_price` row per grid cell,
/// rows grouped by volatility.
pub fn write_heatmap_csv<W: Write>(writer: W, grid: &HeatmapGrid) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["volatility", "spot", "call_price", "put_price"])?;
    for (v, volatility) in grid.volatility_axis.iter().enumerate() {
        for (s, spot) in grid.spot_axis.iter().enumerate() {
            wtr.write_record([
                volatility.to_string(),
                spot.to_string(),
                grid.call_matrix[[v, s]].to_string(),
                grid.put_matrix[[v, s]].to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_sweep_to_file(path: impl AsRef<Path>, result: &SweepResult) -> io::Result<()> {
    let file = File::create(path)?;
    write_sweep_csv(file, result).map_err(io::Error::from)
}

pub fn write_heatmap_to_file(path: impl AsRef<Path>, grid: &HeatmapGrid) -> io::Result<()> {
    let file = File::create(path)?;
    write_heatmap_csv(file, grid).map_err(io::Error::from)
}
