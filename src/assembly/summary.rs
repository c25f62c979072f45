use std::fmt;

use super::GeometryAssembly;

const LABEL_WIDTH: usize = 35;

/// One `  -id = value   description [units]` line; skipped when `value` is
/// `None`.
fn parameter<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    id: &str,
    value: Option<V>,
    description: &str,
    units: &str,
) -> fmt::Result {
    let Some(value) = value else {
        return Ok(());
    };
    let prefix = format!("  -{id} = {value:.2}");
    write!(f, "\n{prefix:<LABEL_WIDTH$}{description}")?;
    if !units.is_empty() {
        write!(f, " [{units}]")?;
    }
    Ok(())
}

impl fmt::Display for GeometryAssembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config();
        let plan = self.plan();
        let foundation_type = self.foundation_type();

        write!(
            f,
            "Foundation type: {} ({})",
            foundation_type.label, foundation_type.case
        )?;
        parameter(f, "b", Some(config.width), "Foundation width", "m")?;
        parameter(f, "d", Some(config.depth), "Foundation depth", "m")?;
        parameter(f, "b1", config.column_width, "Column width", "m")?;
        parameter(f, "d1", config.footing_thickness, "Footing thickness", "m")?;
        if let Some(fill) = &plan.fill {
            parameter(f, "fill_angle", Some(fill.angle), "Fill angle", "deg")?;
            parameter(
                f,
                "bfill",
                Some(fill.offset),
                "Distance between the foundation edge and the fill slope toe",
                "m",
            )?;
            parameter(f, "nfill", Some(fill.layers.len()), "Number of fill layers", "")?;
        }
        parameter(
            f,
            "nstrata",
            Some(plan.strata.len()),
            "Number of soil layers",
            "",
        )?;
        if let Some(band) = plan.ratchetting {
            parameter(
                f,
                "dratchetting",
                Some(band.top - band.bottom),
                "Soil replaced under the foundation by ratchetting",
                "m",
            )?;
        }
        parameter(
            f,
            "wt",
            plan.water_table.map(|z| -z),
            "Global water table depth",
            "m",
        )?;
        parameter(f, "model_width", Some(plan.model_width), "Model width", "m")?;
        parameter(f, "model_depth", Some(plan.model_depth), "Model depth", "m")?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::assembly::GeometryAssembly;
    use crate::config::{FillConfig, FoundationConfig};

    #[test]
    fn plate_report_lists_set_parameters() {
        let config = FoundationConfig::plate(2.0, 1.0).with_water_table(0.5);
        let report = GeometryAssembly::build(&config).unwrap().to_string();
        assert!(report.starts_with("Foundation type: buried plate foundation"));
        assert!(report.contains("(case 1)"));
        assert!(report.contains("  -b = 2.00"));
        assert!(report.contains("Global water table depth [m]"));
        assert!(!report.contains("-b1 ="));
        assert!(!report.contains("fill_angle"));
    }

    #[test]
    fn descriptions_start_in_one_column() {
        let config = FoundationConfig::solid(2.0, 2.0, 0.5, 0.5)
            .with_fill(FillConfig::new(30.0))
            .with_ratchetting(0.25);
        let report = GeometryAssembly::build(&config).unwrap().to_string();
        assert!(report.contains("  -dratchetting = 0.25"));
        assert!(report.contains("  -nfill = 1 "));
        for line in report.lines().skip(1) {
            assert_eq!(line.find(|c: char| c.is_ascii_uppercase()), Some(35), "{line}");
        }
    }
}
