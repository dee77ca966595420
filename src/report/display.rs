use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use super::{MetricStatus, TraceReport};
use crate::analysis::Metric;

impl TraceReport {
    fn metric_value(&self, metric: Metric) -> Result<f64, String> {
        if metric == Metric::GapStd {
            return match &self.periodicity {
                MetricStatus::Computed(v) => Ok(*v),
                MetricStatus::NotComputable(reason) => Err(reason.clone()),
            };
        }
        match &self.power {
            MetricStatus::Computed(p) => Ok(match metric {
                Metric::Min => p.min,
                Metric::Max => p.max,
                Metric::Avg => p.avg,
                _ => p.std,
            }),
            MetricStatus::NotComputable(reason) => Err(reason.clone()),
        }
    }

    fn metric_lines(&self) -> impl Iterator<Item = (&'static str, Result<f64, String>)> + '_ {
        Metric::ALL
            .into_iter()
            .map(move |m| (m.label(), self.metric_value(m)))
    }

    fn distribution_line(&self) -> String {
        let config = self.distribution.config();
        let mut line = format!(
            "{} bins of {:.3} W, mass {:.4}",
            config.bin_count,
            config.bin_width(),
            self.distribution.total_mass()
        );
        if let Some((index, mass)) = self.distribution.mode() {
            line.push_str(&format!(
                ", mode {:.3} W ({:.4})",
                index as f64 * config.bin_width(),
                mass
            ));
        }
        line
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!("{}\n", style(&self.name).bold().cyan()));
            output.push_str(&format!("{}\n", style("=".repeat(self.name.len())).cyan()));
            output.push_str(&format!(
                "{}: {} ({} non-zero)\n",
                style("Samples").bold(),
                self.samples,
                self.non_zero_samples
            ));

            for (label, value) in self.metric_lines() {
                match value {
                    Ok(v) => output.push_str(&format!("{}: {}\n", style(label).green(), v)),
                    Err(reason) => output.push_str(&format!(
                        "{}: {} - {}\n",
                        style(label).yellow(),
                        style("not computable").yellow().bold(),
                        reason
                    )),
                }
            }

            if let MetricStatus::Computed(summary) = &self.summary {
                output.push('\n');
                output.push_str(&format!("{}\n", style("Summary (non-zero readings)").bold()));
                output.push_str(&summary.to_string());
            }

            output.push('\n');
            output.push_str(&format!(
                "{}: {}\n",
                style("Distribution").bold(),
                self.distribution_line()
            ));
            output.push_str(&format!(
                "{}: {}\n",
                style("Load changes").bold(),
                style(self.load_changes.len()).magenta()
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;
        write!(f, "Samples: {} ({} non-zero)", self.samples, self.non_zero_samples)?;
        match self.duration_secs {
            Some(secs) => writeln!(f, " over {:.0} s", secs)?,
            None => writeln!(f)?,
        }

        for (label, value) in self.metric_lines() {
            match value {
                Ok(v) => writeln!(f, "{}: {}", label, v)?,
                Err(reason) => writeln!(f, "{}: not computable - {}", label, reason)?,
            }
        }

        if let MetricStatus::Computed(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "Summary (non-zero readings)")?;
            write!(f, "{}", summary)?;
        }

        writeln!(f)?;
        writeln!(f, "Distribution: {}", self.distribution_line())?;
        writeln!(f, "Load changes: {}", self.load_changes.len())
    }
}
