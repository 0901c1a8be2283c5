//! Session-scoped state for one interactive reconciliation.
//!
//! A session holds the two uploaded snapshots and the user's current
//! grouping and display selections. Every `run` recomputes the full
//! pipeline from those inputs; nothing is shared across sessions.

use crate::config::{validate_selection, ReportConfig};
use crate::engine::{run, ReconInput};
use crate::error::ReconError;
use crate::load::load_table;
use crate::model::{Dataset, Dimension, ReconResult, Table};

#[derive(Debug, Clone, Default)]
pub struct ReconSession {
    config: ReportConfig,
    expected: Option<Table>,
    counted: Option<Table>,
}

impl ReconSession {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            expected: None,
            counted: None,
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Parse and keep the expected-inventory upload. Replaces any earlier one.
    pub fn set_expected(&mut self, bytes: &[u8]) -> Result<&Table, ReconError> {
        let table = load_table(Dataset::Expected, bytes, &self.config.input)?;
        Ok(self.expected.insert(table))
    }

    /// Parse and keep the counted-inventory upload. Replaces any earlier one.
    pub fn set_counted(&mut self, bytes: &[u8]) -> Result<&Table, ReconError> {
        let table = load_table(Dataset::Counted, bytes, &self.config.input)?;
        Ok(self.counted.insert(table))
    }

    pub fn expected(&self) -> Option<&Table> {
        self.expected.as_ref()
    }

    pub fn counted(&self) -> Option<&Table> {
        self.counted.as_ref()
    }

    /// Change the grouping. The display column follows if it drops out.
    pub fn select_group_by(&mut self, dimensions: Vec<Dimension>) -> Result<(), ReconError> {
        validate_selection(&dimensions)?;
        let report = &mut self.config.report;
        if let Some(display) = report.display_by {
            if !dimensions.contains(&display) {
                report.display_by = None;
            }
        }
        report.group_by = dimensions;
        Ok(())
    }

    /// Change the chart x-axis. Must be one of the grouped columns.
    pub fn select_display_by(&mut self, dimension: Dimension) -> Result<(), ReconError> {
        if !self.config.report.group_by.contains(&dimension) {
            return Err(ReconError::DisplayNotGrouped(dimension.to_string()));
        }
        self.config.report.display_by = Some(dimension);
        Ok(())
    }

    /// Run the pipeline. `None` until both snapshots have been uploaded.
    pub fn run(&self) -> Result<Option<ReconResult>, ReconError> {
        let (Some(expected), Some(counted)) = (&self.expected, &self.counted) else {
            return Ok(None);
        };
        let input = ReconInput {
            expected: expected.clone(),
            counted: counted.clone(),
        };
        run(&self.config, &input).map(Some)
    }
}
