//! Per-consumer electrical power accounting.

use hg_core::units::{to_kw, watt, Power};

/// Power draw of one system, itemized by consumer.
#[derive(Debug, Clone, Default)]
pub struct PowerBreakdown {
    entries: Vec<(&'static str, Power)>,
}

impl PowerBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &'static str, power: Power) {
        self.entries.push((label, power));
    }

    pub fn entries(&self) -> &[(&'static str, Power)] {
        &self.entries
    }

    /// Total draw across all consumers.
    pub fn total(&self) -> Power {
        watt(self.entries.iter().map(|(_, p)| p.value).sum())
    }

    /// One consumer's draw, if present.
    pub fn get(&self, label: &str) -> Option<Power> {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, p)| *p)
    }

    /// One consumer's share of the total, if present.
    pub fn fraction(&self, label: &str) -> Option<f64> {
        let total = self.total().value;
        self.get(label).map(|p| p.value / total)
    }

    /// Render the itemized draws in kW, one consumer per line.
    pub fn report(&self) -> String {
        let total = self.total();
        let mut out = String::new();
        for (label, power) in &self.entries {
            out.push_str(&format!(
                "{label}: {:.3} kW ({:.1} %)\n",
                to_kw(*power),
                100.0 * power.value / total.value
            ));
        }
        out.push_str(&format!("total: {:.3} kW\n", to_kw(total)));
        out
    }
}
