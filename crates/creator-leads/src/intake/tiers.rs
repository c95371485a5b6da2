use serde::{Deserialize, Serialize};

/// Lower-inclusive budget band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBand {
    pub lower_bound: f64,
    pub label: String,
}

impl TierBand {
    pub fn new(lower_bound: f64, label: impl Into<String>) -> Self {
        Self {
            lower_bound,
            label: label.into(),
        }
    }
}

/// Where a budget lands: the band label and a 0-100 progress value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPlacement {
    pub label: String,
    pub progress: f64,
    pub band_index: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierTableError {
    #[error("tier table must contain at least one band")]
    Empty,
    #[error("tier bound for '{label}' must be a finite number")]
    NonFinite { label: String },
    #[error("tier bounds must be strictly ascending ({previous} then {next})")]
    Unsorted { previous: f64, next: f64 },
    #[error("elite ceiling {ceiling} must be above the top band bound {top}")]
    CeilingTooLow { ceiling: f64, top: f64 },
    #[error("malformed tier entry '{0}', expected '<bound>:<label>'")]
    Malformed(String),
}

/// Piecewise-linear budget classifier. Each band owns an equal share of the 0-100 scale;
/// the top band fills its share between its bound and the elite ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTierClassifier {
    bands: Vec<TierBand>,
    ceiling: f64,
}

impl BudgetTierClassifier {
    pub fn new(bands: Vec<TierBand>, ceiling: f64) -> Result<Self, TierTableError> {
        let Some(top) = bands.last() else {
            return Err(TierTableError::Empty);
        };

        for band in &bands {
            if !band.lower_bound.is_finite() {
                return Err(TierTableError::NonFinite {
                    label: band.label.clone(),
                });
            }
        }

        for pair in bands.windows(2) {
            if pair[1].lower_bound <= pair[0].lower_bound {
                return Err(TierTableError::Unsorted {
                    previous: pair[0].lower_bound,
                    next: pair[1].lower_bound,
                });
            }
        }

        if !ceiling.is_finite() || ceiling <= top.lower_bound {
            return Err(TierTableError::CeilingTooLow {
                ceiling,
                top: top.lower_bound,
            });
        }

        Ok(Self { bands, ceiling })
    }

    /// Collaboration tiers used by the brand form.
    pub fn standard() -> Self {
        Self {
            bands: vec![
                TierBand::new(0.0, "Starter Collaboration"),
                TierBand::new(500.0, "Standard Collaboration"),
                TierBand::new(800.0, "Premium Collaboration"),
                TierBand::new(1000.0, "Elite Collaboration"),
            ],
            ceiling: 1500.0,
        }
    }

    /// Parse `"0:Starter,500:Standard"` style tables from configuration.
    pub fn parse_bands(raw: &str) -> Result<Vec<TierBand>, TierTableError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (bound, label) = entry
                    .split_once(':')
                    .ok_or_else(|| TierTableError::Malformed(entry.to_string()))?;
                let bound = bound
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| TierTableError::Malformed(entry.to_string()))?;
                let label = label.trim();
                if label.is_empty() {
                    return Err(TierTableError::Malformed(entry.to_string()));
                }
                Ok(TierBand::new(bound, label))
            })
            .collect()
    }

    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn classify(&self, budget: f64) -> TierPlacement {
        let budget = if budget.is_finite() { budget } else { 0.0 };
        let index = self
            .bands
            .iter()
            .rposition(|band| budget >= band.lower_bound)
            .unwrap_or(0);

        let share = 100.0 / self.bands.len() as f64;
        let entry = self.bands[index].lower_bound;
        let exit = self
            .bands
            .get(index + 1)
            .map(|band| band.lower_bound)
            .unwrap_or(self.ceiling);
        let fraction = ((budget - entry) / (exit - entry)).clamp(0.0, 1.0);
        let progress = ((index as f64 + fraction) * share).clamp(0.0, 100.0);

        TierPlacement {
            label: self.bands[index].label.clone(),
            progress,
            band_index: index,
        }
    }
}

impl Default for BudgetTierClassifier {
    fn default() -> Self {
        Self::standard()
    }
}
