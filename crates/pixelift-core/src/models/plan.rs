use serde::{Deserialize, Serialize};

/// Subscription tier identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Pro,
    Studio,
}

/// Marketing description of one subscription plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInfo {
    pub tier: PlanTier,
    pub name: String,
    pub monthly_price_cents: u32,
    pub credits_per_day: u32,
    pub features: Vec<String>,
    /// The plan the pricing screen visually emphasizes.
    pub highlighted: bool,
}

impl PlanInfo {
    /// The static plan catalog shown on the pricing screen. Purchasing and
    /// entitlement enforcement live on the backend.
    pub fn catalog() -> Vec<PlanInfo> {
        vec![
            PlanInfo {
                tier: PlanTier::Free,
                name: "Free".to_string(),
                monthly_price_cents: 0,
                credits_per_day: 3,
                features: vec![
                    "3 enhancement credits per day".to_string(),
                    "Face, background and text enhancement".to_string(),
                    "Personal gallery".to_string(),
                ],
                highlighted: false,
            },
            PlanInfo {
                tier: PlanTier::Pro,
                name: "Pro".to_string(),
                monthly_price_cents: 900,
                credits_per_day: 50,
                features: vec![
                    "50 enhancement credits per day".to_string(),
                    "Colorization".to_string(),
                    "Priority processing".to_string(),
                ],
                highlighted: true,
            },
            PlanInfo {
                tier: PlanTier::Studio,
                name: "Studio".to_string(),
                monthly_price_cents: 2900,
                credits_per_day: 500,
                features: vec![
                    "500 enhancement credits per day".to_string(),
                    "Batch enhancement".to_string(),
                    "Original-resolution downloads".to_string(),
                ],
                highlighted: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_one_highlighted_plan() {
        let catalog = PlanInfo::catalog();
        assert_eq!(catalog.iter().filter(|p| p.highlighted).count(), 1);
        assert_eq!(catalog[0].tier, PlanTier::Free);
        assert_eq!(catalog[0].monthly_price_cents, 0);
    }
}
