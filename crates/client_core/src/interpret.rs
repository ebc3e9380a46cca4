//! Turns a scored prediction into what the result card shows: a themed tier, the
//! probability as a percentage, and the tier's action plan.

use serde::Serialize;
use shared::{domain::RiskTier, protocol::PredictionResponse};

pub const DISCLAIMER: &str = "This AI prediction is for informational purposes only and does not constitute official medical advice.";

/// Tier used when the service sends a label outside Low/Medium/High.
pub const FALLBACK_TIER: RiskTier = RiskTier::Low;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Red,
    Amber,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskIcon {
    Alert,
    Info,
    Check,
}

/// Colour tokens are `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskTheme {
    pub palette: Palette,
    pub icon: RiskIcon,
    pub accent: &'static str,
    pub background: &'static str,
    pub badge: &'static str,
    pub badge_text: &'static str,
    pub progress: &'static str,
}

const HIGH_THEME: RiskTheme = RiskTheme {
    palette: Palette::Red,
    icon: RiskIcon::Alert,
    accent: "#EF4444",
    background: "#EF44441A",
    badge: "#DC2626",
    badge_text: "#FFFFFF",
    progress: "#EF4444",
};

const MEDIUM_THEME: RiskTheme = RiskTheme {
    palette: Palette::Amber,
    icon: RiskIcon::Info,
    accent: "#EAB308",
    background: "#EAB3081A",
    badge: "#EAB308",
    badge_text: "#0F172A",
    progress: "#EAB308",
};

const LOW_THEME: RiskTheme = RiskTheme {
    palette: Palette::Green,
    icon: RiskIcon::Check,
    accent: "#22C55E",
    background: "#22C55E1A",
    badge: "#16A34A",
    badge_text: "#FFFFFF",
    progress: "#22C55E",
};

const HIGH_RECOMMENDATIONS: [&str; 4] = [
    "Seek emergency medical assessment immediately, especially if experiencing active chest pain or shortness of breath.",
    "Do not engage in strenuous physical activity until cleared by a cardiologist.",
    "Keep a daily log of blood pressure, heart rate, and any chest discomfort (duration and triggers).",
    "Prepare a list of your current medications and family cardiac history for your emergency visit.",
];

const MEDIUM_RECOMMENDATIONS: [&str; 4] = [
    "Schedule a non-urgent consultation with a cardiologist within the next 2 to 4 weeks.",
    "Request a comprehensive lipid panel, HbA1c test, and a professional resting ECG.",
    "Begin strict dietary sodium reduction (aim for under 1,500 mg per day) and limit saturated fats.",
    "Monitor and record your blood pressure at home twice daily (morning and evening).",
];

const LOW_RECOMMENDATIONS: [&str; 4] = [
    "Maintain routine annual or bi-annual checkups with your primary care physician.",
    "Aim for the AHA-recommended 150 minutes of moderate-intensity aerobic exercise per week.",
    "Focus on a heart-healthy diet rich in whole grains, lean proteins, and minimizing processed sugars.",
    "Keep stress levels managed and ensure 7-9 hours of quality sleep per night.",
];

pub fn theme_for(tier: RiskTier) -> RiskTheme {
    match tier {
        RiskTier::High => HIGH_THEME,
        RiskTier::Medium => MEDIUM_THEME,
        RiskTier::Low => LOW_THEME,
    }
}

pub fn recommendations_for(tier: RiskTier) -> [&'static str; 4] {
    match tier {
        RiskTier::High => HIGH_RECOMMENDATIONS,
        RiskTier::Medium => MEDIUM_RECOMMENDATIONS,
        RiskTier::Low => LOW_RECOMMENDATIONS,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskPresentation {
    /// Label exactly as the service sent it.
    pub risk_label: String,
    pub tier: RiskTier,
    pub probability: f64,
    /// `probability * 100` with one decimal, e.g. `"84.2"`.
    pub probability_percent: String,
    pub theme: RiskTheme,
    pub recommendations: [&'static str; 4],
    /// One-line summary from the service, when it sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub disclaimer: &'static str,
}

pub fn interpret(risk_label: &str, probability: f64) -> RiskPresentation {
    let tier = RiskTier::from_label(risk_label).unwrap_or(FALLBACK_TIER);
    RiskPresentation {
        risk_label: risk_label.to_string(),
        tier,
        probability,
        probability_percent: format!("{:.1}", probability * 100.0),
        theme: theme_for(tier),
        recommendations: recommendations_for(tier),
        summary: None,
        disclaimer: DISCLAIMER,
    }
}

pub fn interpret_response(response: &PredictionResponse) -> RiskPresentation {
    RiskPresentation {
        summary: response.recommendation.clone(),
        ..interpret(&response.risk, response.probability)
    }
}
