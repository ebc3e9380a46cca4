//! Plain-text rendering of the assessment result card.

use client_core::interpret::{RiskIcon, RiskPresentation};

const GAUGE_WIDTH: usize = 20;

pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn presentation(&self, presentation: &RiskPresentation) -> String {
        let accent = presentation.theme.accent;
        let mut out = String::new();

        out.push_str(&format!(
            "{} {}\n",
            self.paint(accent, icon_glyph(presentation.theme.icon)),
            self.paint(accent, &format!("{} Risk", presentation.risk_label)),
        ));
        out.push_str(&format!(
            "Calculated probability: {}\n",
            self.paint(accent, &format!("{}%", presentation.probability_percent)),
        ));
        out.push_str(&format!(
            "{}\n\n",
            self.paint(accent, &gauge(presentation.probability))
        ));

        out.push_str("Action plan:\n");
        for recommendation in presentation.recommendations {
            out.push_str(&format!("  {} {recommendation}\n", self.paint(accent, "•")));
        }

        if let Some(summary) = &presentation.summary {
            out.push_str(&format!("\nService note: {summary}\n"));
        }
        out.push_str(&format!("\nDisclaimer: {}\n", presentation.disclaimer));
        out
    }

    fn paint(&self, hex: &str, text: &str) -> String {
        match (self.color, hex_rgb(hex)) {
            (true, Some((r, g, b))) => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    }
}

fn icon_glyph(icon: RiskIcon) -> &'static str {
    match icon {
        RiskIcon::Alert => "[!]",
        RiskIcon::Info => "[i]",
        RiskIcon::Check => "[✓]",
    }
}

fn gauge(probability: f64) -> String {
    let filled = (probability.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    )
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
    };
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use client_core::interpret;

    use super::*;

    #[test]
    fn renders_tier_percent_and_plan_without_color() {
        let text = Renderer::new(false).presentation(&interpret("High", 0.842));
        assert!(text.starts_with("[!] High Risk\n"));
        assert!(text.contains("Calculated probability: 84.2%"));
        assert!(text.contains("[#################---]"));
        assert_eq!(text.matches("  • ").count(), 4);
        assert!(text.contains("Disclaimer: This AI prediction"));
    }

    #[test]
    fn color_uses_theme_accent() {
        let text = Renderer::new(true).presentation(&interpret("Low", 0.1));
        assert!(text.contains("\x1b[38;2;34;197;94m"));
    }

    #[test]
    fn gauge_is_clamped() {
        assert_eq!(gauge(0.0), format!("[{}]", "-".repeat(GAUGE_WIDTH)));
        assert_eq!(gauge(1.5), format!("[{}]", "#".repeat(GAUGE_WIDTH)));
    }
}
