use std::io::IsTerminal;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    AssessmentController, AssessmentState, HttpPredictionClient, PredictionService,
};
use shared::domain::{BiologicalSex, ChestPainType, ExerciseAngina, FastingSugar, FormField};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{load_settings, prepare_api_url};
use render::Renderer;

/// At-home heart risk screener. Answer the eight questions and get a risk tier with an
/// action plan from the prediction service.
#[derive(Parser, Debug)]
#[command(name = "screener")]
struct Args {
    /// Prediction service base URL. Overrides screener.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Age in whole years (18-100).
    #[arg(long)]
    age: Option<String>,
    /// Biological sex: male or female.
    #[arg(long)]
    sex: Option<String>,
    /// Chest pain type code, 0-3 (see --options).
    #[arg(long)]
    chest_pain: Option<String>,
    /// Resting blood pressure in mm Hg (80-250).
    #[arg(long)]
    resting_bp: Option<String>,
    /// Total cholesterol in mg/dl (100-600).
    #[arg(long)]
    cholesterol: Option<String>,
    /// Fasting blood sugar above 120 mg/dl: true or false.
    #[arg(long)]
    fasting_sugar_high: Option<String>,
    /// Maximum heart rate in bpm (60-220).
    #[arg(long)]
    max_heart_rate: Option<String>,
    /// Chest pain during exercise: 1 for yes, 0 for no.
    #[arg(long)]
    exercise_pain: Option<String>,
    /// Fill the max heart rate from age (220 - age).
    #[arg(long)]
    estimate_max_heart_rate: bool,
    /// Print the assessment view as JSON.
    #[arg(long)]
    json: bool,
    /// List the accepted answers for each multiple-choice question and exit.
    #[arg(long)]
    options: bool,
}

impl Args {
    fn answers(&self) -> Vec<(FormField, &str)> {
        [
            (FormField::Age, &self.age),
            (FormField::Sex, &self.sex),
            (FormField::ChestPain, &self.chest_pain),
            (FormField::RestingBp, &self.resting_bp),
            (FormField::Cholesterol, &self.cholesterol),
            (FormField::FastingSugar, &self.fasting_sugar_high),
            (FormField::MaxHeartRate, &self.max_heart_rate),
            (FormField::ExerciseAngina, &self.exercise_pain),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

fn print_options() {
    fn section(
        field: FormField,
        flag: &str,
        choices: impl Iterator<Item = (&'static str, &'static str)>,
    ) {
        println!("{} ({flag}):", field.prompt());
        for (value, label) in choices {
            println!("  {value:<6} {label}");
        }
    }

    section(
        FormField::Sex,
        "--sex",
        BiologicalSex::ALL.iter().map(|c| (c.form_value(), c.label())),
    );
    section(
        FormField::ChestPain,
        "--chest-pain",
        ChestPainType::ALL.iter().map(|c| (c.form_value(), c.label())),
    );
    section(
        FormField::FastingSugar,
        "--fasting-sugar-high",
        FastingSugar::ALL.iter().map(|c| (c.form_value(), c.label())),
    );
    section(
        FormField::ExerciseAngina,
        "--exercise-pain",
        ExerciseAngina::ALL.iter().map(|c| (c.form_value(), c.label())),
    );
}

/// Optionally estimates the max heart rate, then submits. A failed estimate leaves its
/// message on the controller and skips the request.
async fn assess<S>(
    controller: &mut AssessmentController,
    estimate_max_heart_rate: bool,
    service: &S,
) -> AssessmentState
where
    S: PredictionService + ?Sized,
{
    if estimate_max_heart_rate {
        if controller.estimate_max_heart_rate().is_err() {
            return controller.state();
        }
        info!("screener: max heart rate estimated from age");
    }
    controller.submit(service).await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    if args.options {
        print_options();
        return Ok(());
    }

    let mut settings = load_settings();
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    let api_url = prepare_api_url(&settings.api_url)?;
    let client = HttpPredictionClient::with_timeout(&api_url, settings.request_timeout())?;
    info!(
        endpoint = %client.predict_url(),
        timeout_secs = settings.request_timeout_secs,
        "screener: prediction service configured"
    );

    let mut controller = AssessmentController::new();
    for (field, value) in args.answers() {
        controller.edit_field(field, value);
    }

    let state = assess(&mut controller, args.estimate_max_heart_rate, &client).await;
    let view = controller.view();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if let Some(result) = &view.result {
        let renderer = Renderer::new(std::io::stdout().is_terminal());
        print!("{}", renderer.presentation(result));
    }

    match state {
        AssessmentState::Success => Ok(()),
        _ => Err(anyhow!(view
            .error
            .unwrap_or_else(|| "assessment did not complete".to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_estimate_still_produces_a_view() {
        let client = HttpPredictionClient::new("http://127.0.0.1:9").expect("client");
        let mut controller = AssessmentController::new();
        controller.edit_field(FormField::Sex, "male");

        let state = assess(&mut controller, true, &client).await;

        assert_eq!(state, AssessmentState::Editing);
        let view = serde_json::to_value(controller.view()).expect("serialize");
        assert_eq!(view["state"], "editing");
        assert_eq!(
            view["error"],
            "Please enter your age first to estimate Max Heart Rate."
        );
    }
}
