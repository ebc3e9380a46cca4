//! Translation from validated answers to the prediction service's numeric schema.

use shared::protocol::PredictionRequest;

use crate::validation::ValidatedAssessment;

pub fn to_prediction_request(assessment: &ValidatedAssessment) -> PredictionRequest {
    PredictionRequest {
        age: assessment.age(),
        sex: assessment.sex().code(),
        cp: assessment.chest_pain().code(),
        trestbps: assessment.resting_bp(),
        chol: assessment.cholesterol(),
        fbs: assessment.fasting_sugar().code(),
        thalach: assessment.max_heart_rate(),
        exang: assessment.exercise_angina().code(),
    }
}
