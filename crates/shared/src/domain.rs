use serde::{Deserialize, Serialize};

/// Declares a closed form selection whose options travel as short strings in the form
/// and as small integer codes on the wire.
macro_rules! coded_choice {
    ($name:ident { $($variant:ident = $code:literal => $value:literal, $label:literal);+ $(;)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn from_form_value(raw: &str) -> Option<Self> {
                match raw.trim() {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn form_value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

coded_choice!(BiologicalSex {
    Female = 0 => "female", "Female";
    Male = 1 => "male", "Male";
});

coded_choice!(ChestPainType {
    Typical = 0 => "0", "Typical (heavy pressure or squeezing)";
    Atypical = 1 => "1", "Atypical (sharp or stabbing pain)";
    NonCardiac = 2 => "2", "Non-heart related (muscle ache)";
    Asymptomatic = 3 => "3", "I have no chest pain";
});

coded_choice!(FastingSugar {
    Normal = 0 => "false", "No";
    High = 1 => "true", "Yes (fasting sugar > 120 mg/dl)";
});

coded_choice!(ExerciseAngina {
    No = 0 => "0", "No, I feel fine exercising";
    Yes = 1 => "1", "Yes, exercise causes chest pain";
});

/// The eight questions of the screener, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FormField {
    Age,
    Sex,
    ChestPain,
    RestingBp,
    Cholesterol,
    FastingSugar,
    MaxHeartRate,
    ExerciseAngina,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Age,
        FormField::Sex,
        FormField::ChestPain,
        FormField::RestingBp,
        FormField::Cholesterol,
        FormField::FastingSugar,
        FormField::MaxHeartRate,
        FormField::ExerciseAngina,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::ChestPain => "chestPain",
            Self::RestingBp => "bp",
            Self::Cholesterol => "cholesterol",
            Self::FastingSugar => "fastingSugar",
            Self::MaxHeartRate => "heartRate",
            Self::ExerciseAngina => "exerciseAngina",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Age => "Your age",
            Self::Sex => "Biological sex",
            Self::ChestPain => "Describe any chest pain",
            Self::RestingBp => "Resting blood pressure (mm Hg)",
            Self::Cholesterol => "Total cholesterol (mg/dl)",
            Self::FastingSugar => "Are you diabetic?",
            Self::MaxHeartRate => "Max heart rate (bpm)",
            Self::ExerciseAngina => "Pain when exercising?",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification returned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Matches the labels the prediction service emits. Anything else is `None`;
    /// callers pick their own fallback.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
