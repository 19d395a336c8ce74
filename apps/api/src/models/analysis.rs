use serde::{Deserialize, Serialize};

/// Resume-to-job match estimate, 0–100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "u8")]
pub struct FitScore(u8);

impl FitScore {
    pub const MAX: u8 = 100;

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for FitScore {
    type Error = String;

    fn try_from(raw: f64) -> Result<Self, Self::Error> {
        if raw.fract() != 0.0 {
            return Err(format!("fit_score must be an integer, got {raw}"));
        }
        if !(0.0..=f64::from(Self::MAX)).contains(&raw) {
            return Err(format!("fit_score must be between 0 and 100, got {raw}"));
        }
        Ok(FitScore(raw as u8))
    }
}

impl From<FitScore> for u8 {
    fn from(score: FitScore) -> Self {
        score.0
    }
}

/// Structured assessment returned by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub fit_score: FitScore,
    pub summary: String,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub tailored_bullets: Vec<String>,
    pub interview_questions: Vec<String>,
}

/// Body of a successful `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub elapsed_ms: u64,
}
