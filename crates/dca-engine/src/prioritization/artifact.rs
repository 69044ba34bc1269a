use super::classifier::{LogisticRegression, FEATURE_COUNT, FEATURE_NAMES};
use super::encoder::CategoryEncoder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Trained classifier plus the categorical encoders fitted alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub classifier: LogisticRegression,
    pub customer_type: CategoryEncoder,
    pub region: CategoryEncoder,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelArtifactError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model artifact: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model artifact encoder '{0}' has no classes")]
    EmptyEncoder(&'static str),
    #[error(
        "model artifact has {found} coefficient(s); expected one per feature: {}",
        FEATURE_NAMES.join(", ")
    )]
    CoefficientCount { found: usize },
}

#[derive(Debug, Deserialize)]
struct ArtifactDocument {
    classifier: ClassifierDocument,
    encoders: EncoderDocument,
}

#[derive(Debug, Deserialize)]
struct ClassifierDocument {
    intercept: f64,
    coefficients: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct EncoderDocument {
    customer_type: Vec<String>,
    region: Vec<String>,
}

impl ModelArtifact {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelArtifactError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let artifact = Self::from_reader(file)?;
        info!(path = %path.display(), "loaded recovery model artifact");
        Ok(artifact)
    }

    /// Parse the JSON artifact: `{"classifier": {"intercept", "coefficients"},
    /// "encoders": {"customer_type": [..], "region": [..]}}`, codes being list positions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelArtifactError> {
        let document: ArtifactDocument = serde_json::from_reader(reader)?;

        let found = document.classifier.coefficients.len();
        let coefficients: [f64; FEATURE_COUNT] = document
            .classifier
            .coefficients
            .try_into()
            .map_err(|_| ModelArtifactError::CoefficientCount { found })?;

        let customer_type =
            CategoryEncoder::from_classes("customer_type", document.encoders.customer_type);
        if customer_type.is_empty() {
            return Err(ModelArtifactError::EmptyEncoder("customer_type"));
        }

        let region = CategoryEncoder::from_classes("region", document.encoders.region);
        if region.is_empty() {
            return Err(ModelArtifactError::EmptyEncoder("region"));
        }

        Ok(Self {
            classifier: LogisticRegression {
                intercept: document.classifier.intercept,
                coefficients,
            },
            customer_type,
            region,
        })
    }
}
