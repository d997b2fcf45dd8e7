//! ValuationFacade: the single integration point around the pure engines
//!
//! estimate_for: normalize → baseline → (remote score, if configured)
//! judge_for:    validate price → estimate → local judge → (remote judgment)
//! judge_estimate: same as judge_for, against a valuation the caller already has
//!
//! Remote calls are bounded by a timeout. Any failure degrades to the
//! baseline result and is logged, never surfaced.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, EngineProfile};
use crate::core::judge::validate_listed_price;
use crate::core::scoring::{HttpScoringClient, RemoteScore, ScoringBackend};
use crate::core::{BaselineValuator, FeatureCodec, JudgeBands, PriceJudge};
use crate::error::{ScoringError, ValuationError};
use crate::types::{CanonicalFeatures, Judgment, RawInput, ScoringPayload, Valuation, ValuationSource};
use crate::DEFAULT_SCORING_TIMEOUT_MS;

/// Orchestrates codec, valuator, judge and the optional remote model
#[derive(Clone)]
pub struct ValuationFacade {
    codec: FeatureCodec,
    valuator: BaselineValuator,
    judge: PriceJudge,
    profile: EngineProfile,
    backend: Option<Arc<dyn ScoringBackend>>,
    timeout: Duration,
}

impl Default for ValuationFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValuationFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValuationFacade")
            .field("profile", &self.profile)
            .field("bands", self.judge.bands())
            .field("backend", &self.backend_description())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ValuationFacade {
    /// Baseline-only facade with the default profile and bands
    pub fn new() -> Self {
        Self {
            codec: FeatureCodec::new(),
            valuator: BaselineValuator::new(),
            judge: PriceJudge::new(),
            profile: EngineProfile::default(),
            backend: None,
            timeout: Duration::from_millis(DEFAULT_SCORING_TIMEOUT_MS),
        }
    }

    /// Facade wired from configuration, with an HTTP backend when a
    /// scoring base URL is configured
    pub fn from_config(config: &EngineConfig) -> Result<Self, ScoringError> {
        let mut facade = Self::new()
            .with_profile(config.profile)
            .with_bands(config.bands)
            .with_timeout(config.scoring.timeout());
        if let Some(client) = HttpScoringClient::from_config(&config.scoring)? {
            facade = facade.with_backend(Arc::new(client));
        }
        Ok(facade)
    }

    pub fn with_profile(mut self, profile: EngineProfile) -> Self {
        self.profile = profile;
        self.codec = FeatureCodec::with_profile(profile);
        self
    }

    pub fn with_bands(mut self, bands: JudgeBands) -> Self {
        self.judge = PriceJudge::with_bands(bands);
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn ScoringBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profile(&self) -> EngineProfile {
        self.profile
    }

    pub fn backend_description(&self) -> Option<String> {
        self.backend.as_ref().map(|b| b.describe())
    }

    /// Normalize only
    pub fn normalize(&self, raw: &RawInput) -> CanonicalFeatures {
        self.codec.normalize(raw)
    }

    /// Local baseline only, no remote call
    pub fn baseline(&self, features: &CanonicalFeatures) -> Valuation {
        self.valuator.estimate(features)
    }

    /// Local bands only, no remote call
    pub fn judge_valuation(&self, listed_price: f64, valuation: &Valuation) -> Result<Judgment, ValuationError> {
        if !self.profile.judgment {
            return Err(ValuationError::JudgmentDisabled);
        }
        self.judge.judge(listed_price, valuation)
    }

    /// Estimate a property's value, preferring the remote model
    pub async fn estimate_for(&self, raw: &RawInput) -> Valuation {
        let features = self.codec.normalize(raw);
        self.estimate_features(&features).await
    }

    /// Estimate from already-normalized features
    pub async fn estimate_features(&self, features: &CanonicalFeatures) -> Valuation {
        let baseline = self.valuator.estimate(features);

        let Some(backend) = &self.backend else {
            return baseline;
        };

        let payload = ScoringPayload::from(features);
        match timeout(self.timeout, backend.score(&payload)).await {
            Ok(Ok(score)) if !(score.predicted_price.is_finite() && score.predicted_price > 0.0) => {
                warn!(remote = score.predicted_price, "remote score is not a positive price, using baseline");
                baseline
            }
            Ok(Ok(score)) => {
                debug!(
                    remote = score.predicted_price,
                    baseline = baseline.estimate,
                    "remote score received"
                );
                merge_remote(baseline, score)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "remote scoring failed, using baseline");
                baseline
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "remote scoring timed out, using baseline");
                baseline
            }
        }
    }

    /// Judge a listed price for the property described by `raw`
    pub async fn judge_for(&self, raw: &RawInput, listed_price: f64) -> Result<Judgment, ValuationError> {
        if !self.profile.judgment {
            return Err(ValuationError::JudgmentDisabled);
        }
        let listed_price = validate_listed_price(listed_price)?;

        let features = self.codec.normalize(raw);
        let valuation = self.estimate_features(&features).await;
        self.judge_features(&features, listed_price, &valuation).await
    }

    /// Judge a listed price against a valuation already obtained from
    /// `estimate_for` on the same form. No second score is requested; the
    /// remote judgment is still consulted.
    pub async fn judge_estimate(
        &self,
        raw: &RawInput,
        listed_price: f64,
        valuation: &Valuation,
    ) -> Result<Judgment, ValuationError> {
        if !self.profile.judgment {
            return Err(ValuationError::JudgmentDisabled);
        }
        let listed_price = validate_listed_price(listed_price)?;

        let features = self.codec.normalize(raw);
        self.judge_features(&features, listed_price, valuation).await
    }

    async fn judge_features(
        &self,
        features: &CanonicalFeatures,
        listed_price: f64,
        valuation: &Valuation,
    ) -> Result<Judgment, ValuationError> {
        let mut judgment = self.judge.judge(listed_price, valuation)?;

        if let Some(backend) = &self.backend {
            let payload = ScoringPayload::from(features);
            match timeout(self.timeout, backend.judge(&payload, listed_price)).await {
                Ok(Some(Ok(category))) => {
                    if category != judgment.category {
                        info!(local = %judgment.category, remote = %category, "remote judgment differs from local bands");
                    }
                    judgment.category = category;
                    judgment.source = ValuationSource::Remote;
                }
                Ok(Some(Err(err))) => {
                    warn!(error = %err, "remote judgment failed, using local bands");
                }
                Ok(None) => {}
                Err(_) => {
                    warn!(timeout_ms = self.timeout.as_millis() as u64, "remote judgment timed out, using local bands");
                }
            }
        }

        Ok(judgment)
    }
}

/// Remote estimate wins; its breakdown replaces ours only when it sent one
fn merge_remote(baseline: Valuation, score: RemoteScore) -> Valuation {
    let factors = if score.factors.is_empty() {
        baseline.factors
    } else {
        score.factors
    };
    Valuation {
        estimate: score.predicted_price,
        factors,
        source: ValuationSource::Remote,
        low_confidence: baseline.low_confidence,
    }
}

// =============================================================================
// TESTS
// =============================================================================
