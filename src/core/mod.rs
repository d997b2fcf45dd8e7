//! Core modules for the valuation engine

pub mod codec;
pub mod valuator;
pub mod judge;
pub mod scoring;
pub mod facade;
pub mod presentation;
pub mod api;

pub use codec::FeatureCodec;
pub use valuator::{age_discount, BaselineValuator};
pub use judge::{parse_listed_price, validate_listed_price, JudgeBands, PriceJudge};
pub use scoring::{HttpScoringClient, RemoteScore, ScoringBackend};
pub use facade::ValuationFacade;
pub use api::{create_router, run_server};
