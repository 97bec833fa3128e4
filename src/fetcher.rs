//! Draw fetcher for the dhlottery.co.kr lotto API.
//!
//! The upstream is keyed by draw number and answers with a JSON body whose
//! `returnValue` says whether the draw exists. Absence of a draw and a broken
//! fetch are distinct outcomes: only `NotYetDrawn` means the updater has
//! caught up, while `Failed` means the probe itself went wrong and is logged
//! so operators can tell the two apart.

use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::config::UpstreamConfig;
use crate::store::{DrawRecord, LOTTO_MAX};

/// Default upstream endpoint; the draw number is appended to this URL.
pub const DEFAULT_BASE_URL: &str =
    "https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo=";

/// Outcome of probing one draw number.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The draw exists; here is its normalized record.
    Found(DrawRecord),
    /// The upstream reports the draw has not happened yet.
    NotYetDrawn,
    /// The probe itself failed (network, non-success status, malformed body).
    Failed,
}

/// Source of draw results, keyed by draw number.
///
/// The updater only depends on this seam, so tests can script a source
/// without touching the network.
pub trait DrawSource {
    fn fetch(&self, draw_no: u32) -> impl std::future::Future<Output = FetchOutcome> + Send;
}

/// Raw upstream response shape.
#[derive(Debug, Deserialize)]
struct DrawResponse {
    #[serde(rename = "returnValue")]
    return_value: String,
    #[serde(rename = "drwNo")]
    drw_no: Option<u32>,
    #[serde(rename = "drwNoDate")]
    drw_no_date: Option<String>,
    #[serde(rename = "drwtNo1")]
    drwt_no1: Option<u8>,
    #[serde(rename = "drwtNo2")]
    drwt_no2: Option<u8>,
    #[serde(rename = "drwtNo3")]
    drwt_no3: Option<u8>,
    #[serde(rename = "drwtNo4")]
    drwt_no4: Option<u8>,
    #[serde(rename = "drwtNo5")]
    drwt_no5: Option<u8>,
    #[serde(rename = "drwtNo6")]
    drwt_no6: Option<u8>,
    #[serde(rename = "bnusNo")]
    bnus_no: Option<u8>,
}

impl DrawResponse {
    /// Map a success response into a record; None when a field is missing
    /// or a number falls outside 1..=45.
    fn into_record(self) -> Option<DrawRecord> {
        let record = DrawRecord {
            draw_no: self.drw_no?,
            draw_date: self.drw_no_date?,
            numbers: [
                self.drwt_no1?,
                self.drwt_no2?,
                self.drwt_no3?,
                self.drwt_no4?,
                self.drwt_no5?,
                self.drwt_no6?,
            ],
            bonus: self.bnus_no?,
        };
        let in_range = |n: u8| (1..=LOTTO_MAX).contains(&n);
        if record.numbers.iter().copied().all(in_range) && in_range(record.bonus) {
            Some(record)
        } else {
            None
        }
    }
}

/// HTTP client for the lotto draw API.
pub struct LottoClient {
    client: reqwest::Client,
    base_url: String,
}

impl LottoClient {
    /// Build a client from config, with a fixed per-request timeout (the
    /// upstream specifies none).
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// URL for one draw number.
    pub fn draw_url(&self, draw_no: u32) -> String {
        format!("{}{}", self.base_url, draw_no)
    }
}

impl DrawSource for LottoClient {
    async fn fetch(&self, draw_no: u32) -> FetchOutcome {
        let url = self.draw_url(draw_no);

        let response = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("draw {} fetch failed: {}", draw_no, e);
                return FetchOutcome::Failed;
            }
        };

        if !response.status().is_success() {
            warn!("draw {} fetch returned status {}", draw_no, response.status());
            return FetchOutcome::Failed;
        }

        let body: DrawResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("draw {} response could not be parsed: {}", draw_no, e);
                return FetchOutcome::Failed;
            }
        };

        if body.return_value != "success" {
            return FetchOutcome::NotYetDrawn;
        }

        match body.into_record() {
            Some(record) => FetchOutcome::Found(record),
            None => {
                warn!("draw {} success response is missing fields", draw_no);
                FetchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_url_appends_draw_number() {
        let client = LottoClient::new(&UpstreamConfig::default()).unwrap();
        assert_eq!(
            client.draw_url(1150),
            "https://www.dhlottery.co.kr/common.do?method=getLottoNumber&drwNo=1150"
        );
    }

    #[test]
    fn success_response_maps_to_record() {
        let body: DrawResponse = serde_json::from_str(
            r#"{
                "returnValue": "success",
                "drwNo": 1150,
                "drwNoDate": "2024-12-14",
                "drwtNo1": 8, "drwtNo2": 12, "drwtNo3": 13,
                "drwtNo4": 1, "drwtNo5": 40, "drwtNo6": 45,
                "bnusNo": 33
            }"#,
        )
        .unwrap();
        let record = body.into_record().unwrap();
        assert_eq!(record.draw_no, 1150);
        assert_eq!(record.draw_date, "2024-12-14");
        assert_eq!(record.numbers, [8, 12, 13, 1, 40, 45]);
        assert_eq!(record.bonus, 33);
    }

    #[test]
    fn fail_response_has_no_fields() {
        let body: DrawResponse = serde_json::from_str(r#"{"returnValue": "fail"}"#).unwrap();
        assert_eq!(body.return_value, "fail");
        assert!(body.into_record().is_none());
    }

    #[test]
    fn out_of_range_number_on_success_maps_to_none() {
        let body: DrawResponse = serde_json::from_str(
            r#"{
                "returnValue": "success",
                "drwNo": 1150,
                "drwNoDate": "2024-12-14",
                "drwtNo1": 50, "drwtNo2": 2, "drwtNo3": 3,
                "drwtNo4": 4, "drwtNo5": 5, "drwtNo6": 6,
                "bnusNo": 33
            }"#,
        )
        .unwrap();
        assert!(body.into_record().is_none());
    }

    #[test]
    fn missing_field_on_success_maps_to_none() {
        let body: DrawResponse = serde_json::from_str(
            r#"{
                "returnValue": "success",
                "drwNo": 1150,
                "drwtNo1": 8, "drwtNo2": 12, "drwtNo3": 13,
                "drwtNo4": 1, "drwtNo5": 40, "drwtNo6": 45,
                "bnusNo": 33
            }"#,
        )
        .unwrap();
        assert!(body.into_record().is_none());
    }
}
