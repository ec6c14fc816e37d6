use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ChapterIndex, ChapterName, ChapterRecord, VerseRecord};
use crate::retriever::ChapterSource;

pub const DEFAULT_BASE_URL: &str = "https://api.quran.gading.dev/surah";

/// Envelope code the catalog uses for an authoritative hit.
pub const SUCCESS_CODE: i64 = 200;

#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog responded with HTTP {0}")]
    Status(u16),
    #[error("catalog reported code {code} ({status})")]
    Miss { code: i64, status: String },
    #[error("could not decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog response carried no chapter data")]
    MissingData,
    #[error("cannot build a chapter url from '{0}'")]
    Url(String),
}

impl FetchFailure {
    /// Short classification used when the failure is logged.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Transport(err) if err.is_timeout() => "timeout",
            FetchFailure::Transport(err) if err.is_connect() => "connect",
            FetchFailure::Transport(err) if err.is_decode() => "decode",
            FetchFailure::Transport(_) => "transport",
            FetchFailure::Status(_) => "status",
            FetchFailure::Miss { .. } => "miss",
            FetchFailure::Decode(_) | FetchFailure::MissingData => "decode",
            FetchFailure::Url(_) => "url",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub status: String,
    /// Kept raw so that only a JSON object is taken for chapter data.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

// Every field below is optional on the wire. Missing strings and objects
// become `None` instead of failing the whole response.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChapterPayload {
    pub name: Option<NamePayload>,
    pub number: Option<u32>,
    pub number_of_verses: Option<u32>,
    pub verses: Option<Vec<VersePayload>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamePayload {
    pub long: Option<String>,
    pub short: Option<String>,
    pub translation: Option<LocalizedText>,
    pub transliteration: Option<LocalizedText>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LocalizedText {
    pub id: Option<String>,
    pub en: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VersePayload {
    pub text: Option<VerseTextPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerseTextPayload {
    pub arab: Option<String>,
    pub transliteration: Option<LocalizedText>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<ChapterPayload> for ChapterRecord {
    fn from(payload: ChapterPayload) -> Self {
        let name = payload.name.unwrap_or_default();
        let verses: Vec<VerseRecord> = payload
            .verses
            .unwrap_or_default()
            .into_iter()
            .map(|verse| {
                let text = verse.text.unwrap_or_default();
                VerseRecord {
                    arabic_text: text.arab.unwrap_or_default(),
                    transliterated_text: non_empty(text.transliteration.and_then(|t| t.en)),
                }
            })
            .collect();

        Self {
            number_of_verses: payload
                .number_of_verses
                .unwrap_or(verses.len() as u32),
            name: ChapterName {
                long: name.long.unwrap_or_default(),
                short_name: name.short.unwrap_or_default(),
                translated_name: non_empty(name.translation.and_then(|t| t.id)),
                transliterated_name: non_empty(name.transliteration.and_then(|t| t.id)),
            },
            verses,
        }
    }
}

/// Turns a decoded envelope into a record, applying the envelope code policy.
pub fn record_from_envelope(envelope: Envelope) -> Result<ChapterRecord, FetchFailure> {
    if envelope.code != SUCCESS_CODE {
        return Err(FetchFailure::Miss {
            code: envelope.code,
            status: envelope.status,
        });
    }
    match envelope.data {
        Some(data) if data.is_object() => {
            let payload: ChapterPayload = serde_json::from_value(data)?;
            Ok(ChapterRecord::from(payload))
        }
        _ => Err(FetchFailure::MissingData),
    }
}

/// Blocking client for the chapter catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> eyre::Result<Self> {
        let base_url = Url::parse(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(eyre::eyre!("Catalog url '{}' cannot take a path", base_url));
        }

        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("surah/", env!("CARGO_PKG_VERSION")));
        if matches!(base_url.host_str(), Some("127.0.0.1" | "localhost")) {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn chapter_url(&self, index: ChapterIndex) -> Result<Url, FetchFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchFailure::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&index.to_string());
        Ok(url)
    }

    /// Issues one `GET {base}/{index}` and decodes the envelope.
    ///
    /// Any transport status of 400 or above is a failure; the envelope code
    /// is left for [`record_from_envelope`] to judge.
    pub fn fetch_envelope(&self, index: ChapterIndex) -> Result<Envelope, FetchFailure> {
        let url = self.chapter_url(index)?;
        log::debug!("GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ChapterSource for CatalogClient {
    fn fetch_chapter(&self, index: ChapterIndex) -> Result<ChapterRecord, FetchFailure> {
        record_from_envelope(self.fetch_envelope(index)?)
    }
}
