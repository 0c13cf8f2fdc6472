use std::{io::Cursor, time::Duration};

use anyhow::{anyhow, Context};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::{imageops::FilterType, ImageFormat};
use serde::{Deserialize, Serialize};

use cleanspot_core::{
    entities::{Verdict, VerdictResult},
    gateways::judge::{JudgeRequest, JudgeUnavailable, VerificationJudge},
};

/// Longest image edge sent to the judge. Uploads can be arbitrarily
/// large; the request payload must not be.
const DEFAULT_MAX_IMAGE_EDGE: u32 = 1024;

const DEFAULT_MAX_TOKENS: u32 = 300;

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Chat-completions style endpoint of the vision backend.
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub max_image_edge: u32,
}

/// Client for an OpenAI-compatible vision backend that compares a
/// before/after photo pair.
///
/// Network and timeout failures surface as [`JudgeUnavailable`]; a
/// reply that does not conform to the expected JSON object fails closed
/// to a rejected verdict and is never mistaken for an approval.
pub struct HttpJudge {
    config: JudgeConfig,
    client: reqwest::blocking::Client,
}

impl HttpJudge {
    pub fn new(config: JudgeConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// Re-encodes an image as JPEG, downsampling it until the longest
    /// edge fits the configured bound.
    fn normalize_image(&self, bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
        let max_edge = self.config.max_image_edge;
        let img = image::load_from_memory(bytes).context("Failed to decode image")?;
        let img = if img.width().max(img.height()) > max_edge {
            img.resize(max_edge, max_edge, FilterType::Triangle)
        } else {
            img
        };
        let mut out = Cursor::new(Vec::new());
        img.to_rgb8()
            .write_to(&mut out, ImageFormat::Jpeg)
            .context("Failed to encode image")?;
        Ok(out.into_inner())
    }
}

impl VerificationJudge for HttpJudge {
    fn judge(&self, request: &JudgeRequest) -> Result<Verdict, JudgeUnavailable> {
        let before = self.normalize_image(&request.before_image)?;
        let after = self.normalize_image(&request.after_image)?;

        let chat_request = ChatRequest {
            model: &self.config.model,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            response_format: ResponseFormat { kind: "json_object" },
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::text(verification_prompt(&request.location_hint)),
                    ContentPart::image(&before),
                    ContentPart::image(&after),
                ],
            }],
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&chat_request)
            .send()
            .context("Judge request failed")?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Judge responded with status {status}").into());
        }
        let body = response.text().context("Failed to read judge response")?;

        // Anything non-conforming from here on is a parse failure and
        // fails closed, never open.
        let Ok(envelope) = serde_json::from_str::<ChatResponse>(&body) else {
            log::warn!("Judge reply envelope did not parse");
            return Ok(rejected_verdict(
                "Judge reply did not conform to the expected schema",
                body,
            ));
        };
        let content = envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        Ok(parse_verdict_content(&content))
    }
}

/// Deterministic, schema-constrained prompt for one photo comparison.
fn verification_prompt(location_hint: &str) -> String {
    format!(
        "You are a pragmatic environmental inspector. Compare the two \
         attached photos of the same littered location. The first photo \
         shows the spot before cleanup, the second one after. Street \
         cleanups are never perfect; judge whether a genuine cleanup \
         effort visibly improved the spot.\n\
         Location: {location_hint}\n\n\
         Answer with a single JSON object with exactly these fields:\n\
         {{\n\
           \"result\": \"APPROVED\" or \"REJECTED\",\n\
           \"confidence\": a number between 0.0 and 1.0,\n\
           \"reason\": a short explanation\n\
         }}\n\n\
         APPROVED when the major litter is gone, a cleanup effort is \
         clearly visible or the spot noticeably improved. Natural debris \
         such as leaves or soil and minor remaining litter are \
         acceptable.\n\
         REJECTED when most of the litter remains, no effort is \
         recognizable, the photos are unclear or unrelated, or there is \
         no difference between them."
    )
}

/// Parses the message content of a judge reply.
///
/// Tolerates a fenced ```json code block around the object. Any other
/// deviation from the contract yields a rejected verdict with the raw
/// content preserved.
pub fn parse_verdict_content(content: &str) -> Verdict {
    let trimmed = strip_code_fence(content);
    let parsed: Result<RawVerdict, _> = serde_json::from_str(trimmed);
    let Ok(raw_verdict) = parsed else {
        log::warn!("Judge verdict did not parse as JSON");
        return rejected_verdict(
            "Judge reply did not conform to the expected schema",
            content.to_owned(),
        );
    };
    let Ok(result) = raw_verdict.result.parse::<VerdictResult>() else {
        log::warn!("Judge verdict result is neither APPROVED nor REJECTED");
        return rejected_verdict("Judge reply contained an unknown result", content.to_owned());
    };
    let confidence = raw_verdict
        .confidence
        .filter(|c| (0.0..=1.0).contains(c));
    Verdict {
        result,
        confidence,
        reason: raw_verdict.reason.unwrap_or_default(),
        raw: content.to_owned(),
    }
}

fn rejected_verdict(reason: &str, raw: String) -> Verdict {
    Verdict {
        result: VerdictResult::Rejected,
        confidence: None,
        reason: reason.to_owned(),
        raw,
    }
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart>,
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    fn text(text: String) -> Self {
        Self::Text { text }
    }

    fn image(jpeg_bytes: &[u8]) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg_bytes)),
            },
        }
    }
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct RawVerdict {
    result: String,
    confidence: Option<f64>,
    reason: Option<String>,
}
