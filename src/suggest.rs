//! Summary generation: the external natural-language collaborator.
//!
//! The core treats this as a black box: one plain-text prompt in, one
//! plain-text answer out, with a possible transport failure. Extractors
//! never call it; the orchestration layer does, after extraction.

use serde_json::json;
use thiserror::Error;

use crate::analysis::tga::TgaExtraction;
use crate::analysis::Peak;

// ---------------------------------------------------------------------------
// Provider trait + errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("failed to reach the suggestion service: {0}")]
    Connectivity(#[from] reqwest::Error),

    #[error("malformed response from the suggestion service: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// The opaque summary generator: prompt in, text out.
pub trait SuggestionProvider {
    fn suggest(&self, prompt: &str) -> Result<String, SuggestError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Blocking HTTP client for a generative-language endpoint.
pub struct HttpSuggestionProvider {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl HttpSuggestionProvider {
    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key: api_key.into(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, SuggestError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| SuggestError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the base URL (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl SuggestionProvider for HttpSuggestionProvider {
    fn suggest(&self, prompt: &str) -> Result<String, SuggestError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()?
            .error_for_status()?;

        let body: serde_json::Value = response.json()?;
        body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                SuggestError::MalformedResponse("no generated text in response".to_string())
            })
    }
}

// ---------------------------------------------------------------------------
// Prompt builders
// ---------------------------------------------------------------------------

fn peaks_json(peaks: &[Peak]) -> String {
    serde_json::to_string(peaks).unwrap_or_else(|_| "[]".to_string())
}

/// Prompt for an original-vs-modified XRD comparison.
pub fn xrd_prompt(original: &[Peak], modified: &[Peak], explanation: &str, query: &str) -> String {
    format!(
        "Analyze the following XRD data. The original material was modified.\n\
         Original XRD peaks: {}\n\
         Modified XRD peaks: {}\n\
         Modification description: {explanation}\n\
         User's specific query: {query}\n\n\
         Summarize the changes between the original and modified XRD patterns \
         and their materials-science implications (crystallinity, phase \
         transformations, crystallite size).",
        peaks_json(original),
        peaks_json(modified),
    )
}

/// Prompt for an original-vs-modified IR comparison.
pub fn ir_prompt(original: &[Peak], modified: &[Peak], explanation: &str, query: &str) -> String {
    format!(
        "Analyze the following IR data. The original material was modified.\n\
         Original IR peaks: {}\n\
         Modified IR peaks: {}\n\
         Modification description: {explanation}\n\
         User's specific query: {query}\n\n\
         Summarize the changes between the original and modified IR spectra \
         and their materials-science implications (functional groups, bonding).",
        peaks_json(original),
        peaks_json(modified),
    )
}

/// Prompt for an original-vs-modified surface-area comparison. Either side
/// may be absent.
pub fn bet_prompt(
    original_area: Option<f64>,
    modified_area: Option<f64>,
    explanation: &str,
    query: &str,
) -> String {
    let fmt_area = |area: Option<f64>| match area {
        Some(a) => format!("{a} m²/g"),
        None => "not provided".to_string(),
    };
    format!(
        "Analyze the following BET data. The original material was modified.\n\
         Original BET surface area: {}\n\
         Modified BET surface area: {}\n\
         Modification description: {explanation}\n\
         User's specific query: {query}\n\n\
         Summarize the changes in surface area and pore structure and their \
         materials-science implications.",
        fmt_area(original_area),
        fmt_area(modified_area),
    )
}

/// Prompt for a TGA interpretation.
pub fn tga_prompt(tga: &TgaExtraction, query: &str) -> String {
    let capacity = serde_json::to_string(&tga.adsorption_capacity).unwrap_or_default();
    let energy = serde_json::to_string(&tga.desorption_energy).unwrap_or_default();
    format!(
        "Analyze the following TGA results:\n\
         Adsorption capacity (mmol/g): {capacity}\n\
         Desorption energy consumption (kJ/mol): {energy}\n\
         User's specific query: {query}\n\n\
         Interpret these values: discuss the relationship between adsorption \
         capacity and desorption energy and what it suggests about the \
         material's properties and performance."
    )
}

/// Inputs for a combined, multi-technique prompt. Only the sections
/// actually provided appear in the prompt.
#[derive(Debug, Default)]
pub struct CombinedInputs<'a> {
    pub original_xrd: Option<&'a [Peak]>,
    pub modified_xrd: Option<&'a [Peak]>,
    pub original_ir: Option<&'a [Peak]>,
    pub modified_ir: Option<&'a [Peak]>,
    pub original_surface_area: Option<f64>,
    pub modified_surface_area: Option<f64>,
    pub tga: Option<&'a TgaExtraction>,
}

/// Prompt covering whichever techniques were provided.
pub fn combined_prompt(inputs: &CombinedInputs<'_>, query: &str) -> String {
    let mut prompt = String::from("Analyze the following combined materials data. ");

    if let Some(area) = inputs.original_surface_area {
        prompt.push_str(&format!("Original BET surface area: {area} m²/g. "));
    }
    if let Some(area) = inputs.modified_surface_area {
        prompt.push_str(&format!("Modified BET surface area: {area} m²/g. "));
    }
    if inputs.original_xrd.is_some() || inputs.modified_xrd.is_some() {
        prompt.push_str(&format!(
            "Original XRD peaks: {}. Modified XRD peaks: {}. ",
            peaks_json(inputs.original_xrd.unwrap_or_default()),
            peaks_json(inputs.modified_xrd.unwrap_or_default()),
        ));
    }
    if inputs.original_ir.is_some() || inputs.modified_ir.is_some() {
        prompt.push_str(&format!(
            "Original IR peaks: {}. Modified IR peaks: {}. ",
            peaks_json(inputs.original_ir.unwrap_or_default()),
            peaks_json(inputs.modified_ir.unwrap_or_default()),
        ));
    }
    if let Some(tga) = inputs.tga {
        let results = serde_json::to_string(tga).unwrap_or_default();
        prompt.push_str(&format!("TGA results: {results}. "));
    }

    prompt.push_str(&format!("User's specific query: {query}"));
    prompt
}

/// Prompt for a follow-up question over a previous analysis.
pub fn followup_prompt(previous: &serde_json::Value, query: &str) -> String {
    format!(
        "Based on the previous analysis:\n\
         Previous analysis results: {previous}\n\
         Answer the following follow-up question:\n{query}"
    )
}
