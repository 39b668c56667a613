//! AI-assisted pet descriptions.
//!
//! The text generator itself is an opaque remote: it can be asked whether it is
//! up and asked for a description. [`DescriptionAssistant`] wraps it with the
//! state a form needs (generating flag, last result, last error).

use crate::error::{AdoptaError, Result};
use crate::model::Pet;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

const DEFAULT_PERSONALITY: &str = "Affectionate and sociable";
const DEFAULT_HEALTH: &str = "In excellent health";
const DEFAULT_BREED: &str = "Mixed breed";

/// What the generator is told about a pet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionRequest {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub gender: String,
    pub personality: String,
    pub health: String,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_description: Option<String>,
}

impl DescriptionRequest {
    /// Build a request from a listing, using `current` (the text already in the
    /// form, if any) as the personality hint.
    pub fn from_pet(pet: &Pet, current: Option<&str>) -> Self {
        let current = current.map(str::trim).filter(|c| !c.is_empty());
        let species = pet.species.clone().unwrap_or_default();
        let gender = pet.gender.clone().unwrap_or_default();
        let pronoun = if is_male(&gender) { "He" } else { "She" };
        let city = pet.city.as_deref().unwrap_or("an unknown city");

        Self {
            name: pet.name.clone(),
            breed: pet
                .breed
                .clone()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BREED.to_string()),
            personality: current.unwrap_or(DEFAULT_PERSONALITY).to_string(),
            health: DEFAULT_HEALTH.to_string(),
            notes: format!("{} is a {} located in {}", pronoun, species.to_lowercase(), city),
            current_description: current.map(str::to_string),
            species,
            gender,
        }
    }
}

fn is_male(gender: &str) -> bool {
    matches!(gender.trim().to_lowercase().as_str(), "macho" | "male" | "m")
}

/// The opaque text-generation backend.
#[async_trait]
pub trait DescriptionService: Send + Sync {
    /// Health check. Any failure means unavailable.
    async fn is_available(&self) -> Result<bool>;

    async fn generate(&self, request: &DescriptionRequest) -> Result<String>;
}

#[derive(Debug, Default)]
struct AssistantState {
    generating: bool,
    last_description: Option<String>,
    error: Option<String>,
}

pub struct DescriptionAssistant {
    service: Arc<dyn DescriptionService>,
    state: Mutex<AssistantState>,
}

impl DescriptionAssistant {
    pub fn new(service: Arc<dyn DescriptionService>) -> Self {
        Self {
            service,
            state: Mutex::new(AssistantState::default()),
        }
    }

    /// Generate a description. `None` on failure, with the reason in [`Self::error`].
    pub async fn generate(&self, request: &DescriptionRequest) -> Option<String> {
        if request.name.trim().is_empty() {
            self.state.lock().error = Some("A pet name is required to generate a description".into());
            return None;
        }

        let _generating = Generating::start(&self.state);
        let result = match self.service.generate(request).await {
            Ok(text) if text.trim().is_empty() => Err(AdoptaError::Description(
                "service returned an empty description".into(),
            )),
            other => other,
        };

        let mut state = self.state.lock();
        match result {
            Ok(text) => {
                debug!(pet = %request.name, chars = text.len(), "description generated");
                state.last_description = Some(text.clone());
                Some(text)
            }
            Err(e) => {
                warn!(pet = %request.name, error = %e, "description generation failed");
                state.error = Some(e.to_string());
                None
            }
        }
    }

    /// Whether the service answers its health check.
    pub async fn check_service(&self) -> bool {
        match self.service.is_available().await {
            Ok(up) => up,
            Err(e) => {
                warn!(error = %e, "description service health check failed");
                false
            }
        }
    }

    pub fn is_generating(&self) -> bool {
        self.state.lock().generating
    }

    pub fn last_description(&self) -> Option<String> {
        self.state.lock().last_description.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().error = None;
    }
}

/// Holds the generating flag up for the duration of one call.
struct Generating<'a>(&'a Mutex<AssistantState>);

impl<'a> Generating<'a> {
    fn start(state: &'a Mutex<AssistantState>) -> Self {
        let mut s = state.lock();
        s.generating = true;
        s.error = None;
        drop(s);
        Self(state)
    }
}

impl Drop for Generating<'_> {
    fn drop(&mut self) {
        self.0.lock().generating = false;
    }
}
