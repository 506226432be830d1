//! Sequential batch rendering with per-guest reporting.
//!
//! The batch contract is best-effort, not all-or-nothing: one guest's
//! failure is captured into that guest's report entry and iteration
//! continues. Any concurrency belongs to the external dispatch layer; this
//! driver is deliberately sequential.

use serde::Serialize;
use tracing::{debug, warn};

use crate::artifact;
use crate::card::{CardRenderer, RenderResult};
use crate::input::{EventRenderInput, GuestRenderInput};

/// Renders one guest's artifacts.
///
/// [`CardRenderer`] is the production implementation; the trait seam lets
/// tests and alternative backends inject per-guest outcomes.
pub trait RenderCards {
    fn generate(&self, event: &EventRenderInput, guest: &GuestRenderInput) -> RenderResult;
}

impl RenderCards for CardRenderer {
    fn generate(&self, event: &EventRenderInput, guest: &GuestRenderInput) -> RenderResult {
        CardRenderer::generate(self, event, guest)
    }
}

/// Outcome class of one guest's render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    Success,
    /// The renderer reported a controlled failure with detail.
    Failed,
    /// The renderer failed without any detail; treated as unexpected.
    Error,
}

/// Per-guest entry of a batch report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestReport {
    pub guest_name: String,
    pub status: GuestStatus,
    /// Failure detail; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Card bytes for the storage collaborator; not part of the wire report.
    #[serde(skip)]
    pub card_png: Option<Vec<u8>>,
    #[serde(skip)]
    pub qr_png: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_filename: Option<String>,
}

/// Aggregated outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<GuestReport>,
}

/// Drives card generation over a guest collection.
pub struct BatchRenderer<R: RenderCards> {
    renderer: R,
}

impl<R: RenderCards> BatchRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Renders every guest in order. The call itself always succeeds;
    /// individual entries carry their own failure detail.
    pub fn render_all(&self, event: &EventRenderInput, guests: &[GuestRenderInput]) -> BatchReport {
        let mut results = Vec::with_capacity(guests.len());
        let mut succeeded = 0;

        for guest in guests {
            let result = self.renderer.generate(event, guest);
            let status = if result.success {
                GuestStatus::Success
            } else if result.error.is_some() {
                GuestStatus::Failed
            } else {
                GuestStatus::Error
            };
            match status {
                GuestStatus::Success => {
                    succeeded += 1;
                    debug!(guest = %guest.full_name, "card generated");
                }
                _ => {
                    warn!(
                        guest = %guest.full_name,
                        detail = result.error.as_deref().unwrap_or("no detail"),
                        "card generation failed"
                    );
                }
            }
            let has_card = result.card_png.is_some();
            let has_qr = result.qr_png.is_some();
            results.push(GuestReport {
                guest_name: guest.full_name.clone(),
                status,
                detail: result.error,
                card_png: result.card_png,
                qr_png: result.qr_png,
                card_filename: has_card
                    .then(|| artifact::card_filename(event.id, guest.id, &guest.full_name)),
                qr_filename: has_qr.then(|| artifact::qr_filename(guest.id)),
            });
        }

        BatchReport {
            total: guests.len(),
            succeeded,
            failed: guests.len() - succeeded,
            results,
        }
    }
}
