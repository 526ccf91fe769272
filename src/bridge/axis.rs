use crate::bridge::snapshot::AxisLabels;
use crate::foundation::core::SceneDim;
use crate::foundation::error::{KindredError, KindredResult};
use crate::projection::bounds::StableBounds;

/// Axis relabel request as sent to the projection collaborator. The
/// response is an acknowledgment only; recomputed coordinates arrive with
/// the next pulled snapshot.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WireAxisRequest {
    /// Negative-direction concept for the first axis.
    pub x_negative: String,
    /// Positive-direction concept for the first axis.
    pub x_positive: String,
    /// Negative-direction concept for the second axis.
    pub y_negative: String,
    /// Positive-direction concept for the second axis.
    pub y_positive: String,
    /// Negative-direction concept for the third axis, spatial scenes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_negative: Option<String>,
    /// Positive-direction concept for the third axis, spatial scenes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_positive: Option<String>,
}

/// Entry point of the two-step axis-change commit.
///
/// Changing the semantic axes redistributes every coordinate, so the
/// protocol is strict: bounds are invalidated *before* the request leaves,
/// and recomputed coordinates may only be applied through the returned
/// [`PendingAxisChange`] token. Committing coordinates against bounds
/// frozen for the old distribution renders the scene scaled wrong.
#[derive(Debug)]
pub struct AxisChange;

impl AxisChange {
    /// Validate the requested labels and invalidate the frozen bounds.
    ///
    /// Both halves of every axis pair must be non-blank, and a `z` pair is
    /// required exactly when the scene is spatial. Validation failures
    /// leave the bounds untouched.
    pub fn begin(
        labels: &AxisLabels,
        dim: SceneDim,
        bounds: &mut StableBounds,
    ) -> KindredResult<PendingAxisChange> {
        validate_pair("x", &labels.x)?;
        validate_pair("y", &labels.y)?;
        match (dim, &labels.z) {
            (SceneDim::Planar, Some(_)) => {
                return Err(KindredError::validation(
                    "z axis labels are not valid for a planar canvas",
                ));
            }
            (SceneDim::Spatial, None) => {
                return Err(KindredError::validation(
                    "a spatial canvas requires z axis labels",
                ));
            }
            (_, z) => {
                if let Some(pair) = z {
                    validate_pair("z", pair)?;
                }
            }
        }

        bounds.invalidate();

        let request = WireAxisRequest {
            x_negative: labels.x.0.clone(),
            x_positive: labels.x.1.clone(),
            y_negative: labels.y.0.clone(),
            y_positive: labels.y.1.clone(),
            z_negative: labels.z.as_ref().map(|z| z.0.clone()),
            z_positive: labels.z.as_ref().map(|z| z.1.clone()),
        };
        Ok(PendingAxisChange {
            labels: labels.clone(),
            request,
        })
    }
}

fn validate_pair(axis: &str, pair: &(String, String)) -> KindredResult<()> {
    if pair.0.trim().is_empty() || pair.1.trim().is_empty() {
        return Err(KindredError::validation(format!(
            "both {axis} axis labels must be non-empty"
        )));
    }
    Ok(())
}

/// Proof that bounds were invalidated for an in-flight axis change.
///
/// The token carries the outgoing request and the labels to adopt once the
/// recomputed snapshot is committed through the engine.
#[derive(Debug)]
#[must_use = "an axis change must be committed (or dropped to abandon it)"]
pub struct PendingAxisChange {
    labels: AxisLabels,
    request: WireAxisRequest,
}

impl PendingAxisChange {
    /// The request to send to the collaborator.
    pub fn request(&self) -> &WireAxisRequest {
        &self.request
    }

    /// The labels this change will install on commit.
    pub fn labels(&self) -> &AxisLabels {
        &self.labels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/axis.rs"]
mod tests;
