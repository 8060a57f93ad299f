use serde::{Deserialize, Serialize};

use super::StarColumn;

/// Imaging parameters broadcast to every particle row. A `None` field is
/// left out of the output schema entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionMetadata {
    pub voltage: Option<f64>,
    pub defocus_u: Option<f64>,
    pub defocus_v: Option<f64>,
    pub defocus_angle: Option<f64>,
    pub spherical_aberration: Option<f64>,
    pub amplitude_contrast: Option<f64>,
    pub detector_pixel_size: Option<f64>,
    pub magnification: Option<f64>,
}

impl AcquisitionMetadata {
    /// Present values paired with their column, in output order.
    pub fn columns(&self) -> Vec<(StarColumn, f64)> {
        [
            (StarColumn::Voltage, self.voltage),
            (StarColumn::DefocusU, self.defocus_u),
            (StarColumn::DefocusV, self.defocus_v),
            (StarColumn::DefocusAngle, self.defocus_angle),
            (StarColumn::SphericalAberration, self.spherical_aberration),
            (StarColumn::AmplitudeContrast, self.amplitude_contrast),
            (StarColumn::DetectorPixelSize, self.detector_pixel_size),
            (StarColumn::Magnification, self.magnification),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, v)))
        .collect()
    }

    /// Drop negative values, which older tooling used to mean "not set".
    pub fn without_negatives(self) -> Self {
        let keep = |v: Option<f64>| v.filter(|v| *v >= 0.0);
        Self {
            voltage: keep(self.voltage),
            defocus_u: keep(self.defocus_u),
            defocus_v: keep(self.defocus_v),
            defocus_angle: keep(self.defocus_angle),
            spherical_aberration: keep(self.spherical_aberration),
            amplitude_contrast: keep(self.amplitude_contrast),
            detector_pixel_size: keep(self.detector_pixel_size),
            magnification: keep(self.magnification),
        }
    }
}
