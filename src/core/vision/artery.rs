use serde::{Deserialize, Serialize};
use std::fmt;

/// Coronary segment guessed from image position alone. Not anatomy-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArteryLabel {
    #[serde(rename = "LAD")]
    Lad,
    #[serde(rename = "LCx")]
    Lcx,
    #[serde(rename = "RCA")]
    Rca,
}

impl ArteryLabel {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ArteryLabel::Lad => "LAD",
            ArteryLabel::Lcx => "LCx",
            ArteryLabel::Rca => "RCA",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            ArteryLabel::Lad => "Left Anterior Descending (LAD)",
            ArteryLabel::Lcx => "Left Circumflex (LCx)",
            ArteryLabel::Rca => "Right Coronary Artery (RCA)",
        }
    }
}

impl fmt::Display for ArteryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Top third → LAD, middle third → LCx, bottom third → RCA.
///
/// Band edges are `height / 3` and `2 * height / 3` (integer division) and
/// belong to the lower band. The x coordinate is ignored.
pub fn recognize_artery(point: (u32, u32), height: u32) -> ArteryLabel {
    let (_x, y) = point;
    let y = y as u64;
    let height = height as u64;

    if y < height / 3 {
        ArteryLabel::Lad
    } else if y < 2 * height / 3 {
        ArteryLabel::Lcx
    } else {
        ArteryLabel::Rca
    }
}

/// Label for the frame midpoint `(width / 2, height / 2)`.
pub fn recognize_midpoint(width: u32, height: u32) -> ArteryLabel {
    recognize_artery((width / 2, height / 2), height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        // h = 100: edges at 33 and 66
        assert_eq!(recognize_artery((0, 0), 100), ArteryLabel::Lad);
        assert_eq!(recognize_artery((0, 32), 100), ArteryLabel::Lad);
        assert_eq!(recognize_artery((0, 33), 100), ArteryLabel::Lcx);
        assert_eq!(recognize_artery((0, 65), 100), ArteryLabel::Lcx);
        assert_eq!(recognize_artery((0, 66), 100), ArteryLabel::Rca);
        assert_eq!(recognize_artery((0, 99), 100), ArteryLabel::Rca);
    }

    #[test]
    fn test_bands_are_contiguous_and_ordered() {
        for height in 1..200u32 {
            let labels: Vec<ArteryLabel> =
                (0..height).map(|y| recognize_artery((0, y), height)).collect();
            let rank = |label: &ArteryLabel| match label {
                ArteryLabel::Lad => 0,
                ArteryLabel::Lcx => 1,
                ArteryLabel::Rca => 2,
            };
            assert!(
                labels.windows(2).all(|w| rank(&w[0]) <= rank(&w[1])),
                "bands out of order for height {}",
                height
            );
            assert_eq!(*labels.last().unwrap(), ArteryLabel::Rca);
        }
    }

    #[test]
    fn test_horizontal_position_ignored() {
        for x in [0, 1, 50, 10_000, u32::MAX] {
            assert_eq!(recognize_artery((x, 10), 90), ArteryLabel::Lad);
        }
    }

    #[test]
    fn test_midpoint_of_square_frame_is_lcx() {
        assert_eq!(recognize_midpoint(100, 100), ArteryLabel::Lcx);
        assert_eq!(recognize_midpoint(640, 480), ArteryLabel::Lcx);
    }

    #[test]
    fn test_display_uses_full_name() {
        assert_eq!(ArteryLabel::Rca.to_string(), "Right Coronary Artery (RCA)");
        assert_eq!(ArteryLabel::Lcx.abbreviation(), "LCx");
    }
}
