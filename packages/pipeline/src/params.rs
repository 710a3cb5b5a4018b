//! Run parameters parsed from free-text input.

use candidate_finder_candidate_models::Coordinates;

use crate::PipelineError;

/// A validated target point and search radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParameters {
    /// The point distances are measured from.
    pub target: Coordinates,
    /// Maximum distance in miles. Always positive and finite.
    pub max_miles: f64,
}

impl RunParameters {
    /// Validates a target and radius.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameters`] if the coordinates are
    /// out of range or `max_miles` is not a positive finite number.
    pub fn new(latitude: f64, longitude: f64, max_miles: f64) -> Result<Self, PipelineError> {
        let target = Coordinates::new(latitude, longitude)
            .map_err(|e| PipelineError::invalid_parameters(e.to_string()))?;

        if !max_miles.is_finite() || max_miles <= 0.0 {
            return Err(PipelineError::invalid_parameters(
                "Please enter a valid distance in miles",
            ));
        }

        Ok(Self { target, max_miles })
    }

    /// Parses `"<lat>, <lon>"` and a distance in miles.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidParameters`] if either input is
    /// empty, the target is not exactly two comma-separated decimals, or the
    /// values fail [`Self::new`].
    pub fn parse(target: &str, max_miles: &str) -> Result<Self, PipelineError> {
        let target = target.trim();
        let max_miles = max_miles.trim();

        if target.is_empty() || max_miles.is_empty() {
            return Err(PipelineError::invalid_parameters(
                "Please enter both target coordinates and maximum distance",
            ));
        }

        let parts: Vec<&str> = target.split(',').map(str::trim).collect();
        let [lat, lon] = parts.as_slice() else {
            return Err(coordinates_format_error());
        };
        let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
            return Err(coordinates_format_error());
        };

        let max_miles = max_miles
            .parse::<f64>()
            .map_err(|_| {
                PipelineError::invalid_parameters("Please enter a valid distance in miles")
            })?;

        Self::new(lat, lon, max_miles)
    }
}

fn coordinates_format_error() -> PipelineError {
    PipelineError::invalid_parameters("Please enter coordinates in \"latitude, longitude\" format")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_and_distance() {
        let params = RunParameters::parse(" 40.7128, -74.0060 ", "50").unwrap();
        assert!((params.target.latitude - 40.7128).abs() < f64::EPSILON);
        assert!((params.target.longitude + 74.006).abs() < f64::EPSILON);
        assert!((params.max_miles - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_no_space_after_comma() {
        assert!(RunParameters::parse("42.36,-71.06", "12.5").is_ok());
    }

    #[test]
    fn rejects_empty_inputs() {
        assert!(matches!(
            RunParameters::parse("", "50"),
            Err(PipelineError::InvalidParameters { .. })
        ));
        assert!(matches!(
            RunParameters::parse("42.36, -71.06", "  "),
            Err(PipelineError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn rejects_malformed_target() {
        for target in ["42.36", "42.36, -71.06, 5", "north, west", "42.36; -71.06"] {
            assert!(
                matches!(
                    RunParameters::parse(target, "50"),
                    Err(PipelineError::InvalidParameters { .. })
                ),
                "accepted {target}"
            );
        }
    }

    #[test]
    fn rejects_non_positive_or_unparseable_distance() {
        for distance in ["0", "-5", "ten", "NaN", "inf"] {
            assert!(
                matches!(
                    RunParameters::parse("42.36, -71.06", distance),
                    Err(PipelineError::InvalidParameters { .. })
                ),
                "accepted {distance}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_target() {
        assert!(RunParameters::parse("91, 0", "50").is_err());
        assert!(RunParameters::parse("0, 181", "50").is_err());
    }
}
