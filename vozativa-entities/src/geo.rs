use std::fmt;

/// Geographical position in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    /// Returns `None` if either coordinate is out of range or not finite.
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }

    pub const fn lat_deg(&self) -> f64 {
        self.lat
    }

    pub const fn lng_deg(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_coordinates_in_range() {
        assert!(MapPoint::try_from_lat_lng_deg(-23.5505, -46.6333).is_some());
        assert!(MapPoint::try_from_lat_lng_deg(90.0, 180.0).is_some());
    }

    #[test]
    fn reject_coordinates_out_of_range() {
        assert!(MapPoint::try_from_lat_lng_deg(-90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, 180.1).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
    }
}
