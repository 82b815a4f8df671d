use super::SourceProperties;

impl SourceProperties {
    /// Fraction of full strength (0 to 1) felt at `distance` from the
    /// zero-force surface.
    ///
    /// For a regular source `distance` is measured outward: full strength up
    /// to `falloff_start_range`, blending linearly to nothing at `range`.
    ///
    /// For an inverted source `distance` is the depth inside the surface:
    /// full strength up to `range`, blending to nothing at
    /// `falloff_start_range`. Negative depths lie outside the shape and get
    /// nothing.
    pub fn falloff_factor(&self, distance: f32) -> f32 {
        if self.inverted {
            if distance < 0.0 || distance > self.falloff_start_range {
                0.0
            } else if distance <= self.range {
                1.0
            } else {
                (self.falloff_start_range - distance) / self.falloff_distance
            }
        } else if distance > self.range {
            0.0
        } else if distance <= self.falloff_start_range {
            1.0
        } else {
            (self.range - distance) / self.falloff_distance
        }
    }

    /// Same as [`SourceProperties::falloff_factor`] for a regular source but
    /// starting from a squared distance, so the common in-range and
    /// out-of-range cases skip the square root.
    pub fn falloff_factor_sqr(&self, sqr_distance: f32) -> f32 {
        if sqr_distance > self.sqr_range {
            0.0
        } else if sqr_distance <= self.sqr_falloff_start_range {
            1.0
        } else {
            (self.range - sqr_distance.sqrt()) / self.falloff_distance
        }
    }
}
