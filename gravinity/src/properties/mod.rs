use log::warn;

mod falloff;

/// Range, falloff and strength shared by every field source shape.
///
/// All setters clamp instead of failing, so `0 <= falloff_distance <= range`
/// holds after any sequence of mutations. Every mutation bumps
/// [`SourceProperties::revision`] which lets shapes that cache derived
/// geometry notice the change the next time they are read.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProperties {
    range: f32,
    falloff_distance: f32,
    strength: f32,
    inverted: bool,
    capture_player_exclusive: bool,

    // Derived
    falloff_start_range: f32,
    sqr_range: f32,
    sqr_falloff_start_range: f32,

    revision: u64,
}

impl SourceProperties {
    pub fn new(range: f32, falloff_distance: f32, strength: f32) -> Self {
        let mut properties = Self {
            range: 0.0,
            falloff_distance: 0.0,
            strength,
            inverted: false,
            capture_player_exclusive: false,
            falloff_start_range: 0.0,
            sqr_range: 0.0,
            sqr_falloff_start_range: 0.0,
            revision: 0,
        };

        properties.set_range(range);
        properties.set_falloff_distance(falloff_distance);

        properties
    }

    pub fn range(&self) -> f32 {
        self.range
    }

    pub fn falloff_distance(&self) -> f32 {
        self.falloff_distance
    }

    pub fn falloff_start_range(&self) -> f32 {
        self.falloff_start_range
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn capture_player_exclusive(&self) -> bool {
        self.capture_player_exclusive
    }

    pub fn sqr_range(&self) -> f32 {
        self.sqr_range
    }

    pub fn sqr_falloff_start_range(&self) -> f32 {
        self.sqr_falloff_start_range
    }

    /// Counter bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets the outer range, pulling the falloff distance down with it if needed
    pub fn set_range(&mut self, range: f32) {
        let range = if range.is_nan() || range < 0.0 {
            warn!("Invalid source range {}, clamping to 0", range);
            0.0
        } else {
            range
        };

        self.range = range;
        self.sqr_range = range * range;
        self.falloff_distance = self.falloff_distance.min(range);

        self.recalculate_falloff();
    }

    pub fn set_falloff_distance(&mut self, falloff_distance: f32) {
        // max/min rather than clamp so a NaN input lands on 0
        self.falloff_distance = falloff_distance.max(0.0).min(self.range);

        self.recalculate_falloff();
    }

    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
        self.revision += 1;
    }

    pub fn set_capture_player_exclusive(&mut self, exclusive: bool) {
        self.capture_player_exclusive = exclusive;
        self.revision += 1;
    }

    // Only the owning source knows whether its shape can be inverted
    pub(crate) fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;

        self.recalculate_falloff();
    }

    fn recalculate_falloff(&mut self) {
        self.falloff_start_range = if self.inverted {
            self.range + self.falloff_distance
        } else {
            self.range - self.falloff_distance
        };

        self.sqr_falloff_start_range = self.falloff_start_range * self.falloff_start_range;
        self.revision += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_falloff_clamped_to_range() {
        let mut properties = SourceProperties::new(10.0, 1.0, 9.81);

        properties.set_falloff_distance(15.0);
        assert_eq!(properties.falloff_distance(), 10.0);
        assert_eq!(properties.falloff_start_range(), 0.0);

        properties.set_falloff_distance(-3.0);
        assert_eq!(properties.falloff_distance(), 0.0);
    }

    #[test]
    fn test_range_drags_falloff_down() {
        let mut properties = SourceProperties::new(10.0, 4.0, 9.81);

        properties.set_range(2.5);
        assert_eq!(properties.range(), 2.5);
        assert_eq!(properties.falloff_distance(), 2.5);
        assert_eq!(properties.sqr_range(), 6.25);
        assert_eq!(properties.sqr_falloff_start_range(), 0.0);

        // Growing the range again does not grow the falloff back
        properties.set_range(20.0);
        assert_eq!(properties.falloff_distance(), 2.5);
        assert_eq!(properties.falloff_start_range(), 17.5);
    }

    #[test]
    fn test_invariant_holds_in_either_order() {
        let values = [-1.0, 0.0, 0.5, 3.0, 12.0];

        for range in values {
            for falloff in values {
                let mut range_first = SourceProperties::new(5.0, 1.0, 1.0);
                range_first.set_range(range);
                range_first.set_falloff_distance(falloff);

                let mut falloff_first = SourceProperties::new(5.0, 1.0, 1.0);
                falloff_first.set_falloff_distance(falloff);
                falloff_first.set_range(range);

                for properties in [range_first, falloff_first] {
                    assert!(properties.range() >= 0.0);
                    assert!(properties.falloff_distance() >= 0.0);
                    assert!(properties.falloff_distance() <= properties.range());
                }
            }
        }
    }

    #[test]
    fn test_inverted_falloff_start() {
        let mut properties = SourceProperties::new(4.0, 1.5, 1.0);
        assert_eq!(properties.falloff_start_range(), 2.5);

        properties.set_inverted(true);
        assert_eq!(properties.falloff_start_range(), 5.5);
        assert_eq!(properties.sqr_falloff_start_range(), 30.25);

        properties.set_inverted(false);
        assert_eq!(properties.falloff_start_range(), 2.5);
    }

    #[test]
    fn test_revision_bumps_on_mutation() {
        let mut properties = SourceProperties::new(4.0, 1.0, 1.0);

        let before = properties.revision();
        properties.set_range(6.0);
        assert!(properties.revision() > before);

        let before = properties.revision();
        properties.set_strength(3.0);
        properties.set_capture_player_exclusive(true);
        assert_eq!(properties.revision(), before + 2);
    }
}
