//! View state transitions.

/// Which preset is active and whether free orbiting is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub preset_index: usize,
    pub orbit_enabled: bool,
}

impl ViewState {
    pub fn toggle_orbit(self) -> Self {
        Self {
            orbit_enabled: !self.orbit_enabled,
            ..self
        }
    }

    /// Step to the next of `preset_count` presets, wrapping around.
    pub fn advance_preset(self, preset_count: usize) -> Self {
        if preset_count == 0 {
            return self;
        }
        Self {
            preset_index: (self.preset_index + 1) % preset_count,
            ..self
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            preset_index: 0,
            orbit_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_cycles() {
        let mut state = ViewState::default();
        for expected in [1, 2, 3, 0, 1] {
            state = state.advance_preset(4);
            assert_eq!(state.preset_index, expected);
        }
        assert!(state.orbit_enabled);
    }

    #[test]
    fn test_toggle_is_independent() {
        let state = ViewState::default().advance_preset(4).toggle_orbit();
        assert_eq!(state.preset_index, 1);
        assert!(!state.orbit_enabled);
        assert_eq!(state.toggle_orbit().toggle_orbit(), state);
    }

    #[test]
    fn test_no_presets() {
        let state = ViewState::default();
        assert_eq!(state.advance_preset(0), state);
    }
}
