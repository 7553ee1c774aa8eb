//! Keyboard controls standing in for the parameter sidebar.
//!
//! Owns the live parameter record. The frame loop only ever sees copies
//! taken with [`Controls::snapshot`] between frames.

use winit::keyboard::KeyCode;

use crate::params::WaveParams;

/// Separation change per key press (normalized units)
const SEPARATION_STEP: f32 = 5.0;
/// Frequency change per key press (normalized units)
const FREQUENCY_STEP: f32 = 1.0;
/// Phase change per key press (degrees)
const PHASE_STEP_DEG: f32 = 15.0;

/// One user edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    WidenSlits,
    NarrowSlits,
    RaiseFrequency,
    LowerFrequency,
    AdvancePhase,
    RetardPhase,
    ToggleBarrier,
    ToggleTorch,
    NextTheme,
    PreviousTheme,
}

impl ControlAction {
    /// Key binding lookup
    pub fn from_key(code: KeyCode, shift: bool) -> Option<Self> {
        let action = match code {
            KeyCode::ArrowUp => ControlAction::WidenSlits,
            KeyCode::ArrowDown => ControlAction::NarrowSlits,
            KeyCode::ArrowRight => ControlAction::RaiseFrequency,
            KeyCode::ArrowLeft => ControlAction::LowerFrequency,
            KeyCode::BracketRight => ControlAction::AdvancePhase,
            KeyCode::BracketLeft => ControlAction::RetardPhase,
            KeyCode::KeyB => ControlAction::ToggleBarrier,
            KeyCode::Space => ControlAction::ToggleTorch,
            KeyCode::KeyT if shift => ControlAction::PreviousTheme,
            KeyCode::KeyT => ControlAction::NextTheme,
            _ => return None,
        };
        Some(action)
    }
}

/// Live parameter state edited by the user
#[derive(Debug, Clone)]
pub struct Controls {
    params: WaveParams,
}

impl Controls {
    pub fn new(initial: WaveParams) -> Self {
        Self {
            params: initial.clamped(),
        }
    }

    /// Consistent copy for the next frame
    pub fn snapshot(&self) -> WaveParams {
        self.params
    }

    /// Apply an edit. Returns true if any parameter actually changed.
    pub fn apply(&mut self, action: ControlAction) -> bool {
        let before = self.params;
        let p = &mut self.params;
        match action {
            ControlAction::WidenSlits => p.separation += SEPARATION_STEP,
            ControlAction::NarrowSlits => p.separation -= SEPARATION_STEP,
            ControlAction::RaiseFrequency => p.frequency += FREQUENCY_STEP,
            ControlAction::LowerFrequency => p.frequency -= FREQUENCY_STEP,
            ControlAction::AdvancePhase => p.phase_deg += PHASE_STEP_DEG,
            ControlAction::RetardPhase => p.phase_deg -= PHASE_STEP_DEG,
            ControlAction::ToggleBarrier => p.barrier_mode = !p.barrier_mode,
            ControlAction::ToggleTorch => p.torch_on = !p.torch_on,
            ControlAction::NextTheme => p.color_theme = p.color_theme.next(),
            ControlAction::PreviousTheme => p.color_theme = p.color_theme.prev(),
        }
        self.params = self.params.clamped();
        self.params != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColorTheme;

    #[test]
    fn test_edits_are_clamped() {
        let mut controls = Controls::new(WaveParams {
            separation: 98.0,
            frequency: 1.0,
            ..WaveParams::default()
        });

        assert!(controls.apply(ControlAction::WidenSlits));
        assert_eq!(controls.snapshot().separation, 100.0);
        assert!(!controls.apply(ControlAction::WidenSlits));

        assert!(!controls.apply(ControlAction::LowerFrequency));
        assert_eq!(controls.snapshot().frequency, 1.0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut controls = Controls::new(WaveParams::default());
        let snapshot = controls.snapshot();
        controls.apply(ControlAction::ToggleTorch);

        assert!(snapshot.torch_on);
        assert!(!controls.snapshot().torch_on);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            ControlAction::from_key(KeyCode::KeyT, false),
            Some(ControlAction::NextTheme)
        );
        assert_eq!(
            ControlAction::from_key(KeyCode::KeyT, true),
            Some(ControlAction::PreviousTheme)
        );
        assert_eq!(ControlAction::from_key(KeyCode::KeyQ, false), None);

        let mut controls = Controls::new(WaveParams::default());
        controls.apply(ControlAction::PreviousTheme);
        assert_eq!(controls.snapshot().color_theme, ColorTheme::Grayscale);
    }

    #[test]
    fn test_phase_stays_in_range() {
        let mut controls = Controls::new(WaveParams::default());
        assert!(!controls.apply(ControlAction::RetardPhase));
        for _ in 0..30 {
            controls.apply(ControlAction::AdvancePhase);
        }
        assert_eq!(controls.snapshot().phase_deg, 360.0);
    }
}
