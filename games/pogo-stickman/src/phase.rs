/// Where a run is. Changes only through the transition methods below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Scene built, waiting for the first key press.
    #[default]
    NotStarted,
    /// Controls live.
    Playing,
    /// Head hit a spike.
    Lost,
    /// Head reached the flag.
    Won,
}

impl Phase {
    /// Code reported to the host (`get_phase`).
    pub fn code(self) -> u32 {
        match self {
            Phase::NotStarted => 0,
            Phase::Playing => 1,
            Phase::Lost => 2,
            Phase::Won => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Lost | Phase::Won)
    }

    /// `NotStarted → Playing`. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        self.advance(Phase::NotStarted, Phase::Playing)
    }

    /// `Playing → Lost`. Returns whether the phase changed.
    pub fn lose(&mut self) -> bool {
        self.advance(Phase::Playing, Phase::Lost)
    }

    /// `Playing → Won`. Returns whether the phase changed.
    pub fn win(&mut self) -> bool {
        self.advance(Phase::Playing, Phase::Won)
    }

    /// Back to `NotStarted`, for a rebuilt scene.
    pub fn reset(&mut self) {
        *self = Phase::NotStarted;
    }

    fn advance(&mut self, from: Phase, to: Phase) -> bool {
        if *self != from {
            return false;
        }
        log::info!("phase {:?} -> {:?}", from, to);
        *self = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut phase = Phase::default();
        assert_eq!(phase, Phase::NotStarted);
        assert!(phase.start());
        assert!(!phase.start());
        assert!(phase.win());
        assert_eq!(phase.code(), 3);
        assert!(phase.is_terminal());
    }

    #[test]
    fn terminal_phases_are_sticky() {
        let mut phase = Phase::Playing;
        assert!(phase.lose());
        assert!(!phase.win());
        assert!(!phase.lose());
        assert!(!phase.start());
        assert_eq!(phase, Phase::Lost);
    }

    #[test]
    fn cannot_finish_before_starting() {
        let mut phase = Phase::NotStarted;
        assert!(!phase.lose());
        assert!(!phase.win());
        assert_eq!(phase.code(), 0);
    }

    #[test]
    fn reset_from_terminal() {
        let mut phase = Phase::Won;
        phase.reset();
        assert_eq!(phase, Phase::NotStarted);
        assert!(phase.start());
    }
}
