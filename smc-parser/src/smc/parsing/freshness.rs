use crate::smc::model::Fsm;

/// Decides whether the output for a model is already up to date.
///
/// Called once, before the map body is parsed. Only the header fields are filled in at that
/// point, which is enough to know the output file names.
pub trait FreshnessCheck {
    fn is_up_to_date(&self, fsm: &Fsm) -> bool;
}

/// Never up to date: always parse everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysStale;

impl FreshnessCheck for AlwaysStale {
    fn is_up_to_date(&self, _fsm: &Fsm) -> bool {
        false
    }
}

impl<F> FreshnessCheck for F
where
    F: Fn(&Fsm) -> bool,
{
    fn is_up_to_date(&self, fsm: &Fsm) -> bool {
        self(fsm)
    }
}
