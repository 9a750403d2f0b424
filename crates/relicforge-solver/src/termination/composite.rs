//! Any-of composition of stop conditions.

use super::Termination;
use crate::stats::SearchStats;

/// Stops the search as soon as one member of the tuple does.
///
/// Members are checked left to right and the check short-circuits.
///
/// # Examples
///
/// ```
/// use relicforge_solver::termination::{
///     NodeCountTermination, OrTermination, Termination, TimeTermination,
/// };
/// use relicforge_solver::SearchStats;
///
/// // Stop after 30 seconds or 1000 nodes
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1000),
/// ));
/// assert!(!termination.is_terminated(&SearchStats::default()));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, stats: &SearchStats) -> bool {
                $((self.0).$idx.is_terminated(stats))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
