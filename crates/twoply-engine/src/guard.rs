//! Scoped apply/undo.

use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::error::SearchError;
use crate::view::PositionView;

/// Holds a position advanced by one move and rewinds it when released.
///
/// Call [`undo`](MoveGuard::undo) on every normal exit so a failed rewind
/// reaches the caller. If the guard is dropped instead (an early `?` return
/// or a panic unwinding through the search), `Drop` rewinds the move.
pub struct MoveGuard<'a, P: PositionView> {
    position: &'a mut P,
    armed: bool,
}

impl<'a, P: PositionView> MoveGuard<'a, P> {
    /// Apply `mv` to `position` and return a guard over the advanced position.
    pub fn apply(position: &'a mut P, mv: P::Move) -> Result<Self, SearchError> {
        position.apply(mv)?;
        Ok(Self {
            position,
            armed: true,
        })
    }

    /// Rewind the move and release the position.
    pub fn undo(mut self) -> Result<P::Move, SearchError> {
        self.armed = false;
        Ok(self.position.undo()?)
    }
}

impl<P: PositionView> Deref for MoveGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.position
    }
}

impl<P: PositionView> DerefMut for MoveGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.position
    }
}

impl<P: PositionView> Drop for MoveGuard<'_, P> {
    fn drop(&mut self) {
        if self.armed
            && let Err(err) = self.position.undo()
        {
            error!(error = %err, "failed to rewind position while unwinding search");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MoveGuard;
    use crate::error::SearchError;
    use twoply_core::{Position, PositionError};

    fn first_move(position: &Position) -> twoply_core::Move {
        position.legal_moves()[0]
    }

    #[test]
    fn explicit_undo_restores() {
        let mut position = Position::starting_position();
        let before = position.clone();
        let mv = first_move(&position);
        let guard = MoveGuard::apply(&mut position, mv).unwrap();
        assert_eq!(guard.ply(), 1);
        assert_eq!(guard.undo().unwrap(), mv);
        assert_eq!(position, before);
    }

    #[test]
    fn drop_restores_on_early_return() {
        fn advance_then_fail(position: &mut Position) -> Result<(), SearchError> {
            let mv = position.legal_moves()[0];
            let guard = MoveGuard::apply(position, mv)?;
            assert_eq!(guard.ply(), 1);
            Err(PositionError::NothingToUndo.into())
        }

        let mut position = Position::starting_position();
        let before = position.clone();
        assert!(advance_then_fail(&mut position).is_err());
        assert_eq!(position, before);
    }

    #[test]
    fn drop_restores_on_panic() {
        let mut position = Position::starting_position();
        let before = position.clone();
        let mv = first_move(&position);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = MoveGuard::apply(&mut position, mv).unwrap();
            panic!("search blew up");
        }));
        assert!(result.is_err());
        assert_eq!(position, before);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut position = Position::starting_position();
        let before = position.clone();
        let mv = first_move(&position);
        let mut outer = MoveGuard::apply(&mut position, mv).unwrap();
        let reply = outer.legal_moves()[0];
        let inner = MoveGuard::apply(&mut *outer, reply).unwrap();
        assert_eq!(inner.ply(), 2);
        assert_eq!(inner.undo().unwrap(), reply);
        assert_eq!(outer.undo().unwrap(), mv);
        assert_eq!(position, before);
    }

    #[test]
    fn illegal_apply_leaves_no_guard() {
        let mut position = Position::starting_position();
        let mv = twoply_core::Move {
            from: twoply_core::Square::E2,
            to: twoply_core::Square::E5,
            promotion: None,
        };
        let result = MoveGuard::apply(&mut position, mv);
        assert!(matches!(
            result,
            Err(SearchError::Position(PositionError::IllegalMove { .. }))
        ));
        drop(result);
        assert_eq!(position.ply(), 0);
    }
}
