#![no_main]

//! Game turn fuzzer.
//!
//! Feeds arbitrary amounts, legal or not, into a game of any variant and
//! pile size, with the occasional forfeit. After every call:
//! 1. A rejected move must leave the game unchanged
//! 2. All game invariants must hold
//! 3. A finished game must refuse further moves

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nim_arena::game::{check_invariants, ForfeitReason, NimGame, Variant};
use nim_arena::MoveError;

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    /// Submit this amount for the side to move.
    Take(u8),
    /// The side to move gives up.
    Forfeit,
}

/// Structured input for game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Variant selector.
    variant: u8,
    /// Starting pile.
    pile: u8,
    /// Actions, in order.
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: GameInput| {
    let variant = Variant::ALL[usize::from(input.variant) % Variant::ALL.len()];
    let mut game = NimGame::new(variant, u32::from(input.pile));

    for action in input.actions.into_iter().take(300) {
        let before = game.clone();
        match action {
            FuzzAction::Take(amount) => match game.apply_move(u32::from(amount)) {
                Ok(()) => assert!(before.legal_moves().contains(u32::from(amount))),
                Err(MoveError::InvalidMove { legal, .. }) => {
                    assert_eq!(legal, before.legal_moves());
                    assert_eq!(game, before);
                }
                Err(MoveError::GameOver) => {
                    assert!(!before.is_active());
                    assert_eq!(game, before);
                }
                Err(MoveError::AlreadyStarted) => {
                    panic!("apply_move never reports AlreadyStarted");
                }
            },
            FuzzAction::Forfeit => {
                let side = game.turn();
                if game.forfeit(side, ForfeitReason::MalformedResponse).is_ok() {
                    assert_eq!(game.winner(), Some(side.other()));
                } else {
                    assert_eq!(game, before);
                }
            }
        }

        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");

        if !game.is_active() {
            assert!(game.legal_moves().is_empty());
            assert_eq!(game.apply_move(1), Err(MoveError::GameOver));
        }
    }
});
