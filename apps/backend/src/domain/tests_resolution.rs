use crate::domain::actions::GameAction;
use crate::domain::events::{GameEvent, Resolution};
use crate::domain::resolution::{frame_verdict, resolve_cops_check, resolve_frame_check, resolve_pause};
use crate::domain::state::{Game, GameStatus, LocationName, Substate};
use crate::domain::test_state_helpers::{
    accept, drain_pool, grey, id_at, make_scapegoat, place, seeded_game, set_hand, single,
    started, T0,
};
use crate::domain::{Card, PlayerColor};

fn last_resolution(game: &Game) -> Resolution {
    match started(game).events.last() {
        Some(GameEvent::Resolution(r)) => r.resolution.clone(),
        other => panic!("expected resolution event, got {other:?}"),
    }
}

/// Three-player game paused for a frame check where seat `s` commits
/// `commits[s]` from a two-card hand. Seat 2 is the Scapegoat.
fn paused_frame(commits: [Card; 3]) -> Game {
    let mut game = seeded_game(3, 21);
    make_scapegoat(&mut game, 2);
    drain_pool(&mut game, 0, 1, 1);
    place(&mut game, 0, LocationName::Trade);
    for (seat, card) in commits.iter().enumerate() {
        set_hand(&mut game, seat, vec![grey(), *card]);
    }
    let game = accept(
        &game,
        &id_at(&game, 0),
        GameAction::GoToLocation {
            location: LocationName::FrameSteal,
        },
    );
    let game = (0..3).fold(game, |g, seat| {
        let id = id_at(&g, seat);
        accept(&g, &id, GameAction::FrameChooseCard { player_card_index: 1 })
    });
    assert_eq!(game.status(), GameStatus::PausedForFrameCheck);
    game
}

#[test]
fn cops_check_always_crowns_the_scapegoat() {
    let mut game = seeded_game(4, 20);
    make_scapegoat(&mut game, 2);
    let caller = id_at(&game, 0);
    let paused = accept(
        &game,
        &caller,
        GameAction::GoToLocation {
            location: LocationName::Cops,
        },
    );

    let finished = resolve_cops_check(paused, T0);
    match &finished {
        Game::Finished {
            winner_player_ids, ..
        } => assert_eq!(winner_player_ids, &vec![id_at(&finished, 2)]),
        other => panic!("expected finished, got {:?}", other.status()),
    }
    assert_eq!(
        last_resolution(&finished),
        Resolution::CopsCalled { caller_id: caller }
    );
}

#[test]
fn frame_succeeds_with_all_but_one_matching() {
    let game = paused_frame([
        single(PlayerColor::Blue),
        single(PlayerColor::Blue),
        grey(),
    ]);
    let scapegoat = started(&game).scapegoat;
    // Re-deal the committed cards in the Scapegoat's actual color.
    let game = recolor_commits(game, scapegoat);

    let finished = resolve_frame_check(game, T0);
    match &finished {
        Game::Finished {
            winner_player_ids, ..
        } => {
            assert_eq!(
                winner_player_ids,
                &vec![id_at(&finished, 0), id_at(&finished, 1)]
            );
        }
        other => panic!("expected finished, got {:?}", other.status()),
    }
    assert_eq!(last_resolution(&finished), Resolution::FrameSuccess);
}

#[test]
fn frame_fails_below_threshold_and_returns_to_swap() {
    let game = paused_frame([grey(), grey(), grey()]);
    let frame_cards = match &game {
        Game::PausedForFrameCheck { frame_cards, .. } => frame_cards.clone(),
        _ => unreachable!(),
    };
    let active_before = started(&game).active_player;

    let resumed = resolve_frame_check(game, T0);
    assert_eq!(resumed.status(), GameStatus::Ongoing);
    let g = started(&resumed);
    assert_eq!(g.active_player, active_before);
    assert_eq!(
        g.substate,
        Substate::SwapEvidence {
            location: LocationName::FrameSteal
        }
    );
    assert_eq!(
        last_resolution(&resumed),
        Resolution::FrameFailure { frame_cards }
    );
}

#[test]
fn joker_counts_as_incriminating() {
    let scapegoat = PlayerColor::Red;
    assert!(frame_verdict(
        &[Card::joker(), single(scapegoat), grey()],
        scapegoat,
        3
    ));
    assert!(!frame_verdict(&[Card::joker(), grey(), grey()], scapegoat, 3));
}

#[test]
fn frame_verdict_threshold_is_players_minus_one() {
    let sg = PlayerColor::Green;
    let hit = single(sg);
    let miss = single(PlayerColor::Blue);
    assert!(!frame_verdict(&[hit, hit, hit, hit, miss, miss], sg, 6));
    assert!(frame_verdict(&[hit, hit, hit, hit, hit, miss], sg, 6));
    assert!(frame_verdict(&[hit, hit, hit, hit], sg, 4));
}

#[test]
fn resolve_pause_passes_ongoing_games_through() {
    let game = seeded_game(3, 22);
    assert_eq!(resolve_pause(game.clone(), T0), game);
}

#[test]
#[should_panic(expected = "cops check on game")]
fn cops_check_on_ongoing_game_panics() {
    let _ = resolve_cops_check(seeded_game(3, 23), T0);
}

#[test]
#[should_panic(expected = "frame check on game")]
fn frame_check_on_cops_pause_panics() {
    let game = seeded_game(3, 24);
    let paused = accept(
        &game,
        &id_at(&game, 0),
        GameAction::GoToLocation {
            location: LocationName::Cops,
        },
    );
    let _ = resolve_frame_check(paused, T0);
}

/// Replace every committed non-grey card with a single of `color`.
fn recolor_commits(mut game: Game, color: PlayerColor) -> Game {
    if let Game::PausedForFrameCheck { game: g, .. } = &mut game {
        for p in g.players.iter_mut() {
            if p.hand[1] != grey() {
                p.hand[1] = single(color);
            }
        }
    }
    game
}
