use crate::domain::actions::GameAction;
use crate::domain::legal::legal_actions;
use crate::domain::state::LocationName;
use crate::domain::test_state_helpers::{accept, drain_pool, id_at, infos, place, seeded_game, started};
use crate::domain::Game;

fn go(location: LocationName) -> GameAction {
    GameAction::GoToLocation { location }
}

#[test]
fn opening_moves_exclude_current_location_and_frame_steal() {
    let game = seeded_game(4, 40);
    let actions = legal_actions(&game, &id_at(&game, 0));
    assert_eq!(
        actions,
        vec![
            go(LocationName::Trade),
            go(LocationName::Spy),
            go(LocationName::Stash),
            go(LocationName::Cops),
        ]
    );
}

#[test]
fn waiting_players_have_nothing_to_do() {
    let game = seeded_game(4, 41);
    for seat in 1..4 {
        assert!(legal_actions(&game, &id_at(&game, seat)).is_empty());
    }
    assert!(legal_actions(&game, "ghost").is_empty());
    assert!(legal_actions(&Game::new_lobby(infos(3)), "p1").is_empty());
}

#[test]
fn opposite_seat_may_call_cops_at_six() {
    let game = seeded_game(6, 42);
    assert_eq!(legal_actions(&game, &id_at(&game, 3)), vec![go(LocationName::Cops)]);
    assert!(legal_actions(&game, &id_at(&game, 2)).is_empty());
}

#[test]
fn empty_pool_unlocks_frame_steal() {
    let mut game = seeded_game(3, 43);
    drain_pool(&mut game, 1, 2, 2);
    place(&mut game, 0, LocationName::Spy);
    let actions = legal_actions(&game, &id_at(&game, 0));
    assert!(actions.contains(&go(LocationName::FrameSteal)));
    assert!(!actions.contains(&go(LocationName::Prepare)));

    let game = accept(&game, &id_at(&game, 0), go(LocationName::FrameSteal));
    let steal = legal_actions(&game, &id_at(&game, 0));
    assert_eq!(
        steal,
        vec![GameAction::StealChoosePlayer {
            player_color: started(&game).players[1].color
        }]
    );
}

#[test]
fn trade_partner_may_respond_once() {
    let game = seeded_game(3, 44);
    let (p0, p2) = (id_at(&game, 0), id_at(&game, 2));
    let game = accept(&game, &p0, go(LocationName::Trade));
    let game = accept(
        &game,
        &p0,
        GameAction::TradeChoosePlayer {
            player_color: started(&game).players[2].color,
        },
    );
    assert_eq!(legal_actions(&game, &p2).len(), 2);
    assert!(legal_actions(&game, &id_at(&game, 1)).is_empty());

    let game = accept(&game, &p2, GameAction::TradeChooseCard { player_card_index: 0 });
    assert!(legal_actions(&game, &p2).is_empty());
    assert_eq!(legal_actions(&game, &p0).len(), 2);
}
